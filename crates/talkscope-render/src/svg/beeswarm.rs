use super::util::{escape_xml, fmt};
use super::{no_data_message, open_plot, open_svg};
use crate::model::BeeswarmLayout;
use crate::scale::group_thousands;
use std::fmt::Write as _;

pub fn render_beeswarm_svg(layout: &BeeswarmLayout) -> String {
    let frame = &layout.frame;
    let mut out = String::new();
    open_svg(&mut out, "beeswarm", frame.width, frame.height, None);
    open_plot(&mut out, frame);

    let _ = write!(
        &mut out,
        r#"<g class="axis x-axis" transform="translate(0,{})">"#,
        fmt(layout.axis_y)
    );
    let _ = write!(
        &mut out,
        r#"<path class="domain" d="M0,0H{}"/>"#,
        fmt(frame.inner_width)
    );
    for tick in &layout.ticks {
        let _ = write!(
            &mut out,
            r#"<g class="tick" transform="translate({},0)"><line y2="6"/><text y="9" dy="0.71em" text-anchor="middle">{}</text></g>"#,
            fmt(tick.position),
            escape_xml(&tick.label)
        );
    }
    out.push_str("</g>");
    let _ = write!(
        &mut out,
        r#"<text class="axis-label" x="{}" y="{}" text-anchor="middle">Views</text>"#,
        fmt(frame.inner_width / 2.0),
        fmt(frame.inner_height + 15.0)
    );

    for mark in &layout.marks {
        let _ = write!(
            &mut out,
            r#"<circle class="bee-mark" cx="{}" cy="{}" r="{}" data-talk="{}"><title>{}"#,
            fmt(mark.x),
            fmt(mark.y),
            fmt(layout.radius),
            mark.talk_id,
            escape_xml(&mark.headline)
        );
        let _ = write!(
            &mut out,
            "\n{}\n{} views</title></circle>",
            escape_xml(&mark.speaker),
            group_thousands(mark.views)
        );
    }
    out.push_str("</g>");

    if layout.empty {
        no_data_message(&mut out, frame.width / 2.0, frame.inner_height / 2.0);
    }
    out.push_str("</svg>");
    out
}
