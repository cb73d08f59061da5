use super::open_svg;
use super::util::{escape_xml, fmt};
use crate::model::{ChordHighlight, ChordLayout};
use std::fmt::Write as _;

pub fn render_chord_svg(layout: &ChordLayout) -> String {
    let mut out = String::new();
    open_svg(&mut out, "chord", layout.width, layout.height, None);
    let _ = write!(
        &mut out,
        r#"<g class="chart" transform="translate({},{})">"#,
        fmt(layout.center_x),
        fmt(layout.center_y)
    );

    out.push_str(r#"<g class="arc-group">"#);
    for group in &layout.groups {
        let _ = write!(
            &mut out,
            r#"<g class="group" data-index="{index}"><path class="arc" d="{d}" style="fill: {color}; stroke: black;"/>"#,
            index = group.index,
            d = group.path,
            color = escape_xml(&group.color)
        );
        let class = if group.selected {
            "arc-label selected"
        } else {
            "arc-label"
        };
        let _ = write!(
            &mut out,
            r#"<text class="{class}" dy=".25em" transform="{transform}""#,
            transform = escape_xml(&group.label.transform)
        );
        if group.label.flipped {
            out.push_str(r#" text-anchor="end""#);
        }
        let _ = write!(&mut out, ">{}</text></g>", escape_xml(&group.label.text));
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="path-group">"#);
    for ribbon in &layout.ribbons {
        let class = match ribbon.highlight {
            ChordHighlight::Neutral => "chord",
            ChordHighlight::Selected => "chord selected",
            ChordHighlight::NotSelected => "chord notSelected",
        };
        let _ = write!(
            &mut out,
            r#"<path class="{class}" d="{d}" data-source="{s}" data-target="{t}" style="fill: {color}; stroke: {color};"/>"#,
            d = ribbon.path,
            s = ribbon.source,
            t = ribbon.target,
            color = escape_xml(&ribbon.color)
        );
    }
    out.push_str("</g></g></svg>");
    out
}
