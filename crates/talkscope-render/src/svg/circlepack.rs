use super::util::{escape_xml, fmt};
use super::{no_data_message, open_plot, open_svg};
use crate::model::CirclePackLayout;
use std::fmt::Write as _;

pub fn render_circle_pack_svg(layout: &CirclePackLayout) -> String {
    let frame = &layout.frame;
    let mut out = String::new();
    open_svg(
        &mut out,
        "circle-pack",
        frame.width,
        frame.height,
        Some(layout.view_box),
    );

    if layout.empty {
        no_data_message(&mut out, 0.0, 0.0);
        out.push_str("</svg>");
        return out;
    }

    open_plot(&mut out, frame);
    for node in &layout.nodes {
        let _ = write!(
            &mut out,
            r#"<circle class="cp-circle" data-node="{id}" transform="translate({x},{y})" r="{r}" fill="{fill}" opacity="0.8""#,
            id = node.id,
            x = fmt(node.x),
            y = fmt(node.y),
            r = fmt(node.r),
            fill = escape_xml(&node.fill)
        );
        if let Some(url) = node.url.as_deref() {
            let _ = write!(&mut out, r#" data-url="{}""#, escape_xml(url));
        }
        out.push_str("/>");
    }
    for node in layout.nodes.iter().filter(|n| n.label_displayed) {
        let _ = write!(
            &mut out,
            r#"<text class="cp-text" data-node="{id}" transform="translate({x},{y}) rotate(-15)" style="fill-opacity: {o};">{name}</text>"#,
            id = node.id,
            x = fmt(node.x),
            y = fmt(node.y),
            o = fmt(node.label_opacity),
            name = escape_xml(&node.name)
        );
    }
    out.push_str("</g></svg>");
    out
}
