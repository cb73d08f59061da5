//! SVG emitters. Each takes a finished layout and writes a standalone SVG document.

mod beeswarm;
mod chord;
mod circlepack;
mod linechart;
pub mod path;
pub(crate) mod util;

pub use beeswarm::render_beeswarm_svg;
pub use chord::render_chord_svg;
pub use circlepack::render_circle_pack_svg;
pub use linechart::render_line_chart_svg;

use crate::EMPTY_MESSAGE;
use crate::model::Frame;
use std::fmt::Write as _;
use util::{escape_xml, fmt};

fn open_svg(out: &mut String, class: &str, width: f64, height: f64, view_box: Option<[f64; 4]>) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{class}" width="{w}" height="{h}""#,
        class = escape_xml(class),
        w = fmt(width),
        h = fmt(height)
    );
    if let Some([x, y, w, h]) = view_box {
        let _ = write!(
            out,
            r#" viewBox="{} {} {} {}""#,
            fmt(x),
            fmt(y),
            fmt(w),
            fmt(h)
        );
    }
    out.push('>');
}

fn open_plot(out: &mut String, frame: &Frame) {
    let _ = write!(
        out,
        r#"<g class="chart" transform="translate({},{})">"#,
        fmt(frame.origin_x),
        fmt(frame.origin_y)
    );
}

fn no_data_message(out: &mut String, x: f64, y: f64) {
    let _ = write!(
        out,
        r#"<text class="no-data-message" x="{}" y="{}" text-anchor="middle">{}</text>"#,
        fmt(x),
        fmt(y),
        escape_xml(EMPTY_MESSAGE)
    );
}
