use super::util::{escape_xml, fmt};
use super::{no_data_message, open_plot, open_svg};
use crate::model::LineChartLayout;
use std::fmt::Write as _;

pub fn render_line_chart_svg(layout: &LineChartLayout) -> String {
    let frame = &layout.frame;
    let mut out = String::new();
    open_svg(&mut out, "line-chart", frame.width, frame.height, None);

    for entry in &layout.legend {
        let _ = write!(
            &mut out,
            r#"<circle class="legend-mark" cx="{x}" cy="{y}" r="5" style="fill: {c}; stroke: {c};"/><text class="legend-text" dx="{tx}" dy="15">{label}</text>"#,
            x = fmt(entry.x),
            y = fmt(entry.y),
            c = escape_xml(&entry.color),
            tx = fmt(entry.x + 10.0),
            label = escape_xml(&entry.label)
        );
    }
    let _ = write!(
        &mut out,
        r#"<text class="axis-label" text-anchor="middle" x="{}" y="{}">Years</text>"#,
        fmt(frame.width / 2.0),
        fmt(frame.height)
    );
    let _ = write!(
        &mut out,
        r#"<text class="axis-label" text-anchor="middle" transform="rotate(-90)" x="{}" y="16">Number of Talks</text>"#,
        fmt(-frame.height / 2.0)
    );

    open_plot(&mut out, frame);
    let _ = write!(
        &mut out,
        r#"<g class="axis x-axis" transform="translate(0,{})"><path class="domain" d="M0,0H{}"/>"#,
        fmt(frame.inner_height),
        fmt(frame.inner_width)
    );
    for tick in &layout.x_ticks {
        let _ = write!(
            &mut out,
            r#"<g class="tick" transform="translate({},0)"><line y2="6"/><text y="10" dy="0.71em" text-anchor="middle">{}</text></g>"#,
            fmt(tick.position),
            escape_xml(&tick.label)
        );
    }
    out.push_str("</g>");
    let _ = write!(
        &mut out,
        r#"<g class="axis y-axis"><path class="domain" d="M0,{}V0"/>"#,
        fmt(frame.inner_height)
    );
    for tick in &layout.y_ticks {
        let _ = write!(
            &mut out,
            r#"<g class="tick" transform="translate(0,{})"><line x2="-6"/><text x="-9" dy="0.32em" text-anchor="end">{}</text></g>"#,
            fmt(tick.position),
            escape_xml(&tick.label)
        );
    }
    out.push_str("</g>");

    out.push_str("<g>");
    for series in &layout.series {
        let _ = write!(
            &mut out,
            r#"<g class="marksGroups" data-series="{name}"><path class="chart-line" d="{d}" style="stroke: {c}; fill: none;"/>"#,
            name = escape_xml(&series.name),
            d = series.path,
            c = escape_xml(&series.color)
        );
        for point in &series.points {
            let _ = write!(
                &mut out,
                r#"<circle class="circle-mark" cx="{x}" cy="{y}" r="5" style="fill: {c}; stroke: {c};"><title>{n} Ted Talks in {year} with the theme: {name}</title></circle>"#,
                x = fmt(point.x),
                y = fmt(point.y),
                c = escape_xml(&series.color),
                n = point.count,
                year = point.year,
                name = escape_xml(&series.name)
            );
        }
        out.push_str("</g>");
    }
    out.push_str("</g></g>");

    if layout.empty {
        no_data_message(&mut out, frame.width / 2.0, frame.height / 2.0);
    }
    out.push_str("</svg>");
    out
}
