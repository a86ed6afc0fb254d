use std::fmt::Write;

use crate::utils::color::RING_BACKGROUND;

use super::donut::{DonutChart, Tone};
use super::geometry::DonutLayout;

const FULL_SWEEP_EPSILON: f64 = 1e-9;

/// Renders a donut chart as a standalone SVG document.
///
/// Layer order is ring background, muted allocation wedges, bright progress arcs, then the
/// center label.
pub fn render_donut(chart: &DonutChart) -> String {
    let layout = &chart.layout;
    let size = layout.viewport();
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
    );
    push_circle(&mut svg, layout, &RING_BACKGROUND.to_string(), "ring");

    for segment in &chart.segments {
        if segment.sweep() >= 360.0 - FULL_SWEEP_EPSILON {
            push_circle(&mut svg, layout, &segment.color, "allocation");
        } else {
            push_path(&mut svg, layout, &segment.path(layout), &segment.color, "allocation");
        }
    }
    for arc in &chart.progress {
        if arc.end - arc.start >= 360.0 - FULL_SWEEP_EPSILON {
            push_circle(&mut svg, layout, &arc.color, "progress");
        } else {
            push_path(&mut svg, layout, &arc.path(layout), &arc.color, "progress");
        }
    }

    let class = match chart.center.tone {
        Tone::Positive => "center-positive",
        Tone::Negative => "center-negative",
    };
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" class="{class}">{}</text>"#,
        layout.center.x,
        layout.center.y,
        escape(&chart.center.text)
    );
    svg.push_str("</svg>\n");
    svg
}

fn push_circle(svg: &mut String, layout: &DonutLayout, color: &str, class: &str) {
    let _ = writeln!(
        svg,
        r#"  <circle class="{class}" cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        layout.center.x,
        layout.center.y,
        layout.radius,
        escape(color),
        layout.stroke
    );
}

fn push_path(svg: &mut String, layout: &DonutLayout, d: &str, color: &str, class: &str) {
    let _ = writeln!(
        svg,
        r#"  <path class="{class}" d="{d}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        escape(color),
        layout.stroke
    );
}

/// Escapes text content and double- or single-quoted attribute values.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
