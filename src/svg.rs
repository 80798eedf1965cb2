//! SVG visualization of a zoom.
//!
//! Renders two annotated viewport panels, the inline rectangle and the zoomed
//! rectangle, stacked vertically with an arrow between them.
//!
//! # Example
//!
//! ```
//! use zenzoom::{Rect, Vec2, ZoomGeometry, svg::render_zoom_svg};
//!
//! let geometry = ZoomGeometry::compute(
//!     Rect::new(100.0, 100.0, 200.0, 100.0),
//!     Vec2::new(500.0, 300.0),
//!     1.0,
//!     None,
//! )
//! .unwrap();
//!
//! let svg = render_zoom_svg(&geometry);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::geometry::{Rect, Size, ZoomGeometry};

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// One viewport panel.
struct Step {
    label: String,
    /// The viewport.
    outer: Size,
    /// The element inside the viewport.
    inner: Rect,
    annotation: String,
}

/// Render a complete SVG document showing `geometry` before and after zoom.
pub fn render_zoom_svg(geometry: &ZoomGeometry) -> String {
    render_steps(&build_steps(geometry))
}

fn build_steps(geometry: &ZoomGeometry) -> Vec<Step> {
    let viewport = Size::new(geometry.center.x * 2.0, geometry.center.y * 2.0);
    let rect = geometry.rect;
    let zoomed = geometry.zoomed_rect();

    vec![
        Step {
            label: format!("Inline  {}×{}", rect.width, rect.height),
            outer: viewport,
            inner: rect,
            annotation: format!("at ({}, {})", rect.left, rect.top),
        },
        Step {
            label: format!("Zoomed  {:.1}×{:.1}", zoomed.width, zoomed.height),
            outer: viewport,
            inner: zoomed,
            annotation: format!(
                "translate ({}, {}), scale ({}, {})",
                geometry.translate.x, geometry.translate.y, geometry.scale.x, geometry.scale.y
            ),
        },
    ]
}

/// Scale a Size to fit within MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    if size.width <= 0.0 || size.height <= 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / size.width).min(MAX_PANEL_H / size.height);
    (size.width * scale, size.height * scale, scale)
}

fn render_steps(steps: &[Step]) -> String {
    let total_h = MARGIN_TOP * 2.0
        + steps.len() as f64 * (LABEL_H + MAX_PANEL_H)
        + steps.len().saturating_sub(1) as f64 * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .viewport { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .element { fill: #6ba3d6; fill-opacity: 0.85; stroke: #2c6faa; stroke-width: 1.5; }
  .arrow { stroke: #666; stroke-width: 1.5; fill: none; marker-end: url(#arrowhead); }
  .arrowhead { fill: #666; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .viewport { fill: #2d2d2d; stroke: #555; }
    .element { fill: #3a72a4; stroke: #5a9fd4; }
    .arrow { stroke: #888; }
    .arrowhead { fill: #888; }
  }
</style>
<defs>
  <marker id="arrowhead" markerWidth="8" markerHeight="6" refX="8" refY="3" orient="auto">
    <polygon points="0 0, 8 3, 0 6" class="arrowhead"/>
  </marker>
</defs>
"##);

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;

    for (i, step) in steps.iter().enumerate() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&step.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (sw, sh, scale) = scale_to_fit(step.outer);
        let panel_x = center_x - sw / 2.0;
        let panel_y = y;

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="viewport" rx="2"/>"#,
            panel_x, panel_y, sw, sh
        ));
        svg.push('\n');

        let r = step.inner;
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="element" rx="1"/>"#,
            panel_x + r.left * scale,
            panel_y + r.top * scale,
            r.width * scale,
            r.height * scale
        ));
        svg.push('\n');

        if !step.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                panel_y + sh + 14.0,
                escape_xml(&step.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H;

        if i < steps.len() - 1 {
            svg.push_str(&format!(
                r#"<line x1="{}" y1="{:.1}" x2="{}" y2="{:.1}" class="arrow"/>"#,
                center_x,
                y + 8.0,
                center_x,
                y + PANEL_GAP - 8.0
            ));
            svg.push('\n');
            y += PANEL_GAP;
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
