use std::fmt::Write as _;

use crate::RenderOptions;
use crate::model::{GridLayout, SheetLayout};

/// Sheet and figure background, behind headings and labels.
const CANVAS_BG: &str = "#383838";
/// Plot-area background behind the discs.
const PLOT_BG: &str = "#4a4a4a";
/// Height of the title strip on a standalone grid plot, in pixels.
const TITLE_BAND: f64 = 32.0;

const GRID_STYLE: &str = r#"<style>
.title { fill: white; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 14px; font-weight: bold; text-anchor: middle; }
</style>
"#;

const SHEET_STYLE: &str = r#"<style>
.heading { fill: white; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 16px; font-weight: bold; text-anchor: middle; }
.panel-label { fill: white; font-family: ui-sans-serif, system-ui, sans-serif; font-size: 12px; font-weight: bold; text-anchor: middle; }
</style>
"#;

/// Renders one laid-out grid as a standalone SVG document.
///
/// One grid unit maps to `cell_size` pixels on both axes, so the drawing
/// keeps a square aspect ratio at any size. The plot carries no axes, ticks
/// or frame; only the background rect and the discs are drawn. A non-empty
/// title adds a strip above the plot.
pub fn render_grid_svg(layout: &GridLayout, options: &RenderOptions) -> String {
    let cell = options.cell_size.max(1.0);
    let plot_w = layout.bounds.width() * cell;
    let plot_h = layout.bounds.height() * cell;
    let title_band = if layout.title.is_empty() {
        0.0
    } else {
        TITLE_BAND
    };
    let width = plot_w;
    let height = plot_h + title_band;

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt(width),
        fmt(height),
        fmt(width),
        fmt(height)
    );
    out.push_str(GRID_STYLE);
    let _ = writeln!(
        &mut out,
        r#"<rect class="canvas" width="{}" height="{}" fill="{CANVAS_BG}"/>"#,
        fmt(width),
        fmt(height)
    );
    if !layout.title.is_empty() {
        let _ = writeln!(
            &mut out,
            r#"<text class="title" x="{}" y="22">{}</text>"#,
            fmt(width / 2.0),
            escape_xml(&layout.title)
        );
    }
    write_grid_plot(&mut out, layout, 0.0, title_band, cell);
    out.push_str("</svg>\n");
    out
}

/// Renders one laid-out review sheet as a standalone SVG document.
pub fn render_sheet_svg(sheet: &SheetLayout, options: &RenderOptions) -> String {
    let cell = options.cell_size.max(1.0);

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        fmt(sheet.width),
        fmt(sheet.height),
        fmt(sheet.width),
        fmt(sheet.height)
    );
    out.push_str(SHEET_STYLE);
    let _ = writeln!(
        &mut out,
        r#"<rect class="canvas" width="{}" height="{}" fill="{CANVAS_BG}"/>"#,
        fmt(sheet.width),
        fmt(sheet.height)
    );
    let _ = writeln!(
        &mut out,
        r#"<text class="heading" x="{}" y="24">{}</text>"#,
        fmt(sheet.width / 2.0),
        escape_xml(&sheet.heading)
    );
    for panel in &sheet.panels {
        let _ = writeln!(
            &mut out,
            r#"<text class="panel-label" x="{}" y="{}">{}</text>"#,
            fmt(panel.x + panel.width / 2.0),
            fmt(panel.y - 6.0),
            escape_xml(&panel.label)
        );
        write_grid_plot(&mut out, &panel.grid, panel.x, panel.y, cell);
    }
    out.push_str("</svg>\n");
    out
}

/// Writes one plot (background rect plus discs) with its top-left corner at
/// `(ox, oy)` pixels. Grid y grows upwards, SVG y grows downwards, so the
/// vertical axis flips here.
fn write_grid_plot(out: &mut String, layout: &GridLayout, ox: f64, oy: f64, cell: f64) {
    let b = &layout.bounds;
    let _ = writeln!(
        out,
        r#"<rect class="plot" x="{}" y="{}" width="{}" height="{}" fill="{PLOT_BG}"/>"#,
        fmt(ox),
        fmt(oy),
        fmt(b.width() * cell),
        fmt(b.height() * cell)
    );
    out.push_str(r#"<g class="cells">"#);
    out.push('\n');
    for disc in &layout.discs {
        let _ = writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt(ox + (disc.cx - b.min_x) * cell),
            fmt(oy + (b.max_y - disc.cy) * cell),
            fmt(disc.r * cell),
            escape_xml(&disc.fill)
        );
    }
    out.push_str("</g>\n");
}

fn fmt(v: f64) -> String {
    // Three fractional digits, ties half-up. Exact for every coordinate this
    // renderer produces, and drops the last-bit noise of products like
    // `0.4 * cell`.
    if !v.is_finite() {
        return "0".to_string();
    }
    if v.abs() < 0.0005 {
        return "0".to_string();
    }

    let r = ((v * 1000.0) + 0.5).floor() / 1000.0;
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise_and_negative_zero() {
        assert_eq!(fmt(28.0), "28");
        assert_eq!(fmt(11.2), "11.2");
        assert_eq!(fmt(0.4 * 28.0), "11.2");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(55.999999999), "56");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml(r#"a<b & "c'""#), "a&lt;b &amp; &quot;c&#39;&quot;");
    }
}
