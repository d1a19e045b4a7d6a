use arclight_core::{Grid, Palette};
use arclight_render::svg::render_grid_svg;
use arclight_render::{RenderOptions, layout_grid};

#[test]
fn single_background_cell_spans_unit_margins() {
    let grid = Grid::from_rows(vec![vec![0]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "");

    assert_eq!(layout.bounds.min_x, -1.0);
    assert_eq!(layout.bounds.min_y, -1.0);
    assert_eq!(layout.bounds.max_x, 1.0);
    assert_eq!(layout.bounds.max_y, 1.0);
    assert_eq!(layout.discs.len(), 1);
    assert_eq!(layout.discs[0].fill, "black");

    let svg = render_grid_svg(&layout, &RenderOptions::default());
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="56" height="56""#));
    assert!(svg.contains(r#"<circle cx="28" cy="28" r="11.2" fill="black"/>"#));
    assert!(svg.contains(r##"fill="#383838""##));
    assert!(svg.contains(r##"fill="#4a4a4a""##));
    assert!(!svg.contains("class=\"title\" x"));
}

#[test]
fn rows_render_downwards() {
    let grid = Grid::from_rows(vec![vec![1], vec![2]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "");
    let svg = render_grid_svg(&layout, &RenderOptions::default());

    assert!(svg.contains(r#"<circle cx="28" cy="28" r="11.2" fill="blue"/>"#));
    assert!(svg.contains(r#"<circle cx="28" cy="56" r="11.2" fill="red"/>"#));
    // 1 col + margin wide, 2 rows + margin tall.
    assert!(svg.contains(r#"width="56" height="84""#));
}

#[test]
fn title_adds_a_strip_and_is_escaped() {
    let grid = Grid::from_rows(vec![vec![0]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "a<b & c");
    let svg = render_grid_svg(&layout, &RenderOptions::default());

    assert!(svg.contains(r#"width="56" height="88""#));
    assert!(svg.contains(r#"<text class="title" x="28" y="22">a&lt;b &amp; c</text>"#));
}

#[test]
fn unmapped_values_use_the_fallback_color() {
    let grid = Grid::from_rows(vec![vec![42]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "");
    assert_eq!(layout.discs[0].fill, "black");
}

#[test]
fn cell_size_scales_everything_uniformly() {
    let grid = Grid::from_rows(vec![vec![0]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "");
    let svg = render_grid_svg(
        &layout,
        &RenderOptions {
            cell_size: 10.0,
            ..RenderOptions::default()
        },
    );
    assert!(svg.contains(r#"width="20" height="20""#));
    assert!(svg.contains(r#"<circle cx="10" cy="10" r="4" fill="black"/>"#));
}

#[test]
fn drawing_contains_no_axes_or_frames() {
    let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "quad");
    let svg = render_grid_svg(&layout, &RenderOptions::default());
    assert!(!svg.contains("<line"));
    assert!(!svg.contains("<path"));
    assert!(!svg.contains("<polyline"));
    assert_eq!(svg.matches("<circle").count(), 4);
}

#[test]
fn rendering_is_deterministic() {
    let grid = Grid::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
    let layout = layout_grid(&grid, &Palette::default(), "t");
    let a = render_grid_svg(&layout, &RenderOptions::default());
    let b = render_grid_svg(&layout_grid(&grid, &Palette::default(), "t"), &RenderOptions::default());
    assert_eq!(a, b);
}
