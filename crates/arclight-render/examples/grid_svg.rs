use arclight_core::{Grid, Palette};
use arclight_render::svg::render_grid_svg;
use arclight_render::{RenderOptions, layout_grid};
use std::io::Read;

fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("read stdin");

    let grid: Grid = serde_json::from_str(&input).expect("grid JSON");
    let title = std::env::args().nth(1).unwrap_or_default();

    let layout = layout_grid(&grid, &Palette::default(), &title);
    let svg = render_grid_svg(&layout, &RenderOptions::default());
    print!("{svg}");
}
