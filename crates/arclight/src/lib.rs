#![forbid(unsafe_code)]

//! `arclight` is a headless review toolkit for puzzle-grid model comparisons.
//!
//! The core crate assembles review tasks (pairing candidate outputs with
//! task ids, joining baseline attempts and reference definitions, and
//! partitioning into correct/incorrect buckets); the render layer draws
//! them as disc-grid plots. Hosts embed the results in whatever UI they
//! have; nothing here talks to a screen.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`arclight::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use arclight_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use arclight_render::model::{Bounds, Disc, GridLayout, Panel, SheetLayout};
    pub use arclight_render::svg::{render_grid_svg, render_sheet_svg};
    pub use arclight_render::{RenderOptions, layout_grid, layout_review_sheet};

    #[cfg(feature = "raster")]
    pub mod raster;

    use arclight_core::{Grid, Palette, ReviewTask};

    /// Lays out and renders one grid in a single call.
    pub fn grid_svg(grid: &Grid, palette: &Palette, title: &str, options: &RenderOptions) -> String {
        render_grid_svg(&layout_grid(grid, palette, title), options)
    }

    /// Lays out and renders one review sheet in a single call.
    pub fn review_sheet_svg(
        review: &ReviewTask,
        palette: &Palette,
        options: &RenderOptions,
    ) -> String {
        render_sheet_svg(&layout_review_sheet(review, palette, options), options)
    }

    /// Convenience wrapper that bundles a palette and render options.
    ///
    /// Intended for hosts that render many sheets from one loaded bundle,
    /// where threading the same two parameters through every call is noisy.
    /// All work is CPU-bound; nothing here performs I/O.
    #[derive(Debug, Clone, Default)]
    pub struct SheetRenderer {
        pub palette: Palette,
        pub options: RenderOptions,
    }

    impl SheetRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_palette(mut self, palette: Palette) -> Self {
            self.palette = palette;
            self
        }

        pub fn with_options(mut self, options: RenderOptions) -> Self {
            self.options = options;
            self
        }

        pub fn grid_svg(&self, grid: &Grid, title: &str) -> String {
            grid_svg(grid, &self.palette, title, &self.options)
        }

        pub fn sheet_svg(&self, review: &ReviewTask) -> String {
            review_sheet_svg(review, &self.palette, &self.options)
        }

        #[cfg(feature = "raster")]
        pub fn sheet_png(
            &self,
            review: &ReviewTask,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.sheet_svg(review), raster)
        }

        #[cfg(feature = "raster")]
        pub fn sheet_jpeg(
            &self,
            review: &ReviewTask,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.sheet_svg(review), raster)
        }

        #[cfg(feature = "raster")]
        pub fn sheet_pdf(&self, review: &ReviewTask) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.sheet_svg(review))
        }
    }
}
