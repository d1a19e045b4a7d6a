#![forbid(unsafe_code)]

//! Disc-grid layout and SVG rendering for puzzle-grid reviews.
//!
//! Layout and rendering are split: [`layout_grid`] and [`layout_review_sheet`]
//! produce plain geometry (discs in grid units, panels in pixels), and the
//! functions in [`svg`] turn that geometry into markup. Both stages are pure;
//! rendering the same inputs twice yields byte-identical output.

pub mod grid;
pub mod model;
pub mod sheet;
pub mod svg;

pub use grid::layout_grid;
pub use sheet::layout_review_sheet;

/// Pixel geometry knobs shared by layout and rendering.
///
/// A sheet must be rendered with the same options it was laid out with;
/// panel rectangles are computed from `cell_size` during layout.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per grid unit.
    pub cell_size: f64,
    /// Space around the sheet and between panels, in pixels.
    pub padding: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 28.0,
            padding: 16.0,
        }
    }
}
