use serde::Serialize;

/// Axis-aligned bounds in grid units, y growing upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// One filled disc, in grid units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disc {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
}

/// One laid-out grid: discs on an inverted-row lattice plus bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    /// Standalone plot title; empty when the plot sits in a labeled panel.
    pub title: String,
    pub rows: usize,
    pub cols: usize,
    pub bounds: Bounds,
    pub discs: Vec<Disc>,
}

/// One grid plot placed on a sheet. `x`/`y` is the plot area's top-left
/// corner in pixels; the label is drawn in a band above it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub grid: GridLayout,
}

/// A composed review sheet: heading, panels and total pixel size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetLayout {
    pub heading: String,
    pub width: f64,
    pub height: f64,
    pub panels: Vec<Panel>,
}
