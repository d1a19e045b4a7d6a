use arclight_core::{Grid, Palette};

use crate::model::{Bounds, Disc, GridLayout};

/// Disc radius in grid units. Slightly under half a cell so neighbouring
/// discs stay visually separate.
pub const DISC_RADIUS: f64 = 0.4;

/// Lays out one grid as colored discs.
///
/// Cell `(i, j)` (row-major, row 0 on top) becomes a disc centered at
/// `(j, -i)`, so rows grow downwards in a y-up coordinate system and the
/// first row reads left to right along the top, matching how the grids are
/// written in task files. Bounds pad the lattice by one grid unit on every
/// side: x spans `[-1, cols]` and y spans `[-rows, 1]`.
pub fn layout_grid(grid: &Grid, palette: &Palette, title: &str) -> GridLayout {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut discs = Vec::with_capacity(rows * cols);
    let mut unmapped: Vec<u8> = Vec::new();

    for (i, row) in grid.iter_rows().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if !palette.contains(value) && !unmapped.contains(&value) {
                unmapped.push(value);
            }
            discs.push(Disc {
                cx: j as f64,
                cy: -(i as f64),
                r: DISC_RADIUS,
                fill: palette.color_for(value).to_string(),
            });
        }
    }

    if !unmapped.is_empty() {
        tracing::warn!(
            values = ?unmapped,
            fallback = arclight_core::FALLBACK_COLOR,
            "grid uses cell values the palette does not map"
        );
    }

    GridLayout {
        title: title.to_string(),
        rows,
        cols,
        bounds: Bounds {
            min_x: -1.0,
            min_y: -(rows as f64),
            max_x: cols as f64,
            max_y: 1.0,
        },
        discs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discs_sit_on_the_inverted_row_lattice() {
        let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let layout = layout_grid(&grid, &Palette::default(), "");
        let centers: Vec<(f64, f64)> = layout.discs.iter().map(|d| (d.cx, d.cy)).collect();
        assert_eq!(
            centers,
            [(0.0, 0.0), (1.0, 0.0), (0.0, -1.0), (1.0, -1.0)]
        );
        assert!(layout.discs.iter().all(|d| d.r == DISC_RADIUS));
        assert_eq!(layout.discs[0].fill, "blue");
        assert_eq!(layout.discs[3].fill, "yellow");
    }

    #[test]
    fn bounds_pad_one_unit_on_every_side() {
        let grid = Grid::from_rows(vec![vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let layout = layout_grid(&grid, &Palette::default(), "");
        assert_eq!(
            layout.bounds,
            Bounds {
                min_x: -1.0,
                min_y: -2.0,
                max_x: 3.0,
                max_y: 1.0,
            }
        );
    }
}
