use arclight_core::{Palette, ReviewTask};

use crate::RenderOptions;
use crate::grid::layout_grid;
use crate::model::{GridLayout, Panel, SheetLayout};

/// Height of the sheet heading strip, in pixels.
const HEADING_BAND: f64 = 36.0;
/// Height of the label strip above each panel, in pixels.
const LABEL_BAND: f64 = 20.0;

fn panel_size(grid: &GridLayout, cell: f64) -> (f64, f64) {
    (grid.bounds.width() * cell, grid.bounds.height() * cell)
}

/// Composes one review task into a sheet layout.
///
/// Train pairs form one column each, input above output, with both rows
/// aligned so unevenly sized grids do not stagger the sheet. Below them the
/// test stage shows four panels side by side: the test input, both models'
/// outputs and the reference ground truth.
pub fn layout_review_sheet(
    review: &ReviewTask,
    palette: &Palette,
    options: &RenderOptions,
) -> SheetLayout {
    let cell = options.cell_size.max(1.0);
    let pad = options.padding.max(0.0);

    let mut panels = Vec::new();

    let train: Vec<(GridLayout, GridLayout)> = review
        .train
        .iter()
        .map(|p| {
            (
                layout_grid(&p.input, palette, ""),
                layout_grid(&p.output, palette, ""),
            )
        })
        .collect();
    let has_train = !train.is_empty();

    let input_row_h = train
        .iter()
        .map(|(i, _)| panel_size(i, cell).1)
        .fold(0.0, f64::max);
    let output_row_h = train
        .iter()
        .map(|(_, o)| panel_size(o, cell).1)
        .fold(0.0, f64::max);

    let y_inputs = HEADING_BAND + LABEL_BAND;
    let y_outputs = y_inputs + input_row_h + pad + LABEL_BAND;

    let mut x = pad;
    for (k, (input, output)) in train.into_iter().enumerate() {
        let (iw, ih) = panel_size(&input, cell);
        let (ow, oh) = panel_size(&output, cell);
        let column_w = iw.max(ow);
        panels.push(Panel {
            label: format!("Input {}", k + 1),
            x: x + (column_w - iw) / 2.0,
            y: y_inputs,
            width: iw,
            height: ih,
            grid: input,
        });
        panels.push(Panel {
            label: format!("Output {}", k + 1),
            x: x + (column_w - ow) / 2.0,
            y: y_outputs,
            width: ow,
            height: oh,
            grid: output,
        });
        x += column_w + pad;
    }
    let train_width = x;
    let train_bottom = if has_train {
        y_outputs + output_row_h
    } else {
        HEADING_BAND
    };

    let stages = [
        ("Test Input", &review.test_input),
        ("Baseline Output", &review.baseline_output),
        ("Candidate Output", &review.candidate_output),
        ("Ground Truth", &review.ground_truth),
    ];
    let y_test = train_bottom + pad + LABEL_BAND;
    let mut x = pad;
    let mut test_row_h = 0.0f64;
    for (label, grid) in stages {
        let layout = layout_grid(grid, palette, "");
        let (w, h) = panel_size(&layout, cell);
        panels.push(Panel {
            label: label.to_string(),
            x,
            y: y_test,
            width: w,
            height: h,
            grid: layout,
        });
        x += w + pad;
        test_row_h = test_row_h.max(h);
    }
    let test_width = x;

    SheetLayout {
        heading: format!("Task {}", review.id),
        width: train_width.max(test_width),
        height: y_test + test_row_h + pad,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arclight_core::{Grid, GridPair};

    fn grid(cells: Vec<Vec<u8>>) -> Grid {
        Grid::from_rows(cells).unwrap()
    }

    fn review() -> ReviewTask {
        ReviewTask {
            id: "11a5d5e1".to_string(),
            train: vec![
                GridPair {
                    input: grid(vec![vec![1]]),
                    output: grid(vec![vec![1, 1]]),
                },
                GridPair {
                    input: grid(vec![vec![2], vec![2]]),
                    output: grid(vec![vec![2]]),
                },
            ],
            test_input: grid(vec![vec![3]]),
            ground_truth: grid(vec![vec![3, 3]]),
            baseline_output: grid(vec![vec![0, 0]]),
            candidate_output: grid(vec![vec![3, 3]]),
        }
    }

    #[test]
    fn train_rows_share_a_baseline() {
        let sheet = layout_review_sheet(&review(), &Palette::default(), &RenderOptions::default());
        assert_eq!(sheet.panels.len(), 2 * 2 + 4);
        // Both train inputs share a y even though the second is taller.
        assert_eq!(sheet.panels[0].y, sheet.panels[2].y);
        assert_eq!(sheet.panels[1].y, sheet.panels[3].y);
        // The output row clears the tallest input.
        assert!(sheet.panels[1].y >= sheet.panels[2].y + sheet.panels[2].height);
    }

    #[test]
    fn test_stage_panels_follow_in_order() {
        let sheet = layout_review_sheet(&review(), &Palette::default(), &RenderOptions::default());
        let labels: Vec<&str> = sheet.panels.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Input 1",
                "Output 1",
                "Input 2",
                "Output 2",
                "Test Input",
                "Baseline Output",
                "Candidate Output",
                "Ground Truth",
            ]
        );
        assert_eq!(sheet.heading, "Task 11a5d5e1");
    }

    #[test]
    fn no_train_pairs_still_yields_the_test_stage() {
        let mut r = review();
        r.train.clear();
        let sheet = layout_review_sheet(&r, &Palette::default(), &RenderOptions::default());
        assert_eq!(sheet.panels.len(), 4);
        assert!(sheet.width > 0.0 && sheet.height > 0.0);
    }
}
