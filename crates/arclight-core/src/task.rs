use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// One worked example: an input grid and the output it should map to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPair {
    pub input: Grid,
    pub output: Grid,
}

/// A reference task definition: train examples plus the test pair under review.
///
/// The canonical on-disk format allows several test pairs per task; sources
/// resolve that to the first one, which is the pair reviews are scored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub train: Vec<GridPair>,
    pub test: GridPair,
}

/// A task joined with both models' outputs for its test case.
///
/// This is the unit the renderer and any host UI consume: everything needed
/// to show one task side by side, with no further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewTask {
    pub id: String,
    pub train: Vec<GridPair>,
    pub test_input: Grid,
    pub ground_truth: Grid,
    pub baseline_output: Grid,
    pub candidate_output: Grid,
}

impl ReviewTask {
    pub fn new(task: Task, baseline_output: Grid, candidate_output: Grid) -> Self {
        Self {
            id: task.id,
            train: task.train,
            test_input: task.test.input,
            ground_truth: task.test.output,
            baseline_output,
            candidate_output,
        }
    }
}
