#![forbid(unsafe_code)]

//! Review-task assembly for puzzle-grid model outputs (headless).
//!
//! Design goals:
//! - deterministic, order-preserving assembly (ids go in, buckets come out in the same order)
//! - fail-fast loading: a malformed input file aborts the run instead of skewing the review
//! - no I/O beyond what the caller hands over (task lookup sits behind [`TaskSource`])

pub mod bundle;
pub mod error;
pub mod grid;
pub mod palette;
pub mod results;
pub mod source;
pub mod task;

pub use bundle::{Bundle, BundleManifest};
pub use error::{Error, Result};
pub use grid::Grid;
pub use palette::{FALLBACK_COLOR, Palette};
pub use results::{AttemptRecord, AttemptSet, CandidateOutputs};
pub use source::{FsTaskSource, MemoryTaskSource, TaskSource};
pub use task::{GridPair, ReviewTask, Task};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attempt name reviews read when the manifest does not pick one.
pub const DEFAULT_ATTEMPT_NAME: &str = "attempt_1";

/// Decides which bucket a review task lands in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectnessRule {
    /// The candidate output must equal the reference ground truth.
    #[default]
    MatchesGroundTruth,
    /// Exactly the task with this id is correct, regardless of its grids.
    ///
    /// Kept for replaying historical review datasets that were curated by
    /// hand rather than scored.
    PinnedTask(String),
}

impl CorrectnessRule {
    pub fn is_correct(&self, review: &ReviewTask) -> bool {
        match self {
            Self::MatchesGroundTruth => review.candidate_output == review.ground_truth,
            Self::PinnedTask(id) => review.id == *id,
        }
    }
}

/// One of the two review buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Correct,
    Incorrect,
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Both buckets of one classification run.
///
/// Every paired task lands in exactly one bucket, in identifier-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub correct: Vec<ReviewTask>,
    pub incorrect: Vec<ReviewTask>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.incorrect.is_empty()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[ReviewTask] {
        match bucket {
            Bucket::Correct => &self.correct,
            Bucket::Incorrect => &self.incorrect,
        }
    }

    /// Looks one task up by id, searching both buckets.
    pub fn find(&self, id: &str) -> Option<(Bucket, &ReviewTask)> {
        self.correct
            .iter()
            .find(|t| t.id == id)
            .map(|t| (Bucket::Correct, t))
            .or_else(|| {
                self.incorrect
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| (Bucket::Incorrect, t))
            })
    }
}

/// Zips an ordered identifier list with positionally aligned candidate outputs.
///
/// Position `k` of `outputs` is taken to answer identifier `k`; there is no
/// content-based matching. The two lists must have the same length and the
/// identifiers must be unique, otherwise the whole pairing fails. The result
/// preserves identifier order.
pub fn pair(identifiers: &[String], outputs: Vec<Grid>) -> Result<IndexMap<String, Grid>> {
    if identifiers.len() != outputs.len() {
        return Err(Error::LengthMismatch {
            identifiers: identifiers.len(),
            outputs: outputs.len(),
        });
    }
    let mut paired = IndexMap::with_capacity(identifiers.len());
    for (id, grid) in identifiers.iter().zip(outputs) {
        if paired.insert(id.clone(), grid).is_some() {
            return Err(Error::DuplicateTask { id: id.clone() });
        }
    }
    Ok(paired)
}

/// Joins paired candidate outputs with baseline attempts and reference tasks,
/// and partitions the result into correct and incorrect buckets.
#[derive(Debug, Clone)]
pub struct Assembler {
    attempt_name: String,
    rule: CorrectnessRule,
}

impl Default for Assembler {
    fn default() -> Self {
        Self {
            attempt_name: DEFAULT_ATTEMPT_NAME.to_string(),
            rule: CorrectnessRule::default(),
        }
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks which attempt name to read from the baseline records.
    pub fn with_attempt_name(mut self, name: impl Into<String>) -> Self {
        self.attempt_name = name.into();
        self
    }

    pub fn with_rule(mut self, rule: CorrectnessRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn attempt_name(&self) -> &str {
        &self.attempt_name
    }

    pub fn rule(&self) -> &CorrectnessRule {
        &self.rule
    }

    /// Builds one [`ReviewTask`] per paired id and routes it to a bucket.
    ///
    /// Iteration follows `paired`'s order, and each bucket keeps that order.
    /// A missing attempt or task definition aborts the run; a partially
    /// assembled review would silently misreport the models under comparison.
    pub fn classify(
        &self,
        paired: &IndexMap<String, Grid>,
        attempts: &AttemptSet,
        source: &dyn TaskSource,
    ) -> Result<Partition> {
        let mut partition = Partition::default();
        for (id, candidate) in paired {
            let baseline = attempts.output_for(id, &self.attempt_name)?.clone();
            let task = source.load(id)?;
            let review = ReviewTask::new(task, baseline, candidate.clone());
            if self.rule.is_correct(&review) {
                partition.correct.push(review);
            } else {
                partition.incorrect.push(review);
            }
        }
        tracing::debug!(
            correct = partition.correct.len(),
            incorrect = partition.incorrect.len(),
            "classified review tasks"
        );
        Ok(partition)
    }
}
