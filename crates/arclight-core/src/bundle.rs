use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::palette::Palette;
use crate::results::{AttemptSet, CandidateOutputs, read_json};
use crate::source::FsTaskSource;
use crate::{Assembler, CorrectnessRule, DEFAULT_ATTEMPT_NAME, Partition};

fn default_attempt_name() -> String {
    DEFAULT_ATTEMPT_NAME.to_string()
}

/// On-disk description of one review dataset.
///
/// Relative paths are resolved against the manifest file's directory, so a
/// dataset directory can be checked out or copied anywhere as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Ordered task identifier list. This order survives pairing and
    /// classification all the way into the buckets.
    pub tasks: Vec<String>,
    /// Baseline attempt file: JSON object, task id to attempt records.
    pub attempts: PathBuf,
    /// Candidate output file: JSON array aligned with `tasks`, or a JSON
    /// object keyed by task id.
    pub candidates: PathBuf,
    /// Directory of `<id>.json` reference task definitions.
    pub task_dir: PathBuf,
    #[serde(default = "default_attempt_name")]
    pub attempt_name: String,
    #[serde(default)]
    pub rule: CorrectnessRule,
    /// Partial palette override: cell value to CSS color. Values it does not
    /// name keep the default palette's colors.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub palette: IndexMap<u8, String>,
}

impl BundleManifest {
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// A fully assembled review dataset: both buckets plus the effective palette.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub partition: Partition,
    pub palette: Palette,
    pub manifest: BundleManifest,
}

impl Bundle {
    /// Reads every file the manifest names, pairs and classifies.
    ///
    /// This is a one-shot load with no caching; loading the same manifest
    /// twice yields the same bundle. Any unreadable or malformed input file
    /// fails the whole load.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let manifest = BundleManifest::load(manifest_path)?;
        let base = manifest_path.parent().unwrap_or(Path::new("."));

        let attempts = AttemptSet::load(&base.join(&manifest.attempts))?;
        let candidates = CandidateOutputs::load(&base.join(&manifest.candidates))?;
        let source = FsTaskSource::new(base.join(&manifest.task_dir));

        let paired = candidates.into_keyed(&manifest.tasks)?;
        let assembler = Assembler::new()
            .with_attempt_name(manifest.attempt_name.clone())
            .with_rule(manifest.rule.clone());
        let partition = assembler.classify(&paired, &attempts, &source)?;
        let palette = Palette::with_overrides(&manifest.palette);

        tracing::debug!(
            manifest = %manifest_path.display(),
            tasks = partition.len(),
            correct = partition.correct.len(),
            "loaded review bundle"
        );
        Ok(Self {
            partition,
            palette,
            manifest,
        })
    }
}
