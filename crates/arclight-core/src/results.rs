use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::pair;

/// Reads and deserializes one JSON file, attaching the path to any failure.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// One recorded attempt: attempt name (e.g. `attempt_1`) to output grid.
pub type AttemptRecord = IndexMap<String, Grid>;

/// The baseline model's recorded outputs, keyed by task id.
///
/// Each task maps to a list of attempt records; lookups read the first
/// record, which is where the recording harness puts the scored run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AttemptSet {
    entries: IndexMap<String, Vec<AttemptRecord>>,
}

impl AttemptSet {
    pub fn load(path: &Path) -> Result<Self> {
        let set: Self = read_json(path)?;
        tracing::debug!(
            path = %path.display(),
            tasks = set.entries.len(),
            "loaded attempt collection"
        );
        Ok(set)
    }

    pub fn from_entries(entries: IndexMap<String, Vec<AttemptRecord>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The named attempt's output for one task, from the task's first record.
    pub fn output_for(&self, id: &str, attempt: &str) -> Result<&Grid> {
        self.entries
            .get(id)
            .and_then(|records| records.first())
            .and_then(|record| record.get(attempt))
            .ok_or_else(|| Error::MissingAttempt {
                id: id.to_string(),
                attempt: attempt.to_string(),
            })
    }
}

/// The candidate model's outputs, in either of the two shipped file shapes.
///
/// Ordered files carry bare grids aligned positionally with an identifier
/// list; keyed files name their task ids directly and need no alignment.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandidateOutputs {
    Keyed(IndexMap<String, Grid>),
    Ordered(Vec<Grid>),
}

impl CandidateOutputs {
    pub fn load(path: &Path) -> Result<Self> {
        let outputs: Self = read_json(path)?;
        tracing::debug!(
            path = %path.display(),
            outputs = outputs.len(),
            keyed = matches!(outputs, Self::Keyed(_)),
            "loaded candidate outputs"
        );
        Ok(outputs)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Ordered(grids) => grids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves to a map keyed by task id, in `identifiers` order.
    ///
    /// Ordered outputs are zipped against the identifier list and must match
    /// its length exactly. Keyed outputs must cover every identifier; entries
    /// for ids the list does not name are dropped.
    pub fn into_keyed(self, identifiers: &[String]) -> Result<IndexMap<String, Grid>> {
        match self {
            Self::Ordered(grids) => pair(identifiers, grids),
            Self::Keyed(mut map) => {
                let mut keyed = IndexMap::with_capacity(identifiers.len());
                for id in identifiers {
                    if keyed.contains_key(id) {
                        return Err(Error::DuplicateTask { id: id.clone() });
                    }
                    let grid = map
                        .shift_remove(id)
                        .ok_or_else(|| Error::MissingCandidate { id: id.clone() })?;
                    keyed.insert(id.clone(), grid);
                }
                Ok(keyed)
            }
        }
    }
}
