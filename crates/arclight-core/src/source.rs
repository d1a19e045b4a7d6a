use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::results::read_json;
use crate::task::{GridPair, Task};

/// Resolves task identifiers to reference task definitions.
///
/// The reference dataset is a collaborator, not something this crate owns.
/// Hosts may back it with a directory of JSON files, an embedded set, or a
/// remote cache behind their own type.
pub trait TaskSource {
    fn load(&self, id: &str) -> Result<Task>;
}

/// On-disk shape of one task definition file.
#[derive(Debug, Deserialize)]
struct TaskFile {
    train: Vec<GridPair>,
    test: Vec<GridPair>,
}

fn task_from_file(id: &str, file: TaskFile) -> Result<Task> {
    let mut test = file.test;
    if test.is_empty() {
        return Err(Error::MissingTestCase { id: id.to_string() });
    }
    // Reviews are scored on the first test pair; extra pairs are ignored.
    Ok(Task {
        id: id.to_string(),
        train: file.train,
        test: test.remove(0),
    })
}

/// Loads `<dir>/<id>.json` task definition files.
#[derive(Debug, Clone)]
pub struct FsTaskSource {
    dir: PathBuf,
}

impl FsTaskSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TaskSource for FsTaskSource {
    fn load(&self, id: &str) -> Result<Task> {
        let path = self.dir.join(format!("{id}.json"));
        if !path.is_file() {
            return Err(Error::MissingTask { id: id.to_string() });
        }
        task_from_file(id, read_json(&path)?)
    }
}

/// In-memory task definitions, for tests and embedded hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryTaskSource {
    tasks: IndexMap<String, Task>,
}

impl MemoryTaskSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }
}

impl TaskSource for MemoryTaskSource {
    fn load(&self, id: &str) -> Result<Task> {
        self.tasks
            .get(id)
            .cloned()
            .ok_or_else(|| Error::MissingTask { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_test_pair_wins() {
        let pair = |v: u8| GridPair {
            input: crate::Grid::from_rows(vec![vec![v]]).unwrap(),
            output: crate::Grid::from_rows(vec![vec![v, v]]).unwrap(),
        };
        let task = task_from_file(
            "t",
            TaskFile {
                train: vec![pair(1)],
                test: vec![pair(2), pair(3)],
            },
        )
        .unwrap();
        assert_eq!(task.test, pair(2));
    }

    #[test]
    fn empty_test_list_is_rejected() {
        let err = task_from_file(
            "t",
            TaskFile {
                train: vec![],
                test: vec![],
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingTestCase { .. }));
    }
}
