use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown task id: {id}")]
    MissingTask { id: String },

    #[error("Task {id} has no test case")]
    MissingTestCase { id: String },

    #[error("No {attempt:?} output recorded for task {id}")]
    MissingAttempt { id: String, attempt: String },

    #[error("No candidate output recorded for task {id}")]
    MissingCandidate { id: String },

    #[error(
        "Identifier list and candidate outputs differ in length ({identifiers} ids, {outputs} outputs)"
    )]
    LengthMismatch { identifiers: usize, outputs: usize },

    #[error("Task id appears more than once in the identifier list: {id}")]
    DuplicateTask { id: String },

    /// Jagged or empty cell data rejected by direct grid construction.
    #[error("Malformed grid: {message}")]
    MalformedGrid { message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's contents failed JSON deserialization. Grid shape violations
    /// read from a file surface here rather than as `MalformedGrid`, with
    /// the shape detail kept in the message.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
