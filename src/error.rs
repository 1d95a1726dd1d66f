use thiserror::Error;

/// Errors raised where external data enters the timeline engine.
///
/// The layout computations themselves are infallible; these only come from
/// parsing commit records, reading files, or walking a repository.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to parse commit data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("commit {sha} has an unparseable date: {value:?}")]
    InvalidDate { sha: String, value: String },

    #[error("unknown time scale: {0:?} (expected day, week, month, quarter or year)")]
    UnknownScale(String),

    #[error("unknown grouping: {0:?} (expected type, author, date or epic)")]
    UnknownGroupBy(String),

    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, TimelineError>;
