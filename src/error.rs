use thiserror::Error;

/// Failures internal to the persistence path.
///
/// These never cross the public [`crate::store::QuestionStore`] boundary:
/// every operation catches them and degrades to a safe absence value
/// (`None`, `false`, or an empty sequence).
#[derive(Debug, Error)]
pub enum Error {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
