//! Error surface of tracker use-cases.

use crate::model::entry::ValidationError;
use crate::repo::kv_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Failure of a tracker use-case.
#[derive(Debug)]
pub enum TrackerError {
    /// User input rejected; nothing was changed or persisted.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for TrackerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
