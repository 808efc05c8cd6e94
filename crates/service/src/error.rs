#![forbid(unsafe_code)]

use mc_storage::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    /// Missing or unusable caller input; rejected before any mutation.
    Validation(&'static str),
    /// A referenced design or niche does not exist; no mutation occurred.
    NotFound(&'static str),
    /// Underlying storage failure; propagated unmodified.
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "invalid request: {message}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::Store(err) => write!(f, "storage: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
