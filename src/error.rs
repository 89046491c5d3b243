use crate::model::NodeId;

/// Errors surfaced by the siting engine.
///
/// Every per-request failure carries a reason that can be shown to the caller
/// as-is. Nothing is coerced: invalid weights are rejected, not renormalized.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SitingError {
    /// Weights, demand size or population records failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested node id is not part of the current snapshot
    #[error("unknown node id {0}")]
    NotFound(NodeId),

    /// Scoring was requested before any successful populate
    #[error("no population loaded; populate the engine before scoring")]
    EmptyPopulation,
}

impl SitingError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        SitingError::Validation(reason.into())
    }
}

pub type Result<T, E = SitingError> = std::result::Result<T, E>;
