use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request-level failures of the locator.
///
/// Per-candidate routing failures never show up here: they are absorbed by
/// the pipeline and degrade that single result to an approximation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Address not found: {0}")]
    AddressNotFound(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}
