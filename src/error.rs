//! Error types for pose quality analysis

use thiserror::Error;

/// Hard failures surfaced to the caller.
///
/// Low classification confidence, occluded landmarks and degenerate geometry
/// are not errors; they are absorbed into the returned analysis.
#[derive(Debug, Error)]
pub enum QualityError {
    #[error("Expected {expected} landmarks per frame, found {found}")]
    LandmarkCount { expected: usize, found: usize },

    #[error("Invalid landmark {index}: {reason}")]
    InvalidLandmark { index: usize, reason: String },

    #[error("Classification confidence must be within [0, 1], got {0}")]
    InvalidConfidence(f64),

    #[error("Unsupported pose for quality analysis: {0}")]
    UnknownPose(String),

    #[error("Posture analyzer produced no indicators for {0}")]
    NoIndicators(String),

    #[error("Invalid quality policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
