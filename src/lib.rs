//! Pose Quality - Execution quality analysis for classified yoga postures
//!
//! Given one frame of 33 body landmarks and the posture an upstream
//! classifier recognized in it, the engine grades how well the posture is
//! executed through a deterministic pipeline: validation → gating → posture
//! analysis → aggregation → report encoding.
//!
//! ## Modules
//!
//! - **Postures**: Geometric evaluators for downdog, plank, tree, warrior2 and goddess
//! - **Aggregator**: Global score, skill level and priority indicator under a tunable policy
//! - **Stability**: Optional trunk-stillness indicator over a run of frames

pub mod aggregator;
pub mod encoder;
pub mod error;
pub mod geometry;
pub mod normalizer;
pub mod pipeline;
pub mod postures;
pub mod stability;
pub mod thresholds;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::QualityPolicy;
pub use encoder::ReportEncoder;
pub use error::QualityError;
pub use pipeline::{analyze_quality, analyze_quality_json, QualityAnalyzer};
pub use types::{
    FeedbackMessage, IndicatorSet, Landmark, LandmarkIndex, Pose, QualityAnalysis, QualityReport,
    Severity, Skeleton, SkillLevel,
};

/// Engine version embedded in every encoded report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for encoded reports
pub const PRODUCER_NAME: &str = "pose-quality";
