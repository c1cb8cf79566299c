//! Pipeline orchestration
//!
//! This module provides the public API for pose quality analysis.
//! It runs a detector frame through validation, gating, the posture
//! analyzer, aggregation and input-quality grading, and assembles the report.

use crate::aggregator::{Aggregator, QualityPolicy};
use crate::encoder::ReportEncoder;
use crate::error::QualityError;
use crate::normalizer::Normalizer;
use crate::postures;
use crate::stability;
use crate::types::{Landmark, Pose, QualityAnalysis, QualityReport, Skeleton};

/// Assess the execution quality of one detector frame.
///
/// # Arguments
/// * `landmarks` - Exactly 33 landmarks in anatomical index order
/// * `pose` - Classified posture name (`downdog`, `plank`, `tree`, `warrior2`, `goddess`)
/// * `classification_confidence` - Classifier confidence for `pose` (0-1)
///
/// # Returns
/// A full report, or the `unavailable` variant when the classification is
/// not trusted enough to grade. Malformed frames and unknown poses are errors.
///
/// # Example
/// ```ignore
/// let analysis = analyze_quality(&landmarks, "plank", 0.94)?;
/// if let Some(report) = analysis.report() {
///     println!("{} ({})", report.global_score, report.skill_level.as_str());
/// }
/// ```
pub fn analyze_quality(
    landmarks: &[Landmark],
    pose: &str,
    classification_confidence: f64,
) -> Result<QualityAnalysis, QualityError> {
    QualityAnalyzer::new().analyze(landmarks, pose, classification_confidence)
}

/// Same as [`analyze_quality`], from a JSON landmark array to an encoded analysis.
///
/// Landmarks may be `{"x", "y", "z", "visibility"}` objects or
/// `[x, y, z, visibility]` rows.
pub fn analyze_quality_json(
    landmarks_json: &str,
    pose: &str,
    classification_confidence: f64,
) -> Result<String, QualityError> {
    let analyzer = QualityAnalyzer::new();
    let skeleton = Skeleton::from_json(landmarks_json).map_err(reject_frame)?;
    let pose = resolve_pose(pose)?;
    let analysis = analyzer.analyze_skeleton(&skeleton, pose, classification_confidence)?;
    ReportEncoder::new().encode_to_json(&analysis)
}

fn reject_frame(e: QualityError) -> QualityError {
    tracing::warn!(
        target: "pose_quality::pipeline",
        error = %e,
        message = "rejecting malformed frame"
    );
    e
}

fn resolve_pose(pose: &str) -> Result<Pose, QualityError> {
    pose.parse().map_err(|e: QualityError| {
        tracing::warn!(
            target: "pose_quality::pipeline",
            pose = pose,
            message = "rejecting unsupported pose"
        );
        e
    })
}

/// Analyzer with a configurable [`QualityPolicy`].
///
/// Holds no per-call state; one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    policy: QualityPolicy,
}

impl QualityAnalyzer {
    /// Create an analyzer with the default policy
    pub fn new() -> Self {
        Self {
            policy: QualityPolicy::default(),
        }
    }

    /// Create an analyzer with a custom policy
    pub fn with_policy(policy: QualityPolicy) -> Result<Self, QualityError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &QualityPolicy {
        &self.policy
    }

    /// Load policy from JSON
    pub fn load_policy(&mut self, json: &str) -> Result<(), QualityError> {
        self.policy = QualityPolicy::from_json(json)?;
        Ok(())
    }

    /// Save policy to JSON
    pub fn save_policy(&self) -> Result<String, QualityError> {
        self.policy.to_json()
    }

    /// Validate a raw frame and analyze it
    pub fn analyze(
        &self,
        landmarks: &[Landmark],
        pose: &str,
        classification_confidence: f64,
    ) -> Result<QualityAnalysis, QualityError> {
        self.analyze_with_history(landmarks, pose, classification_confidence, &[])
    }

    /// Analyze a frame preceded by earlier frames of the same posture.
    ///
    /// A non-empty `history` adds a `stability` indicator computed over the
    /// history followed by the current frame.
    pub fn analyze_with_history(
        &self,
        landmarks: &[Landmark],
        pose: &str,
        classification_confidence: f64,
        history: &[Skeleton],
    ) -> Result<QualityAnalysis, QualityError> {
        let skeleton = Skeleton::new(landmarks.to_vec()).map_err(reject_frame)?;
        let pose = resolve_pose(pose)?;
        self.run(&skeleton, pose, classification_confidence, history)
    }

    /// Analyze an already validated frame
    pub fn analyze_skeleton(
        &self,
        skeleton: &Skeleton,
        pose: Pose,
        classification_confidence: f64,
    ) -> Result<QualityAnalysis, QualityError> {
        self.run(skeleton, pose, classification_confidence, &[])
    }

    /// Pipeline stages:
    /// 1. Normalizer - Confidence validation
    /// 2. Gating - Untrusted classifications yield `unavailable`
    /// 3. Posture analyzer - Indicators, feedback, measurements
    /// 4. Stability - Optional temporal indicator
    /// 5. Aggregator - Global score, skill level, priority indicator
    /// 6. Normalizer - Input quality grading
    fn run(
        &self,
        skeleton: &Skeleton,
        pose: Pose,
        classification_confidence: f64,
        history: &[Skeleton],
    ) -> Result<QualityAnalysis, QualityError> {
        let classification_confidence = Normalizer::validate_confidence(classification_confidence)
            .map_err(|e| {
                tracing::warn!(
                    target: "pose_quality::pipeline",
                    pose = pose.as_str(),
                    error = %e,
                    message = "rejecting classification confidence"
                );
                e
            })?;

        if classification_confidence < self.policy.gating_threshold {
            tracing::info!(
                target: "pose_quality::pipeline",
                pose = pose.as_str(),
                confidence = classification_confidence,
                threshold = self.policy.gating_threshold,
                message = "classification below gating threshold; report unavailable"
            );
            return Ok(QualityAnalysis::Unavailable {
                pose,
                classification_confidence,
                gating_threshold: self.policy.gating_threshold,
                reason: format!(
                    "classification confidence {} is below the gating threshold {}",
                    classification_confidence, self.policy.gating_threshold
                ),
            });
        }

        let mut analysis = postures::analyze(pose, skeleton);
        stability::apply(&mut analysis, history, skeleton);

        let aggregate = Aggregator::aggregate(&analysis.indicators, &self.policy)
            .ok_or_else(|| QualityError::NoIndicators(pose.to_string()))?;
        let input_quality = Normalizer::assess(skeleton, &analysis, &self.policy);

        tracing::debug!(
            target: "pose_quality::pipeline",
            pose = pose.as_str(),
            global_score = aggregate.global_score,
            skill_level = aggregate.skill_level.as_str(),
            priority = %aggregate.priority_indicator.name,
            message = "quality analysis complete"
        );

        Ok(QualityAnalysis::Available(QualityReport {
            pose,
            classification_confidence,
            indicators: analysis.indicators,
            feedback: analysis.feedback,
            global_score: aggregate.global_score,
            skill_level: aggregate.skill_level,
            priority_indicator: aggregate.priority_indicator,
            measurements: analysis.measurements,
            input_quality,
        }))
    }
}
