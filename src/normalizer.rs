//! Input validation and quality assessment
//!
//! This module checks detector frames before any geometry is computed and
//! grades how far the resulting indicators can be trusted.
//! - Shape and value errors are hard failures
//! - Occluded landmarks and degenerate geometry only lower confidence
//! - Nothing is repaired, padded or truncated

use crate::aggregator::QualityPolicy;
use crate::error::QualityError;
use crate::postures::PostureAnalysis;
use crate::types::{InputQuality, Landmark, QualityFlag, Skeleton, LANDMARK_COUNT};

/// Validator and quality grader for detector frames
pub struct Normalizer;

impl Normalizer {
    /// Check that a frame has exactly [`LANDMARK_COUNT`] landmarks with finite
    /// coordinates and a visibility within [0, 1]
    pub fn validate_frame(landmarks: &[Landmark]) -> Result<(), QualityError> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(QualityError::LandmarkCount {
                expected: LANDMARK_COUNT,
                found: landmarks.len(),
            });
        }

        for (index, landmark) in landmarks.iter().enumerate() {
            if ![landmark.x, landmark.y, landmark.z].iter().all(|c| c.is_finite()) {
                return Err(QualityError::InvalidLandmark {
                    index,
                    reason: "non-finite coordinate".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&landmark.visibility) {
                return Err(QualityError::InvalidLandmark {
                    index,
                    reason: format!("visibility {} outside [0, 1]", landmark.visibility),
                });
            }
        }

        Ok(())
    }

    /// Check a classifier confidence; NaN and values outside [0, 1] are rejected
    pub fn validate_confidence(confidence: f64) -> Result<f64, QualityError> {
        if (0.0..=1.0).contains(&confidence) {
            Ok(confidence)
        } else {
            Err(QualityError::InvalidConfidence(confidence))
        }
    }

    /// Grade the landmarks an analyzer consumed
    pub fn assess(
        skeleton: &Skeleton,
        analysis: &PostureAnalysis,
        policy: &QualityPolicy,
    ) -> InputQuality {
        let mut consumed = analysis.landmarks_used.clone();
        consumed.sort();

        let mean_visibility = if consumed.is_empty() {
            0.0
        } else {
            consumed
                .iter()
                .map(|&index| skeleton.get(index).visibility)
                .sum::<f64>()
                / consumed.len() as f64
        };

        let low_visibility_landmarks: Vec<_> = consumed
            .into_iter()
            .filter(|&index| skeleton.get(index).visibility < policy.min_visibility)
            .collect();

        let mut flags = Vec::new();
        if !low_visibility_landmarks.is_empty() {
            flags.push(QualityFlag::LowVisibility);
        }

        let mut confidence = mean_visibility;
        if analysis.degenerate_geometry {
            flags.push(QualityFlag::DegenerateGeometry);
            confidence *= 1.0 - policy.degenerate_penalty;
        }

        if !flags.is_empty() {
            let low_visibility: Vec<&str> = low_visibility_landmarks
                .iter()
                .map(|landmark| landmark.name())
                .collect();
            tracing::warn!(
                target: "pose_quality::normalizer",
                flags = ?flags,
                low_visibility = ?low_visibility,
                message = "degraded landmark input"
            );
        }

        InputQuality {
            confidence: round_thousandth(confidence),
            mean_visibility: round_thousandth(mean_visibility),
            low_visibility_landmarks,
            flags,
        }
    }
}

fn round_thousandth(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
