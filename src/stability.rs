//! Temporal stability
//!
//! Scores how still the trunk stays across a short run of frames of the same
//! posture. Only the nose, shoulders and hips are tracked; limbs are expected
//! to move while settling into a pose.

use crate::geometry;
use crate::postures::PostureAnalysis;
use crate::thresholds::STABILITY;
use crate::types::{FeedbackMessage, LandmarkIndex, Severity, Skeleton};

/// Indicator key appended after the posture's own indicators
pub const STABILITY_INDICATOR: &str = "stability";

const KEY_LANDMARKS: [LandmarkIndex; 5] = [
    LandmarkIndex::Nose,
    LandmarkIndex::LeftShoulder,
    LandmarkIndex::RightShoulder,
    LandmarkIndex::LeftHip,
    LandmarkIndex::RightHip,
];

/// Mean 2-D displacement of the key landmarks between consecutive frames.
///
/// Returns `None` for fewer than two frames.
pub fn mean_movement(frames: &[&Skeleton]) -> Option<f64> {
    if frames.len() < 2 {
        return None;
    }

    let mut total = 0.0;
    let mut comparisons = 0usize;
    for pair in frames.windows(2) {
        for landmark in KEY_LANDMARKS {
            total += geometry::distance(pair[0].point(landmark), pair[1].point(landmark));
            comparisons += 1;
        }
    }
    Some(total / comparisons as f64)
}

/// Stability score (0-100) of a frame sequence; a single frame is fully stable
pub fn stability_score(frames: &[&Skeleton]) -> f64 {
    mean_movement(frames)
        .map(|movement| geometry::linear_score(movement, STABILITY.movement_scale))
        .unwrap_or(100.0)
}

/// Append the stability indicator and its feedback for `history` followed by
/// `current`. Nothing is appended when the history is empty.
pub(crate) fn apply(analysis: &mut PostureAnalysis, history: &[Skeleton], current: &Skeleton) {
    if history.is_empty() {
        return;
    }

    let frames: Vec<&Skeleton> = history.iter().chain(std::iter::once(current)).collect();
    let score = analysis
        .indicators
        .insert(STABILITY_INDICATOR, stability_score(&frames));

    let message = if score < STABILITY.bands.good {
        FeedbackMessage::new(
            Severity::Warning,
            "Unstable pose. Breathe steadily and fix your gaze.",
        )
    } else if score < STABILITY.bands.excellent {
        FeedbackMessage::new(Severity::Good, "Fairly stable, keep holding.")
    } else {
        FeedbackMessage::new(Severity::Excellent, "Rock solid! Excellent stability.")
    };
    analysis.feedback.push(message);

    for landmark in KEY_LANDMARKS {
        if !analysis.landmarks_used.contains(&landmark) {
            analysis.landmarks_used.push(landmark);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postures;
    use crate::testing::SkeletonBuilder;
    use crate::types::Pose;

    #[test]
    fn test_still_frames_are_fully_stable() {
        let frame = SkeletonBuilder::tree().build();
        assert_eq!(mean_movement(&[&frame, &frame, &frame]), Some(0.0));
        assert_eq!(stability_score(&[&frame, &frame]), 100.0);
    }

    #[test]
    fn test_single_frame_has_no_movement() {
        let frame = SkeletonBuilder::tree().build();
        assert_eq!(mean_movement(&[&frame]), None);
        assert_eq!(stability_score(&[&frame]), 100.0);
    }

    #[test]
    fn test_drift_lowers_the_score() {
        let first = SkeletonBuilder::tree().build();
        let second = SkeletonBuilder::tree().shifted(0.1, 0.0).build();

        let movement = mean_movement(&[&first, &second]).unwrap();
        assert!((movement - 0.1).abs() < 1e-9);
        assert!((stability_score(&[&first, &second]) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_appends_after_posture_indicators() {
        let current = SkeletonBuilder::tree().build();
        let history = vec![SkeletonBuilder::tree().shifted(0.1, 0.0).build()];
        let mut analysis = postures::analyze(Pose::Tree, &current);
        let feedback_before = analysis.feedback.len();

        apply(&mut analysis, &history, &current);

        let names: Vec<&str> = analysis.indicators.names().collect();
        assert_eq!(names.last(), Some(&STABILITY_INDICATOR));
        assert_eq!(names.len(), postures::indicator_names(Pose::Tree).len() + 1);
        assert_eq!(analysis.indicators.get(STABILITY_INDICATOR), Some(50.0));
        assert_eq!(analysis.feedback.len(), feedback_before + 1);
        assert_eq!(
            analysis.feedback.last().unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn test_apply_without_history_is_a_no_op() {
        let current = SkeletonBuilder::plank().build();
        let mut analysis = postures::analyze(Pose::Plank, &current);
        let before = analysis.clone();

        apply(&mut analysis, &[], &current);

        assert_eq!(analysis, before);
    }
}
