//! Tree pose
//!
//! Balance on one leg, body stacked vertically over the standing foot, the
//! raised foot high on the inner thigh and the raised knee opened sideways.

use super::{Evaluation, PostureAnalysis};
use crate::geometry;
use crate::thresholds::TREE;
use crate::types::{LandmarkIndex as L, Severity, Skeleton};

pub(super) const INDICATORS: [&str; 4] =
    ["alignment", "foot_height", "hip_opening", "shoulder_level"];

pub(super) fn analyze(skeleton: &Skeleton) -> PostureAnalysis {
    let mut eval = Evaluation::new(skeleton);

    let nose = eval.point(L::Nose);
    let left_shoulder = eval.point(L::LeftShoulder);
    let right_shoulder = eval.point(L::RightShoulder);
    let left_hip = eval.point(L::LeftHip);
    let right_hip = eval.point(L::RightHip);
    let left_knee = eval.point(L::LeftKnee);
    let right_knee = eval.point(L::RightKnee);
    let left_ankle = eval.point(L::LeftAnkle);
    let right_ankle = eval.point(L::RightAnkle);
    let mid_hip = geometry::Point3::midpoint(left_hip, right_hip);

    // The raised leg is the one whose knee swings further out from its hip
    let left_spread = (left_knee.x - left_hip.x).abs();
    let right_spread = (right_knee.x - right_hip.x).abs();
    let (raised_knee, raised_ankle, standing_hip, standing_ankle) = if left_spread > right_spread {
        (left_knee, left_ankle, right_hip, right_ankle)
    } else {
        (right_knee, right_ankle, left_hip, left_ankle)
    };

    // Stacking is meaningless when the trunk or the standing leg has no length
    eval.segment(nose, mid_hip);
    eval.segment(standing_hip, standing_ankle);

    let head_over_hips = geometry::vertical_alignment(&[nose, mid_hip], TREE.alignment_scale);
    let hip_over_foot =
        geometry::vertical_alignment(&[standing_hip, standing_ankle], TREE.alignment_scale);
    let alignment = eval.indicator("alignment", (head_over_hips + hip_over_foot) / 2.0);
    if alignment >= TREE.alignment_bands.excellent {
        eval.feedback(
            Severity::Excellent,
            "Excellent vertical alignment! Perfect balance.",
        );
    } else if alignment >= TREE.alignment_bands.good {
        eval.feedback(Severity::Good, "Good balance, body almost aligned.");
    } else {
        eval.feedback(
            Severity::Warning,
            "Body off balance. Fix your gaze on one point and engage your core.",
        );
    }

    let foot_gap = (raised_ankle.y - standing_hip.y).abs();
    let scores = TREE.foot_height_scores;
    if foot_gap < TREE.foot_on_thigh {
        eval.indicator("foot_height", scores.top);
        eval.feedback(Severity::Excellent, "Foot well placed high on the thigh.");
    } else if foot_gap < TREE.foot_on_calf {
        eval.indicator("foot_height", scores.middle);
        eval.feedback(
            Severity::Good,
            "Foot on the calf, that is already very good!",
        );
    } else {
        eval.indicator("foot_height", scores.bottom);
        eval.feedback(
            Severity::Tip,
            "Foot near the floor: try raising it progressively.",
        );
    }

    let hip_opening = eval.indicator(
        "hip_opening",
        (raised_knee.x - standing_hip.x).abs() * TREE.hip_opening_scale,
    );
    if hip_opening < TREE.hip_opening_tip {
        eval.feedback(Severity::Tip, "Open the hip further for more stability.");
    } else if hip_opening >= TREE.hip_opening_excellent {
        eval.feedback(Severity::Excellent, "Excellent hip opening!");
    }

    let shoulder_level = eval.indicator(
        "shoulder_level",
        geometry::horizontal_alignment(
            &[left_shoulder, right_shoulder],
            TREE.shoulder_level_scale,
        ),
    );
    if shoulder_level < TREE.shoulder_level_warning {
        eval.feedback(
            Severity::Warning,
            "Shoulders uneven. Keep them at the same height.",
        );
    }

    eval.finish()
}
