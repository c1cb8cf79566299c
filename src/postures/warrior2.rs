//! Warrior II
//!
//! Arms extended level to the sides, front knee bent to a right angle and
//! stacked over its ankle, hips opened sideways, shoulders level.

use super::{Evaluation, PostureAnalysis};
use crate::geometry;
use crate::thresholds::WARRIOR2;
use crate::types::{LandmarkIndex as L, Severity, Skeleton};

pub(super) const INDICATORS: [&str; 5] = [
    "arms_alignment",
    "knee_flexion_quality",
    "knee_ankle_alignment",
    "hip_opening",
    "shoulder_level",
];

pub(super) fn analyze(skeleton: &Skeleton) -> PostureAnalysis {
    let mut eval = Evaluation::new(skeleton);

    let left_shoulder = eval.point(L::LeftShoulder);
    let right_shoulder = eval.point(L::RightShoulder);
    let left_elbow = eval.point(L::LeftElbow);
    let right_elbow = eval.point(L::RightElbow);
    let left_wrist = eval.point(L::LeftWrist);
    let right_wrist = eval.point(L::RightWrist);
    let left_hip = eval.point(L::LeftHip);
    let right_hip = eval.point(L::RightHip);
    let left_knee = eval.point(L::LeftKnee);
    let right_knee = eval.point(L::RightKnee);
    let left_ankle = eval.point(L::LeftAnkle);
    let right_ankle = eval.point(L::RightAnkle);

    // Knee flexion is read in the image plane; depth estimates on a bent
    // front knee are too noisy to trust.
    let left_knee_angle = eval.angle_2d(left_hip, left_knee, left_ankle);
    let right_knee_angle = eval.angle_2d(right_hip, right_knee, right_ankle);
    let (front_knee_angle, front_knee, front_ankle) = if left_knee_angle < right_knee_angle {
        (left_knee_angle, left_knee, left_ankle)
    } else {
        (right_knee_angle, right_knee, right_ankle)
    };
    eval.measurement("front_knee_angle", front_knee_angle);

    let arms_alignment = eval.indicator(
        "arms_alignment",
        geometry::horizontal_alignment(&[left_wrist, right_wrist], WARRIOR2.arms_scale),
    );
    let arm_extension = (eval.angle_3d(left_shoulder, left_elbow, left_wrist)
        + eval.angle_3d(right_shoulder, right_elbow, right_wrist))
        / 2.0;
    if arms_alignment >= WARRIOR2.arms_bands.excellent && arm_extension >= WARRIOR2.arm_straight {
        eval.feedback(Severity::Excellent, "Arms perfectly level and extended!");
    } else if arms_alignment >= WARRIOR2.arms_bands.good {
        eval.feedback(Severity::Good, "Arms well extended to the sides.");
    } else {
        eval.feedback(
            Severity::Warning,
            "Bring your arms level, stretched out to the sides.",
        );
    }

    eval.indicator(
        "knee_flexion_quality",
        geometry::linear_score(
            WARRIOR2.knee_ideal_angle - front_knee_angle,
            WARRIOR2.knee_flexion_scale,
        ),
    );
    if WARRIOR2.knee_on_target.contains(front_knee_angle) {
        eval.feedback(Severity::Excellent, "Front knee bent to a perfect 90°!");
    } else if front_knee_angle < WARRIOR2.knee_deep_floor {
        eval.feedback(
            Severity::Warning,
            "Front knee bent too far, rise up slightly.",
        );
    } else if front_knee_angle < WARRIOR2.knee_on_target.min {
        eval.feedback(
            Severity::Encouragement,
            "Deep knee bend! Ease up a touch toward 90°.",
        );
    } else {
        eval.feedback(Severity::Tip, "Bend the front knee further (target: 90°).");
    }

    let knee_ankle_alignment = eval.indicator(
        "knee_ankle_alignment",
        geometry::vertical_alignment(
            &[front_knee, front_ankle],
            WARRIOR2.knee_ankle_scale,
        ),
    );
    if knee_ankle_alignment < WARRIOR2.knee_ankle_warning {
        eval.feedback(
            Severity::Warning,
            "Knee drifts past the ankle. Widen your stance.",
        );
    }

    let hip_opening = eval.indicator(
        "hip_opening",
        (left_hip.x - right_hip.x).abs() * WARRIOR2.hip_opening_scale,
    );
    if hip_opening < WARRIOR2.hip_opening_tip {
        eval.feedback(Severity::Tip, "Open your hips further to the side.");
    } else if hip_opening >= WARRIOR2.hip_opening_excellent {
        eval.feedback(Severity::Excellent, "Excellent hip opening!");
    }

    let shoulder_level = eval.indicator(
        "shoulder_level",
        geometry::horizontal_alignment(
            &[left_shoulder, right_shoulder],
            WARRIOR2.shoulder_level_scale,
        ),
    );
    if shoulder_level < WARRIOR2.shoulder_level_warning {
        eval.feedback(Severity::Warning, "Keep your shoulders level.");
    }

    eval.finish()
}
