//! Goddess pose
//!
//! Wide stance squat: feet well beyond hip width, knees bent near 90° and
//! tracking over the ankles, torso upright, weight even on both legs.

use super::{Evaluation, PostureAnalysis};
use crate::geometry::{self, EPSILON};
use crate::thresholds::GODDESS;
use crate::types::{LandmarkIndex as L, Severity, Skeleton};

pub(super) const INDICATORS: [&str; 5] = [
    "stance_width",
    "squat_depth",
    "knee_alignment",
    "back_position",
    "symmetry",
];

pub(super) fn analyze(skeleton: &Skeleton) -> PostureAnalysis {
    let mut eval = Evaluation::new(skeleton);

    let nose = eval.point(L::Nose);
    let left_hip = eval.point(L::LeftHip);
    let right_hip = eval.point(L::RightHip);
    let left_knee = eval.point(L::LeftKnee);
    let right_knee = eval.point(L::RightKnee);
    let left_ankle = eval.point(L::LeftAnkle);
    let right_ankle = eval.point(L::RightAnkle);
    let mid_hip = geometry::Point3::midpoint(left_hip, right_hip);

    let stance_ratio = geometry::distance(left_ankle, right_ankle)
        / (geometry::distance(left_hip, right_hip) + EPSILON);
    eval.measurement("stance_ratio", stance_ratio);
    let scores = GODDESS.stance_scores;
    if stance_ratio >= GODDESS.stance_wide {
        eval.indicator("stance_width", scores.top);
        eval.feedback(Severity::Excellent, "Perfect stance width!");
    } else if stance_ratio >= GODDESS.stance_fair {
        eval.indicator("stance_width", scores.middle);
        eval.feedback(
            Severity::Good,
            "Good stance, you can widen it a little more.",
        );
    } else {
        eval.indicator("stance_width", scores.bottom);
        eval.feedback(
            Severity::Tip,
            "Step your feet wider apart, beyond shoulder width.",
        );
    }

    let knee_angle = (eval.angle_2d(left_hip, left_knee, left_ankle)
        + eval.angle_2d(right_hip, right_knee, right_ankle))
        / 2.0;
    eval.measurement("knee_angle", knee_angle);
    eval.indicator(
        "squat_depth",
        geometry::linear_score(
            GODDESS.knee_ideal_angle - knee_angle,
            GODDESS.squat_depth_scale,
        ),
    );
    if GODDESS.squat_on_target.contains(knee_angle) {
        eval.feedback(Severity::Excellent, "Perfect squat depth!");
    } else if knee_angle > GODDESS.squat_shallow {
        eval.feedback(
            Severity::Encouragement,
            "Sink lower! Aim for thighs parallel to the floor.",
        );
    } else {
        eval.feedback(Severity::Good, "Good squat depth.");
    }

    let knee_drift =
        ((left_knee.x - left_ankle.x).abs() + (right_knee.x - right_ankle.x).abs()) / 2.0;
    let knee_alignment = eval.indicator(
        "knee_alignment",
        geometry::linear_score(knee_drift, GODDESS.knee_alignment_scale),
    );
    if knee_alignment < GODDESS.knee_alignment_warning {
        eval.feedback(
            Severity::Warning,
            "Knees collapsing inward. Press them out over your feet.",
        );
    } else {
        eval.feedback(Severity::Good, "Knees well positioned.");
    }

    let back_position = eval.indicator(
        "back_position",
        geometry::vertical_alignment(&[nose, mid_hip], GODDESS.back_scale),
    );
    if back_position >= GODDESS.back_bands.excellent {
        eval.feedback(Severity::Excellent, "Back nice and straight!");
    } else if back_position >= GODDESS.back_bands.good {
        eval.feedback(Severity::Good, "Back fairly straight, well done.");
    } else {
        eval.feedback(Severity::Tip, "Lift your torso upright and open the chest.");
    }

    let symmetry = eval.symmetry(left_knee, right_knee, mid_hip);
    let symmetry = eval.indicator("symmetry", symmetry);
    if symmetry < GODDESS.symmetry_warning {
        eval.feedback(
            Severity::Warning,
            "Asymmetry detected. Balance your weight on both legs.",
        );
    }

    eval.finish()
}
