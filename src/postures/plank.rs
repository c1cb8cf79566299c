//! Plank
//!
//! Body held as one straight line from shoulders to ankles, on the toes,
//! shoulders stacked over the wrists.

use super::{Evaluation, PostureAnalysis};
use crate::geometry;
use crate::thresholds::PLANK;
use crate::types::{LandmarkIndex as L, Severity, Skeleton};

pub(super) const INDICATORS: [&str; 4] =
    ["alignment", "core_strength", "symmetry", "shoulder_position"];

pub(super) fn analyze(skeleton: &Skeleton) -> PostureAnalysis {
    let mut eval = Evaluation::new(skeleton);

    let left_shoulder = eval.point(L::LeftShoulder);
    let right_shoulder = eval.point(L::RightShoulder);
    let mid_shoulder = geometry::Point3::midpoint(left_shoulder, right_shoulder);
    let mid_hip = eval.midpoint(L::LeftHip, L::RightHip);
    let mid_knee = eval.midpoint(L::LeftKnee, L::RightKnee);
    let mid_ankle = eval.midpoint(L::LeftAnkle, L::RightAnkle);
    let mid_wrist = eval.midpoint(L::LeftWrist, L::RightWrist);

    // Hips measured against the shoulder-ankle line
    let deviation = eval.line_deviation(mid_shoulder, mid_ankle, mid_hip);
    let alignment = eval.indicator(
        "alignment",
        geometry::linear_score(deviation, PLANK.alignment_scale),
    );
    if alignment >= PLANK.alignment_bands.excellent {
        eval.feedback(
            Severity::Excellent,
            "Perfect alignment! Body in one straight line.",
        );
    } else if alignment >= PLANK.alignment_bands.good {
        eval.feedback(Severity::Good, "Good overall alignment.");
    } else if mid_hip.y < mid_shoulder.y {
        // Image y grows downwards
        eval.feedback(
            Severity::Warning,
            "Hips too high. Engage your core and lower them slightly.",
        );
    } else {
        eval.feedback(
            Severity::Warning,
            "Hips are sagging. Tighten your abdominals!",
        );
    }

    // Knees close to ankle height means they rest on the floor
    let knee_gap = (mid_knee.y - mid_ankle.y).abs();
    if knee_gap < PLANK.modified_knee_gap {
        eval.indicator("core_strength", PLANK.modified_core_ceiling);
        eval.feedback(
            Severity::Tip,
            "Knees on the floor: modified plank, a great start!",
        );
        eval.feedback(
            Severity::Encouragement,
            "To progress, try holding 10 seconds on your toes.",
        );
    } else {
        eval.indicator("core_strength", PLANK.full_core_score);
        eval.feedback(Severity::Excellent, "Full plank! Excellent core strength.");
    }

    let symmetry = eval.symmetry(left_shoulder, right_shoulder, mid_hip);
    let symmetry = eval.indicator("symmetry", symmetry);
    if symmetry < PLANK.symmetry_warning {
        eval.feedback(
            Severity::Warning,
            "Asymmetry detected. Spread your weight evenly.",
        );
    }

    let shoulder_position = eval.indicator(
        "shoulder_position",
        geometry::vertical_alignment(
            &[mid_shoulder, mid_wrist],
            PLANK.shoulder_position_scale,
        ),
    );
    if shoulder_position < PLANK.shoulder_position_tip {
        eval.feedback(
            Severity::Tip,
            "Stack your shoulders directly over your wrists.",
        );
    }

    eval.finish()
}
