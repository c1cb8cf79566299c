//! Downward-facing dog
//!
//! Arms, back and legs form an inverted V: hips high, arms and legs straight,
//! hands evenly placed, head hanging between the arms.

use super::{Evaluation, PostureAnalysis};
use crate::geometry;
use crate::thresholds::DOWNDOG;
use crate::types::{LandmarkIndex as L, Severity, Skeleton};

pub(super) const INDICATORS: [&str; 5] = [
    "alignment",
    "shoulder_opening",
    "leg_extension",
    "symmetry",
    "head_position",
];

pub(super) fn analyze(skeleton: &Skeleton) -> PostureAnalysis {
    let mut eval = Evaluation::new(skeleton);

    let nose = eval.point(L::Nose);
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

    let mid_shoulder = geometry::Point3::midpoint(left_shoulder, right_shoulder);
    let mid_hip = geometry::Point3::midpoint(left_hip, right_hip);
    let mid_ankle = geometry::Point3::midpoint(left_ankle, right_ankle);

    let hip_angle = eval.angle_3d(mid_shoulder, mid_hip, mid_ankle);
    eval.measurement("hip_angle", hip_angle);
    let scores = DOWNDOG.alignment_scores;
    if DOWNDOG.hip_angle_ideal.contains(hip_angle) {
        eval.indicator("alignment", scores.top);
        eval.feedback(Severity::Excellent, "Excellent alignment of back and legs.");
    } else if DOWNDOG.hip_angle_acceptable.contains(hip_angle) {
        eval.indicator("alignment", scores.middle);
        eval.feedback(Severity::Good, "Good overall alignment, keep going.");
    } else {
        eval.indicator("alignment", scores.bottom);
        if hip_angle < DOWNDOG.hip_angle_acceptable.min {
            eval.feedback(
                Severity::Warning,
                "Hips too low. Push them further up and back.",
            );
        } else {
            eval.feedback(Severity::Warning, "Hips too high or back too rounded.");
        }
    }

    let elbow_angle = (eval.angle_3d(left_shoulder, left_elbow, left_wrist)
        + eval.angle_3d(right_shoulder, right_elbow, right_wrist))
        / 2.0;
    let scores = DOWNDOG.shoulder_opening_scores;
    if elbow_angle >= DOWNDOG.arm_straight {
        eval.indicator("shoulder_opening", scores.top);
        eval.feedback(Severity::Excellent, "Arms straight, shoulders open.");
    } else if elbow_angle >= DOWNDOG.arm_nearly_straight {
        eval.indicator("shoulder_opening", scores.middle);
        eval.feedback(
            Severity::Good,
            "Arms almost straight. Press a little more through your hands.",
        );
    } else {
        eval.indicator("shoulder_opening", scores.bottom);
        eval.feedback(
            Severity::Warning,
            "Elbows are bent. Straighten them and push the floor away.",
        );
    }

    let knee_angle = (eval.angle_3d(left_hip, left_knee, left_ankle)
        + eval.angle_3d(right_hip, right_knee, right_ankle))
        / 2.0;
    let scores = DOWNDOG.leg_extension_scores;
    if knee_angle >= DOWNDOG.leg_straight {
        eval.indicator("leg_extension", scores.top);
        eval.feedback(Severity::Excellent, "Legs fully extended.");
    } else if knee_angle >= DOWNDOG.leg_nearly_straight {
        eval.indicator("leg_extension", scores.middle);
        eval.feedback(
            Severity::Good,
            "Legs almost straight. That is already very good!",
        );
    } else {
        eval.indicator("leg_extension", scores.bottom);
        eval.feedback(
            Severity::Tip,
            "Bent knees are normal at first. Focus on a long back before straight legs.",
        );
    }

    let symmetry = eval.symmetry(left_wrist, right_wrist, mid_shoulder);
    let symmetry = eval.indicator("symmetry", symmetry);
    if symmetry < DOWNDOG.symmetry_warning {
        eval.feedback(
            Severity::Warning,
            "Asymmetry detected. Place your hands at equal distance.",
        );
    }

    let head_position = eval.indicator(
        "head_position",
        geometry::linear_score(nose.y - mid_shoulder.y, DOWNDOG.head_position_scale),
    );
    if head_position < DOWNDOG.head_position_tip {
        eval.feedback(
            Severity::Tip,
            "Relax your neck and let the head hang naturally.",
        );
    }

    eval.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SkeletonBuilder;

    #[test]
    fn test_clean_inverted_v() {
        let analysis = analyze(&SkeletonBuilder::downdog().build());

        assert_eq!(analysis.indicators.get("alignment"), Some(100.0));
        assert_eq!(analysis.indicators.get("shoulder_opening"), Some(100.0));
        assert_eq!(analysis.indicators.get("leg_extension"), Some(100.0));
        assert_eq!(analysis.indicators.get("symmetry"), Some(100.0));
        assert!(analysis.indicators.get("head_position").unwrap() > 90.0);

        let hip_angle = analysis.measurements["hip_angle"];
        assert!(DOWNDOG.hip_angle_ideal.contains(hip_angle), "{hip_angle}");
        assert!(!analysis.degenerate_geometry);
    }

    fn with_hips(x: f64, y: f64) -> PostureAnalysis {
        let skeleton = SkeletonBuilder::downdog()
            .at(L::LeftHip, x, y)
            .at(L::RightHip, x, y)
            .build();
        analyze(&skeleton)
    }

    #[test]
    fn test_closed_hip_angle_means_hips_too_low() {
        // About 77° between trunk and legs
        let analysis = with_hips(0.45, 0.1);

        assert!(
            analysis.measurements["hip_angle"] < DOWNDOG.hip_angle_acceptable.min
        );
        assert_eq!(
            analysis.indicators.get("alignment"),
            Some(DOWNDOG.alignment_scores.bottom)
        );
        assert!(analysis
            .feedback
            .iter()
            .any(|m| m.severity == Severity::Warning && m.text.contains("too low")));
    }

    #[test]
    fn test_flattened_v_means_hips_too_high_or_rounded_back() {
        // About 150°, the body close to a plank line
        let analysis = with_hips(0.43, 0.45);

        assert!(
            analysis.measurements["hip_angle"] > DOWNDOG.hip_angle_acceptable.max
        );
        assert_eq!(
            analysis.indicators.get("alignment"),
            Some(DOWNDOG.alignment_scores.bottom)
        );
        assert!(analysis
            .feedback
            .iter()
            .any(|m| m.severity == Severity::Warning && m.text.contains("too high")));
    }

    #[test]
    fn test_open_hip_angle_is_acceptable() {
        // About 122°: past the ideal range, inside the acceptable one
        let analysis = with_hips(0.47, 0.35);

        assert_eq!(
            analysis.indicators.get("alignment"),
            Some(DOWNDOG.alignment_scores.middle)
        );
        assert!(analysis
            .feedback
            .iter()
            .any(|m| m.severity == Severity::Good && m.text.contains("Good overall alignment")));
    }

    #[test]
    fn test_bent_knees_get_a_tip_not_a_warning() {
        let skeleton = SkeletonBuilder::downdog()
            .at(L::LeftKnee, 0.5, 0.6)
            .at(L::RightKnee, 0.5, 0.6)
            .build();
        let analysis = analyze(&skeleton);

        assert_eq!(
            analysis.indicators.get("leg_extension"),
            Some(DOWNDOG.leg_extension_scores.bottom)
        );
        assert!(analysis
            .feedback
            .iter()
            .any(|m| m.severity == Severity::Tip && m.text.contains("Bent knees")));
    }

    #[test]
    fn test_hanging_head() {
        let skeleton = SkeletonBuilder::downdog().at(L::Nose, 0.15, 0.6).build();
        let analysis = analyze(&skeleton);

        let head_position = analysis.indicators.get("head_position").unwrap();
        assert!(head_position < DOWNDOG.head_position_tip);
        assert!(analysis
            .feedback
            .iter()
            .any(|m| m.severity == Severity::Tip && m.text.contains("neck")));
    }
}
