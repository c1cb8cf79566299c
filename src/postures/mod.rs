//! Posture analyzers
//!
//! One evaluator per supported posture. Each selects the landmarks relevant
//! to its biomechanics, computes a fixed, ordered set of indicators with the
//! geometry kernel, and turns indicator scores into feedback using the bands
//! declared in [`crate::thresholds`]. Aggregation is not done here.

mod downdog;
mod goddess;
mod plank;
mod tree;
mod warrior2;

use crate::geometry::{self, Point3};
use crate::types::{FeedbackMessage, IndicatorSet, LandmarkIndex, Pose, Severity, Skeleton};
use std::collections::BTreeMap;

/// Output of a single posture analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct PostureAnalysis {
    pub indicators: IndicatorSet,
    pub feedback: Vec<FeedbackMessage>,
    pub measurements: BTreeMap<String, f64>,
    /// Landmarks the analyzer read, in first-use order
    pub landmarks_used: Vec<LandmarkIndex>,
    /// Whether any measurement was taken on a zero-length segment
    pub degenerate_geometry: bool,
}

/// Evaluate `skeleton` as an instance of `pose`
pub fn analyze(pose: Pose, skeleton: &Skeleton) -> PostureAnalysis {
    match pose {
        Pose::Downdog => downdog::analyze(skeleton),
        Pose::Plank => plank::analyze(skeleton),
        Pose::Tree => tree::analyze(skeleton),
        Pose::Warrior2 => warrior2::analyze(skeleton),
        Pose::Goddess => goddess::analyze(skeleton),
    }
}

/// Indicator keys a posture declares, in declaration order
pub fn indicator_names(pose: Pose) -> &'static [&'static str] {
    match pose {
        Pose::Downdog => &downdog::INDICATORS,
        Pose::Plank => &plank::INDICATORS,
        Pose::Tree => &tree::INDICATORS,
        Pose::Warrior2 => &warrior2::INDICATORS,
        Pose::Goddess => &goddess::INDICATORS,
    }
}

/// Working state of one analyzer run.
///
/// Landmark reads and angle measurements go through here so the report
/// builder can later tell which joints the indicators depend on and whether
/// any of them were measured on degenerate geometry.
pub(crate) struct Evaluation<'a> {
    skeleton: &'a Skeleton,
    analysis: PostureAnalysis,
}

impl<'a> Evaluation<'a> {
    pub(crate) fn new(skeleton: &'a Skeleton) -> Self {
        Self {
            skeleton,
            analysis: PostureAnalysis {
                indicators: IndicatorSet::new(),
                feedback: Vec::new(),
                measurements: BTreeMap::new(),
                landmarks_used: Vec::new(),
                degenerate_geometry: false,
            },
        }
    }

    pub(crate) fn point(&mut self, index: LandmarkIndex) -> Point3 {
        if !self.analysis.landmarks_used.contains(&index) {
            self.analysis.landmarks_used.push(index);
        }
        self.skeleton.point(index)
    }

    /// Midpoint of a left/right landmark pair
    pub(crate) fn midpoint(&mut self, left: LandmarkIndex, right: LandmarkIndex) -> Point3 {
        let left = self.point(left);
        let right = self.point(right);
        Point3::midpoint(left, right)
    }

    pub(crate) fn angle_3d(&mut self, a: Point3, vertex: Point3, c: Point3) -> f64 {
        let angle = geometry::try_angle_3d(a, vertex, c);
        self.checked(angle, 0.0)
    }

    pub(crate) fn angle_2d(&mut self, a: Point3, vertex: Point3, c: Point3) -> f64 {
        let angle = geometry::try_angle_2d(a, vertex, c);
        self.checked(angle, 0.0)
    }

    pub(crate) fn symmetry(&mut self, left: Point3, right: Point3, reference: Point3) -> f64 {
        let score = geometry::try_symmetry(left, right, reference);
        self.checked(score, 100.0)
    }

    pub(crate) fn line_deviation(&mut self, start: Point3, end: Point3, point: Point3) -> f64 {
        let deviation = geometry::try_line_deviation(start, end, point);
        self.checked(deviation, geometry::distance(point, start))
    }

    /// x,y length of a body segment; a zero-length segment marks the frame degenerate
    pub(crate) fn segment(&mut self, a: Point3, b: Point3) -> f64 {
        let length = geometry::distance(a, b);
        if length < geometry::EPSILON {
            self.analysis.degenerate_geometry = true;
        }
        length
    }

    fn checked(&mut self, value: Option<f64>, fallback: f64) -> f64 {
        value.unwrap_or_else(|| {
            self.analysis.degenerate_geometry = true;
            fallback
        })
    }

    /// Record an indicator; returns the clamped, rounded score as stored
    pub(crate) fn indicator(&mut self, name: &str, score: f64) -> f64 {
        self.analysis.indicators.insert(name, score)
    }

    pub(crate) fn measurement(&mut self, name: &str, value: f64) {
        self.analysis
            .measurements
            .insert(name.to_string(), geometry::round_tenth(value));
    }

    pub(crate) fn feedback(&mut self, severity: Severity, text: &str) {
        self.analysis
            .feedback
            .push(FeedbackMessage::new(severity, text));
    }

    pub(crate) fn finish(self) -> PostureAnalysis {
        self.analysis
    }
}
