//! Core types for the pose quality pipeline
//!
//! This module defines the data that flows through each stage: the landmark
//! frame coming from the detector, the per-posture indicator set and feedback,
//! and the quality report handed to presentation and persistence layers.

use crate::error::QualityError;
use crate::geometry::{round_tenth, Point3};
use crate::normalizer::Normalizer;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of landmarks in every detected frame
pub const LANDMARK_COUNT: usize = 33;

/// A single detected keypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position (normalized, typically 0-1)
    pub x: f64,
    /// Vertical position (normalized, typically 0-1, grows downwards)
    pub y: f64,
    /// Depth estimate relative to the hips
    pub z: f64,
    /// Detection confidence for this point (0-1)
    pub visibility: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Anatomical landmark enumeration. Discriminants are the frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    /// All landmarks in frame order
    pub const ALL: [LandmarkIndex; LANDMARK_COUNT] = [
        LandmarkIndex::Nose,
        LandmarkIndex::LeftEyeInner,
        LandmarkIndex::LeftEye,
        LandmarkIndex::LeftEyeOuter,
        LandmarkIndex::RightEyeInner,
        LandmarkIndex::RightEye,
        LandmarkIndex::RightEyeOuter,
        LandmarkIndex::LeftEar,
        LandmarkIndex::RightEar,
        LandmarkIndex::MouthLeft,
        LandmarkIndex::MouthRight,
        LandmarkIndex::LeftShoulder,
        LandmarkIndex::RightShoulder,
        LandmarkIndex::LeftElbow,
        LandmarkIndex::RightElbow,
        LandmarkIndex::LeftWrist,
        LandmarkIndex::RightWrist,
        LandmarkIndex::LeftPinky,
        LandmarkIndex::RightPinky,
        LandmarkIndex::LeftIndex,
        LandmarkIndex::RightIndex,
        LandmarkIndex::LeftThumb,
        LandmarkIndex::RightThumb,
        LandmarkIndex::LeftHip,
        LandmarkIndex::RightHip,
        LandmarkIndex::LeftKnee,
        LandmarkIndex::RightKnee,
        LandmarkIndex::LeftAnkle,
        LandmarkIndex::RightAnkle,
        LandmarkIndex::LeftHeel,
        LandmarkIndex::RightHeel,
        LandmarkIndex::LeftFootIndex,
        LandmarkIndex::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LandmarkIndex::Nose => "nose",
            LandmarkIndex::LeftEyeInner => "left_eye_inner",
            LandmarkIndex::LeftEye => "left_eye",
            LandmarkIndex::LeftEyeOuter => "left_eye_outer",
            LandmarkIndex::RightEyeInner => "right_eye_inner",
            LandmarkIndex::RightEye => "right_eye",
            LandmarkIndex::RightEyeOuter => "right_eye_outer",
            LandmarkIndex::LeftEar => "left_ear",
            LandmarkIndex::RightEar => "right_ear",
            LandmarkIndex::MouthLeft => "mouth_left",
            LandmarkIndex::MouthRight => "mouth_right",
            LandmarkIndex::LeftShoulder => "left_shoulder",
            LandmarkIndex::RightShoulder => "right_shoulder",
            LandmarkIndex::LeftElbow => "left_elbow",
            LandmarkIndex::RightElbow => "right_elbow",
            LandmarkIndex::LeftWrist => "left_wrist",
            LandmarkIndex::RightWrist => "right_wrist",
            LandmarkIndex::LeftPinky => "left_pinky",
            LandmarkIndex::RightPinky => "right_pinky",
            LandmarkIndex::LeftIndex => "left_index",
            LandmarkIndex::RightIndex => "right_index",
            LandmarkIndex::LeftThumb => "left_thumb",
            LandmarkIndex::RightThumb => "right_thumb",
            LandmarkIndex::LeftHip => "left_hip",
            LandmarkIndex::RightHip => "right_hip",
            LandmarkIndex::LeftKnee => "left_knee",
            LandmarkIndex::RightKnee => "right_knee",
            LandmarkIndex::LeftAnkle => "left_ankle",
            LandmarkIndex::RightAnkle => "right_ankle",
            LandmarkIndex::LeftHeel => "left_heel",
            LandmarkIndex::RightHeel => "right_heel",
            LandmarkIndex::LeftFootIndex => "left_foot_index",
            LandmarkIndex::RightFootIndex => "right_foot_index",
        }
    }
}

/// One validated detector frame: exactly [`LANDMARK_COUNT`] landmarks in
/// anatomical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Skeleton {
    landmarks: Vec<Landmark>,
}

/// Accepted per-landmark encodings in JSON input
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLandmark {
    Object(Landmark),
    Row(Vec<f64>),
}

impl Skeleton {
    /// Validate and wrap a frame. Frames are never padded or truncated.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, QualityError> {
        Normalizer::validate_frame(&landmarks)?;
        Ok(Self { landmarks })
    }

    /// Build a frame from `[x, y, z, visibility]` rows
    pub fn from_rows(rows: &[[f64; 4]]) -> Result<Self, QualityError> {
        Self::new(
            rows.iter()
                .map(|[x, y, z, visibility]| Landmark::new(*x, *y, *z, *visibility))
                .collect(),
        )
    }

    /// Parse a frame from JSON.
    ///
    /// Accepts an array of `{"x", "y", "z", "visibility"}` objects or an
    /// array of `[x, y, z, visibility]` rows.
    pub fn from_json(json: &str) -> Result<Self, QualityError> {
        let raw: Vec<RawLandmark> = serde_json::from_str(json)?;
        let mut landmarks = Vec::with_capacity(raw.len());

        for (index, entry) in raw.into_iter().enumerate() {
            match entry {
                RawLandmark::Object(landmark) => landmarks.push(landmark),
                RawLandmark::Row(row) => match row.as_slice() {
                    [x, y, z, visibility] => {
                        landmarks.push(Landmark::new(*x, *y, *z, *visibility))
                    }
                    _ => {
                        return Err(QualityError::InvalidLandmark {
                            index,
                            reason: format!("expected 4 values per row, found {}", row.len()),
                        })
                    }
                },
            }
        }

        Self::new(landmarks)
    }

    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index.index()]
    }

    pub fn point(&self, index: LandmarkIndex) -> Point3 {
        self.get(index).position()
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}

impl<'de> Deserialize<'de> for Skeleton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let landmarks = Vec::<Landmark>::deserialize(deserializer)?;
        Skeleton::new(landmarks).map_err(de::Error::custom)
    }
}

/// Postures supported by the quality analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pose {
    Downdog,
    Plank,
    Tree,
    Warrior2,
    Goddess,
}

impl Pose {
    pub const ALL: [Pose; 5] = [
        Pose::Downdog,
        Pose::Plank,
        Pose::Tree,
        Pose::Warrior2,
        Pose::Goddess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pose::Downdog => "downdog",
            Pose::Plank => "plank",
            Pose::Tree => "tree",
            Pose::Warrior2 => "warrior2",
            Pose::Goddess => "goddess",
        }
    }
}

impl FromStr for Pose {
    type Err = QualityError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Pose::ALL
            .into_iter()
            .find(|pose| pose.as_str() == name)
            .ok_or_else(|| QualityError::UnknownPose(name.to_string()))
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feedback severity, declared from weakest to strongest intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Encouragement,
    Tip,
    Warning,
    Good,
    Excellent,
}

impl Severity {
    /// Lexical marker that prefixes messages of this severity
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Excellent => "✓✓",
            Severity::Good => "✓",
            Severity::Warning => "⚠️",
            Severity::Tip => "💡",
            Severity::Encouragement => "💪",
        }
    }

    /// Recover the severity of a rendered message from its marker
    pub fn infer(message: &str) -> Option<Severity> {
        Self::split_marker(message).map(|(severity, _)| severity)
    }

    /// Severity and remaining text of a rendered message. The warning sign is
    /// also accepted without its emoji variation selector (U+FE0F).
    fn split_marker(message: &str) -> Option<(Severity, &str)> {
        // "✓✓" must be tried before its own prefix "✓"
        [
            Severity::Excellent,
            Severity::Good,
            Severity::Warning,
            Severity::Tip,
            Severity::Encouragement,
        ]
        .into_iter()
        .find_map(|severity| {
            let rest = message
                .strip_prefix(severity.marker())
                .or_else(|| match severity {
                    Severity::Warning => message.strip_prefix('\u{26A0}'),
                    _ => None,
                })?;
            Some((severity, rest))
        })
    }
}

/// A severity-tagged feedback line. Rendered on the wire as `"<marker> <text>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackMessage {
    pub severity: Severity,
    pub text: String,
}

impl FeedbackMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Parse a rendered message back into severity and text
    pub fn parse(message: &str) -> Option<Self> {
        let (severity, text) = Severity::split_marker(message)?;
        Some(Self::new(severity, text.trim_start()))
    }
}

impl fmt::Display for FeedbackMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.marker(), self.text)
    }
}

impl Serialize for FeedbackMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FeedbackMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let message = String::deserialize(deserializer)?;
        FeedbackMessage::parse(&message).ok_or_else(|| {
            de::Error::custom(format!("feedback without severity marker: {message}"))
        })
    }
}

/// Ordered indicator name → score mapping.
///
/// Scores are clamped to [0, 100] and rounded to one decimal on insertion.
/// Iteration and serialization follow insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    entries: Vec<(String, f64)>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a score, keeping the original position on replace.
    /// Returns the stored score.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) -> f64 {
        let name = name.into();
        let score = if score.is_nan() {
            0.0
        } else {
            round_tenth(score.clamp(0.0, 100.0))
        };

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((name, score)),
        }
        score
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, score)| *score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for IndicatorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IndicatorSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndicatorSetVisitor;

        impl<'de> Visitor<'de> for IndicatorSetVisitor {
            type Value = IndicatorSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of indicator names to scores in [0, 100]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut set = IndicatorSet::new();
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    if !(0.0..=100.0).contains(&score) {
                        return Err(de::Error::custom(format!(
                            "indicator {name} out of range: {score}"
                        )));
                    }
                    set.entries.push((name, score));
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(IndicatorSetVisitor)
    }
}

/// How much work the weakest indicator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementLevel {
    Minor,
    Moderate,
    Major,
}

/// Coarse proficiency label derived from the global score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

/// The weakest indicator of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityIndicator {
    pub name: String,
    pub score: f64,
    pub improvement_needed: ImprovementLevel,
}

/// Input quality issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// A consumed landmark was detected below the visibility floor
    LowVisibility,
    /// An angle was measured on a zero-length limb segment
    DegenerateGeometry,
}

/// Confidence annotation describing the landmarks behind a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputQuality {
    /// Overall trust in the indicators (0-1)
    pub confidence: f64,
    /// Mean visibility of the landmarks the posture consumed (0-1)
    pub mean_visibility: f64,
    /// Consumed landmarks below the visibility floor, in frame order
    pub low_visibility_landmarks: Vec<LandmarkIndex>,
    pub flags: Vec<QualityFlag>,
}

/// Full execution-quality assessment of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub pose: Pose,
    /// Upstream classifier confidence that admitted this report
    pub classification_confidence: f64,
    pub indicators: IndicatorSet,
    pub feedback: Vec<FeedbackMessage>,
    /// Mean of the indicators, one decimal
    pub global_score: f64,
    pub skill_level: SkillLevel,
    pub priority_indicator: PriorityIndicator,
    /// Raw measurements shown alongside indicators (degrees, ratios)
    pub measurements: BTreeMap<String, f64>,
    pub input_quality: InputQuality,
}

/// Outcome of a quality analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QualityAnalysis {
    /// Classification was trusted; the report is complete
    Available(QualityReport),
    /// Classification confidence fell below the gating threshold
    Unavailable {
        pose: Pose,
        classification_confidence: f64,
        gating_threshold: f64,
        reason: String,
    },
}

impl QualityAnalysis {
    pub fn is_available(&self) -> bool {
        matches!(self, QualityAnalysis::Available(_))
    }

    pub fn report(&self) -> Option<&QualityReport> {
        match self {
            QualityAnalysis::Available(report) => Some(report),
            QualityAnalysis::Unavailable { .. } => None,
        }
    }

    pub fn pose(&self) -> Pose {
        match self {
            QualityAnalysis::Available(report) => report.pose,
            QualityAnalysis::Unavailable { pose, .. } => *pose,
        }
    }
}
