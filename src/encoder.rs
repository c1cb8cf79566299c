//! Report encoding
//!
//! This module encodes quality analyses into the JSON shape consumed by the
//! history, statistics and charting layers. The report fields are flattened
//! at the top level next to a `status` tag and the producer metadata; field
//! names and indicator order are part of that contract.

use crate::error::QualityError;
use crate::types::QualityAnalysis;
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Producer {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    analysis: &'a QualityAnalysis,
    producer: Producer,
}

/// JSON encoder for [`QualityAnalysis`] values
#[derive(Debug, Clone, Copy)]
pub struct ReportEncoder {
    pretty: bool,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Encoder producing indented JSON
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Encoder producing single-line JSON, for storage and transport
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Encode to JSON string
    pub fn encode_to_json(&self, analysis: &QualityAnalysis) -> Result<String, QualityError> {
        let envelope = Envelope {
            analysis,
            producer: Producer {
                name: PRODUCER_NAME,
                version: ENGINE_VERSION,
            },
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&envelope)?
        } else {
            serde_json::to_string(&envelope)?
        };
        Ok(json)
    }

    /// Decode a previously encoded analysis; producer metadata is ignored
    pub fn decode(json: &str) -> Result<QualityAnalysis, QualityError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FeedbackMessage, ImprovementLevel, IndicatorSet, InputQuality, LandmarkIndex, Pose,
        PriorityIndicator, QualityFlag, QualityReport, Severity, SkillLevel,
    };
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn make_test_report() -> QualityReport {
        let mut indicators = IndicatorSet::new();
        indicators.insert("alignment", 100.0);
        indicators.insert("core_strength", 40.0);
        indicators.insert("symmetry", 100.0);
        indicators.insert("shoulder_position", 100.0);

        QualityReport {
            pose: Pose::Plank,
            classification_confidence: 0.94,
            indicators,
            feedback: vec![
                FeedbackMessage::new(
                    Severity::Excellent,
                    "Perfect alignment! Body in one straight line.",
                ),
                FeedbackMessage::new(
                    Severity::Tip,
                    "Knees on the floor: modified plank, a great start!",
                ),
                FeedbackMessage::new(
                    Severity::Encouragement,
                    "To progress, try holding 10 seconds on your toes.",
                ),
            ],
            global_score: 85.0,
            skill_level: SkillLevel::Advanced,
            priority_indicator: PriorityIndicator {
                name: "core_strength".to_string(),
                score: 40.0,
                improvement_needed: ImprovementLevel::Major,
            },
            measurements: BTreeMap::new(),
            input_quality: InputQuality {
                confidence: 0.9,
                mean_visibility: 0.9,
                low_visibility_landmarks: vec![LandmarkIndex::LeftWrist],
                flags: vec![QualityFlag::LowVisibility],
            },
        }
    }

    #[test]
    fn test_available_wire_shape() {
        let analysis = QualityAnalysis::Available(make_test_report());
        let json = ReportEncoder::new().encode_to_json(&analysis).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["status"], "available");
        assert_eq!(parsed["pose"], "plank");
        assert_eq!(parsed["global_score"], 85.0);
        assert_eq!(parsed["skill_level"], "advanced");
        assert_eq!(parsed["indicators"]["core_strength"], 40.0);
        assert_eq!(parsed["priority_indicator"]["name"], "core_strength");
        assert_eq!(parsed["priority_indicator"]["improvement_needed"], "major");
        assert_eq!(
            parsed["feedback"][1],
            "💡 Knees on the floor: modified plank, a great start!"
        );
        assert_eq!(
            parsed["input_quality"]["low_visibility_landmarks"][0],
            "left_wrist"
        );
        assert_eq!(parsed["input_quality"]["flags"][0], "low_visibility");
        assert_eq!(parsed["producer"]["name"], PRODUCER_NAME);
        assert_eq!(parsed["producer"]["version"], ENGINE_VERSION);
    }

    #[test]
    fn test_indicator_order_is_declaration_order() {
        let analysis = QualityAnalysis::Available(make_test_report());
        let json = ReportEncoder::compact().encode_to_json(&analysis).unwrap();

        let positions: Vec<usize> = ["alignment", "core_strength", "symmetry", "shoulder_position"]
            .iter()
            .map(|name| json.find(&format!("\"{name}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_unavailable_wire_shape() {
        let analysis = QualityAnalysis::Unavailable {
            pose: Pose::Tree,
            classification_confidence: 0.4,
            gating_threshold: 0.7,
            reason: "classification confidence below gating threshold".to_string(),
        };
        let json = ReportEncoder::compact().encode_to_json(&analysis).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["status"], "unavailable");
        assert_eq!(parsed["pose"], "tree");
        assert!(parsed.get("indicators").is_none());
        assert!(parsed.get("global_score").is_none());
    }

    #[test]
    fn test_decode_restores_analysis() {
        let analysis = QualityAnalysis::Available(make_test_report());
        let json = ReportEncoder::new().encode_to_json(&analysis).unwrap();

        let decoded = ReportEncoder::decode(&json).unwrap();
        assert_eq!(decoded, analysis);
        let names: Vec<&str> = decoded.report().unwrap().indicators.names().collect();
        assert_eq!(
            names,
            vec!["alignment", "core_strength", "symmetry", "shoulder_position"]
        );
    }

    #[test]
    fn test_decode_rejects_unmarked_feedback() {
        let json = r#"{"status":"available","pose":"plank","classification_confidence":0.9,
            "indicators":{"alignment":90.0},"feedback":["no marker"],"global_score":90.0,
            "skill_level":"expert","priority_indicator":{"name":"alignment","score":90.0,
            "improvement_needed":"minor"},"measurements":{},"input_quality":{"confidence":1.0,
            "mean_visibility":1.0,"low_visibility_landmarks":[],"flags":[]}}"#;
        assert!(matches!(
            ReportEncoder::decode(json),
            Err(QualityError::JsonError(_))
        ));
    }
}
