use serde::{Deserialize, Serialize};

use crate::face::FaceRectangle;

/// Per-emotion confidence scores, 0.0 to 1.0 each. The eight scores
/// sum to roughly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionScores {
    pub anger: f64,
    pub contempt: f64,
    pub disgust: f64,
    pub fear: f64,
    pub happiness: f64,
    pub neutral: f64,
    pub sadness: f64,
    pub surprise: f64,
}

impl EmotionScores {
    /// Name and score of the highest-confidence emotion.
    pub fn dominant(&self) -> (&'static str, f64) {
        let all = [
            ("anger", self.anger),
            ("contempt", self.contempt),
            ("disgust", self.disgust),
            ("fear", self.fear),
            ("happiness", self.happiness),
            ("neutral", self.neutral),
            ("sadness", self.sadness),
            ("surprise", self.surprise),
        ];
        let mut best = all[0];
        for entry in &all[1..] {
            if entry.1 > best.1 {
                best = *entry;
            }
        }
        best
    }
}

/// One result from the emotion recognize endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emotion {
    pub face_rectangle: FaceRectangle,
    pub scores: EmotionScores,
}
