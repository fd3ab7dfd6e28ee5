use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate person for an identified face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub person_id: Uuid,
    /// Match confidence, 0.0 to 1.0.
    pub confidence: f64,
}

/// Identification result for a single detected face. Candidates are
/// ordered by descending confidence; an unrecognized face has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResult {
    pub face_id: Uuid,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}
