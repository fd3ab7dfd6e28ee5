//! Wire types for the CloudFace face and emotion service.
//!
//! This crate provides Serde-serializable types for:
//! - Face detection results (rectangles, landmarks, attributes)
//! - Emotion recognition scores
//! - Person groups, persons and persisted faces
//! - Training status polling
//! - Identification candidates, plus helpers that match emotion and
//!   identify results back onto detected faces

pub mod attributes;
pub mod emotion;
pub mod face;
pub mod identify;
pub mod matching;
pub mod person;
pub mod training;

// Re-export common types
pub use attributes::{FaceAttributes, FacialHair, HeadPose};
pub use emotion::{Emotion, EmotionScores};
pub use face::{Face, FaceLandmarks, FaceRectangle, FeaturePoint};
pub use identify::{Candidate, IdentifyResult};
pub use matching::{match_candidates_to_faces, match_emotions_to_faces};
pub use person::{AddPersistedFaceResult, Person, PersonGroup};
pub use training::{TrainingState, TrainingStatus};
