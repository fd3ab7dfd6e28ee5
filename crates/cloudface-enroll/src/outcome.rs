//! Identification outcome types.

use std::fmt::Display;

use cloudface_models::{Face, Person};

/// How the group's training state was resolved before identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingDisposition {
    /// Training had already succeeded, or succeeded during the wait.
    Ready,
    /// The group has no enrolled users; identification was skipped.
    EmptyGroup,
    /// Training had failed with users enrolled; a re-train was kicked
    /// off and succeeded during the wait.
    Retrained,
    /// The wait deadline passed with training still in flight;
    /// identification proceeded anyway.
    TimedOut,
}

impl TrainingDisposition {
    /// Get string representation of the disposition.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingDisposition::Ready => "ready",
            TrainingDisposition::EmptyGroup => "empty group",
            TrainingDisposition::Retrained => "retrained",
            TrainingDisposition::TimedOut => "timed out",
        }
    }
}

impl Display for TrainingDisposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An enrolled person matched to a detected face.
#[derive(Debug, Clone)]
pub struct PersonMatch {
    pub person: Person,
    pub confidence: f64,
}

/// A detected face, possibly matched to an enrolled person.
#[derive(Debug, Clone)]
pub struct RecognizedFace {
    pub face: Face,
    pub matched: Option<PersonMatch>,
}

impl RecognizedFace {
    /// Name of the matched person, if any.
    pub fn person_name(&self) -> Option<&str> {
        self.matched.as_ref().map(|m| m.person.name.as_str())
    }
}

/// Result of the face-login flow, in detect order.
#[derive(Debug, Clone)]
pub struct IdentifyOutcome {
    pub faces: Vec<RecognizedFace>,
    pub training: TrainingDisposition,
}

impl IdentifyOutcome {
    /// Number of faces matched to an enrolled person.
    pub fn matched_count(&self) -> usize {
        self.faces.iter().filter(|f| f.matched.is_some()).count()
    }
}
