//! Match emotion and identify results back onto detected faces.
//!
//! The detect and emotion endpoints are separate calls over the same
//! image; their results are correlated by rectangle proximity. The
//! identify endpoint correlates by face ID.

use crate::emotion::Emotion;
use crate::face::Face;
use crate::identify::IdentifyResult;

/// Attach to each face the emotion whose rectangle center is nearest to
/// the face's rectangle center.
///
/// Returns the number of faces that received an emotion. Faces keep
/// their order; an empty `emotions` slice leaves them untouched.
pub fn match_emotions_to_faces(faces: &mut [Face], emotions: &[Emotion]) -> usize {
    let mut matched = 0;

    for face in faces.iter_mut() {
        let nearest = emotions.iter().min_by(|a, b| {
            let da = face.face_rectangle.center_distance(&a.face_rectangle);
            let db = face.face_rectangle.center_distance(&b.face_rectangle);
            da.total_cmp(&db)
        });
        if let Some(emotion) = nearest {
            face.emotion = Some(emotion.scores);
            matched += 1;
        }
    }

    matched
}

/// Attach each identify result's top candidate to the face with the
/// same face ID.
///
/// Returns the number of faces that received a candidate. Results with
/// no candidates, and results whose face ID matches no face, are
/// skipped; unmatched faces keep `candidate = None`.
pub fn match_candidates_to_faces(faces: &mut [Face], results: &[IdentifyResult]) -> usize {
    let mut matched = 0;

    for result in results {
        let Some(top) = result.candidates.first() else {
            continue;
        };
        if let Some(face) = faces
            .iter_mut()
            .find(|f| f.face_id == Some(result.face_id))
        {
            face.candidate = Some(*top);
            matched += 1;
        }
    }

    matched
}
