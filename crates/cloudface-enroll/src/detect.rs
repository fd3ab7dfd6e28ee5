//! Detection enriched with emotion scores.

use cloudface_client::{DetectOptions, FaceClient};
use cloudface_models::{match_emotions_to_faces, Face, FaceRectangle};
use tracing::debug;

use crate::error::EnrollResult;

/// Detect faces and attach an emotion score set to each.
///
/// Runs detect and emotion recognition over the same image, seeding the
/// emotion call with the detected rectangles, then matches the scores
/// back onto the faces by rectangle proximity.
pub async fn detect_with_emotions(
    client: &FaceClient,
    image: &[u8],
    opts: &DetectOptions,
) -> EnrollResult<Vec<Face>> {
    let mut faces = client.detect_faces(image, opts).await?;
    if faces.is_empty() {
        return Ok(faces);
    }

    let rects: Vec<FaceRectangle> = faces.iter().map(|f| f.face_rectangle).collect();
    let emotions = client.recognize_emotions(image, &rects).await?;
    let matched = match_emotions_to_faces(&mut faces, &emotions);
    debug!(faces = faces.len(), matched, "emotion scores attached");

    Ok(faces)
}
