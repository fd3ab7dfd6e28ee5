//! Face detection, emotion recognition and identification.

use cloudface_models::{Emotion, Face, FaceRectangle, IdentifyResult};
use serde::Serialize;
use uuid::Uuid;

use crate::client::FaceClient;
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_identify_faces;

/// Attribute kinds the detect endpoint can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAttributeKind {
    Age,
    Gender,
    Smile,
    HeadPose,
    FacialHair,
}

impl FaceAttributeKind {
    /// Wire name used in the `returnFaceAttributes` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceAttributeKind::Age => "age",
            FaceAttributeKind::Gender => "gender",
            FaceAttributeKind::Smile => "smile",
            FaceAttributeKind::HeadPose => "headPose",
            FaceAttributeKind::FacialHair => "facialHair",
        }
    }
}

/// Options for a detect call.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Ask the service to assign a face ID (needed for identify).
    pub return_face_id: bool,
    /// Include the 27 landmark points.
    pub return_face_landmarks: bool,
    /// Attributes to compute; empty omits the parameter entirely.
    pub attributes: Vec<FaceAttributeKind>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            return_face_id: true,
            return_face_landmarks: false,
            attributes: vec![
                FaceAttributeKind::Age,
                FaceAttributeKind::Gender,
                FaceAttributeKind::Smile,
                FaceAttributeKind::HeadPose,
            ],
        }
    }
}

impl DetectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// IDs only, no attributes. The cheapest detect, used by the
    /// identify flow.
    pub fn ids_only() -> Self {
        Self {
            return_face_id: true,
            return_face_landmarks: false,
            attributes: Vec::new(),
        }
    }

    pub fn with_landmarks(mut self) -> Self {
        self.return_face_landmarks = true;
        self
    }

    pub fn with_facial_hair(mut self) -> Self {
        if !self.attributes.contains(&FaceAttributeKind::FacialHair) {
            self.attributes.push(FaceAttributeKind::FacialHair);
        }
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<FaceAttributeKind>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn without_face_id(mut self) -> Self {
        self.return_face_id = false;
        self
    }

    /// Query parameters in wire form.
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("returnFaceId", self.return_face_id.to_string()),
            ("returnFaceLandmarks", self.return_face_landmarks.to_string()),
        ];
        if !self.attributes.is_empty() {
            let joined = self
                .attributes
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("returnFaceAttributes", joined));
        }
        params
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyRequest<'a> {
    person_group_id: &'a str,
    face_ids: &'a [Uuid],
    max_num_of_candidates_returned: u8,
}

impl FaceClient {
    /// Detect faces in an image.
    ///
    /// POST `{face}/detect` with the image as an octet-stream body.
    pub async fn detect_faces(&self, image: &[u8], opts: &DetectOptions) -> ApiResult<Vec<Face>> {
        if image.is_empty() {
            return Err(ApiError::config_error("image bytes are empty"));
        }

        let url = self.face_url("detect");
        let query = opts.query();

        self.with_retry("detect_faces", || async {
            self.execute("detect_faces", &url, async {
                let request = FaceClient::image_body(self.post(&url).query(&query), image);
                let response = request.send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }

    /// Recognize emotions in an image.
    ///
    /// POST `{emotion}/recognize`; when `face_rects` is non-empty it is
    /// passed as the `faceRectangles` parameter so the service scores
    /// exactly those regions.
    pub async fn recognize_emotions(
        &self,
        image: &[u8],
        face_rects: &[FaceRectangle],
    ) -> ApiResult<Vec<Emotion>> {
        if image.is_empty() {
            return Err(ApiError::config_error("image bytes are empty"));
        }

        let url = self.emotion_url("recognize");
        let rects_param = if face_rects.is_empty() {
            None
        } else {
            Some(
                face_rects
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(";"),
            )
        };

        self.with_retry("recognize_emotions", || async {
            self.execute("recognize_emotions", &url, async {
                let mut request = self.post_emotion(&url);
                if let Some(rects) = &rects_param {
                    request = request.query(&[("faceRectangles", rects)]);
                }
                let response = FaceClient::image_body(request, image).send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }

    /// Identify detected faces against a trained person group.
    ///
    /// POST `{face}/identify`. An empty `face_ids` slice short-circuits
    /// to an empty result without a network call.
    pub async fn identify(
        &self,
        group_id: &str,
        face_ids: &[Uuid],
        max_candidates: u8,
    ) -> ApiResult<Vec<IdentifyResult>> {
        if face_ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.face_url("identify");
        let body = IdentifyRequest {
            person_group_id: group_id,
            face_ids,
            max_num_of_candidates_returned: max_candidates,
        };
        record_identify_faces(face_ids.len());

        self.with_retry("identify", || async {
            self.execute("identify", &url, async {
                let response = self.post(&url).json(&body).send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }
}
