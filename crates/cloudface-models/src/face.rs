use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::FaceAttributes;
use crate::emotion::EmotionScores;
use crate::identify::Candidate;

/// Pixel rectangle framing a detected face.
///
/// Also the wire form of the emotion endpoint's `faceRectangles` query
/// parameter, rendered as `left,top,width,height` by `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRectangle {
    /// X coordinate of the top-left corner, in pixels
    pub left: u32,
    /// Y coordinate of the top-left corner, in pixels
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FaceRectangle {
    /// Create a new rectangle.
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left as f64 + self.width as f64 / 2.0,
            self.top as f64 + self.height as f64 / 2.0,
        )
    }

    /// Euclidean distance between the centers of two rectangles.
    pub fn center_distance(&self, other: &FaceRectangle) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }
}

impl std::fmt::Display for FaceRectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.width, self.height)
    }
}

/// A single landmark coordinate, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub x: f64,
    pub y: f64,
}

/// The 27 face landmarks reported when `returnFaceLandmarks` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceLandmarks {
    pub pupil_left: FeaturePoint,
    pub pupil_right: FeaturePoint,
    pub nose_tip: FeaturePoint,
    pub mouth_left: FeaturePoint,
    pub mouth_right: FeaturePoint,
    pub eyebrow_left_outer: FeaturePoint,
    pub eyebrow_left_inner: FeaturePoint,
    pub eye_left_outer: FeaturePoint,
    pub eye_left_top: FeaturePoint,
    pub eye_left_bottom: FeaturePoint,
    pub eye_left_inner: FeaturePoint,
    pub eyebrow_right_inner: FeaturePoint,
    pub eyebrow_right_outer: FeaturePoint,
    pub eye_right_inner: FeaturePoint,
    pub eye_right_top: FeaturePoint,
    pub eye_right_bottom: FeaturePoint,
    pub eye_right_outer: FeaturePoint,
    pub nose_root_left: FeaturePoint,
    pub nose_root_right: FeaturePoint,
    pub nose_left_alar_top: FeaturePoint,
    pub nose_right_alar_top: FeaturePoint,
    pub nose_left_alar_out_tip: FeaturePoint,
    pub nose_right_alar_out_tip: FeaturePoint,
    pub upper_lip_top: FeaturePoint,
    pub upper_lip_bottom: FeaturePoint,
    pub under_lip_top: FeaturePoint,
    pub under_lip_bottom: FeaturePoint,
}

/// A face returned by the detect endpoint.
///
/// `emotion` and `candidate` are never on the wire; they are filled in
/// locally by the matching helpers after separate emotion-recognition
/// and identify calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    /// Service-assigned face ID, present unless `returnFaceId` was
    /// disabled. Valid for 24 hours server-side.
    pub face_id: Option<Uuid>,
    pub face_rectangle: FaceRectangle,
    pub face_landmarks: Option<FaceLandmarks>,
    pub face_attributes: Option<FaceAttributes>,
    /// Emotion scores matched to this face by rectangle proximity.
    #[serde(skip)]
    pub emotion: Option<EmotionScores>,
    /// Best identification candidate matched to this face by ID.
    #[serde(skip)]
    pub candidate: Option<Candidate>,
}

impl Face {
    /// Human-readable one-line summary for CLI output and logs.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(attrs) = &self.face_attributes {
            parts.push(attrs.gender.clone());
            parts.push(format!("{:.0} years", attrs.age));
            parts.push(format!("smile {:.0}%", attrs.smile * 100.0));
        }
        if let Some(scores) = &self.emotion {
            let (name, score) = scores.dominant();
            parts.push(format!("{} {:.0}%", name, score * 100.0));
        }
        if parts.is_empty() {
            format!("face at {}", self.face_rectangle)
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::FaceAttributes;

    #[test]
    fn test_rectangle_center_and_distance() {
        let a = FaceRectangle::new(0, 0, 100, 100);
        let b = FaceRectangle::new(30, 40, 100, 100);
        assert_eq!(a.center(), (50.0, 50.0));
        assert!((a.center_distance(&b) - 50.0).abs() < 1e-9);
        assert_eq!(a.center_distance(&a), 0.0);
    }

    #[test]
    fn test_rectangle_display_is_wire_form() {
        let rect = FaceRectangle::new(10, 20, 30, 40);
        assert_eq!(rect.to_string(), "10,20,30,40");
    }

    #[test]
    fn test_face_deserializes_service_json() {
        let json = r#"{
            "faceId": "c5c24a82-6845-4031-9d5d-978df9175426",
            "faceRectangle": { "left": 78, "top": 394, "width": 394, "height": 394 },
            "faceAttributes": {
                "age": 71.0,
                "gender": "male",
                "smile": 0.88,
                "headPose": { "roll": 2.1, "yaw": 3.0, "pitch": 0.0 }
            }
        }"#;

        let face: Face = serde_json::from_str(json).expect("valid face JSON");
        assert_eq!(
            face.face_id.unwrap().to_string(),
            "c5c24a82-6845-4031-9d5d-978df9175426"
        );
        assert_eq!(face.face_rectangle.left, 78);
        assert!(face.face_landmarks.is_none());
        let attrs = face.face_attributes.expect("attributes present");
        assert_eq!(attrs.gender, "male");
        assert!(attrs.facial_hair.is_none());
        assert!(face.emotion.is_none());
        assert!(face.candidate.is_none());
    }

    #[test]
    fn test_face_without_id_deserializes() {
        let json = r#"{ "faceRectangle": { "left": 0, "top": 0, "width": 10, "height": 10 } }"#;
        let face: Face = serde_json::from_str(json).expect("valid face JSON");
        assert!(face.face_id.is_none());
    }

    #[test]
    fn test_describe_with_attributes() {
        let face = Face {
            face_id: None,
            face_rectangle: FaceRectangle::new(0, 0, 10, 10),
            face_landmarks: None,
            face_attributes: Some(FaceAttributes {
                age: 32.4,
                gender: "female".into(),
                smile: 0.75,
                head_pose: None,
                facial_hair: None,
            }),
            emotion: None,
            candidate: None,
        };
        assert_eq!(face.describe(), "female, 32 years, smile 75%");
    }

    #[test]
    fn test_describe_without_attributes_falls_back_to_rectangle() {
        let face = Face {
            face_id: None,
            face_rectangle: FaceRectangle::new(5, 6, 7, 8),
            face_landmarks: None,
            face_attributes: None,
            emotion: None,
            candidate: None,
        };
        assert_eq!(face.describe(), "face at 5,6,7,8");
    }
}
