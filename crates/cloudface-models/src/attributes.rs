use serde::{Deserialize, Serialize};

/// Face attributes computed by the detect endpoint when requested via
/// `returnFaceAttributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceAttributes {
    /// Estimated age in years (fractional).
    pub age: f64,
    /// `"male"` or `"female"` as reported by the service.
    pub gender: String,
    /// Smile intensity, 0.0 to 1.0.
    pub smile: f64,
    pub head_pose: Option<HeadPose>,
    pub facial_hair: Option<FacialHair>,
}

/// 3D head orientation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadPose {
    pub roll: f64,
    pub yaw: f64,
    pub pitch: f64,
}

/// Facial hair presence scores, 0.0 to 1.0 each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialHair {
    pub moustache: f64,
    pub beard: f64,
    pub sideburns: f64,
}
