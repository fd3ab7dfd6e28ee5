use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person group: the service-side container that persons are enrolled
/// into and that training and identification run against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonGroup {
    /// User-chosen group ID: lowercase letters, digits, `-` and `_`,
    /// at most 64 characters.
    pub person_group_id: String,
    pub name: String,
    pub user_data: Option<String>,
}

/// An enrolled person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: Uuid,
    pub name: String,
    pub user_data: Option<String>,
    /// Faces persisted for this person, in enrollment order.
    #[serde(default)]
    pub persisted_face_ids: Vec<Uuid>,
}

/// Response of adding a face to a person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersistedFaceResult {
    pub persisted_face_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_deserializes_service_json() {
        let json = r#"{
            "personId": "25985303-c537-4467-b41d-bdb45cd95ca1",
            "name": "Ryan",
            "userData": "employee",
            "persistedFaceIds": [
                "015839fb-fbd9-4f79-ace9-7675fc2f1dd9",
                "fce92aed-d578-4d2e-8114-068f8af4492e"
            ]
        }"#;
        let person: Person = serde_json::from_str(json).expect("valid person JSON");
        assert_eq!(person.name, "Ryan");
        assert_eq!(person.user_data.as_deref(), Some("employee"));
        assert_eq!(person.persisted_face_ids.len(), 2);
    }

    #[test]
    fn test_person_without_faces_defaults_empty() {
        let json = r#"{
            "personId": "25985303-c537-4467-b41d-bdb45cd95ca1",
            "name": "Ryan",
            "userData": null
        }"#;
        let person: Person = serde_json::from_str(json).expect("valid person JSON");
        assert!(person.user_data.is_none());
        assert!(person.persisted_face_ids.is_empty());
    }

    #[test]
    fn test_group_round_trip() {
        let group = PersonGroup {
            person_group_id: "home-users".into(),
            name: "Home users".into(),
            user_data: None,
        };
        let json = serde_json::to_string(&group).expect("serializes");
        assert!(json.contains("\"personGroupId\":\"home-users\""));
        let back: PersonGroup = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, group);
    }
}
