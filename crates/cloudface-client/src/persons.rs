//! Person CRUD and persisted-face management within a group.

use cloudface_models::{AddPersistedFaceResult, FaceRectangle, Person};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::FaceClient;
use crate::error::{ApiError, ApiResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePersonResult {
    person_id: Uuid,
}

impl FaceClient {
    /// Create a person in a group; returns the new person's ID.
    ///
    /// Not retried: a duplicate POST would enroll the person twice.
    pub async fn create_person(
        &self,
        group_id: &str,
        name: &str,
        user_data: Option<&str>,
    ) -> ApiResult<Uuid> {
        let url = self.face_url(&format!("persongroups/{}/persons", group_id));
        let body = PersonBody {
            name: Some(name),
            user_data,
        };

        let result: CreatePersonResult = self
            .execute("create_person", &url, async {
                let response = self.post(&url).json(&body).send().await?;
                FaceClient::read_json(response).await
            })
            .await?;

        Ok(result.person_id)
    }

    /// Fetch a person by ID.
    pub async fn get_person(&self, group_id: &str, person_id: Uuid) -> ApiResult<Person> {
        let url = self.face_url(&format!("persongroups/{}/persons/{}", group_id, person_id));

        self.with_retry("get_person", || async {
            self.execute("get_person", &url, async {
                let response = self.get(&url).send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }

    /// List every person enrolled in a group.
    pub async fn list_persons(&self, group_id: &str) -> ApiResult<Vec<Person>> {
        let url = self.face_url(&format!("persongroups/{}/persons", group_id));

        self.with_retry("list_persons", || async {
            self.execute("list_persons", &url, async {
                let response = self.get(&url).send().await?;
                FaceClient::read_json(response).await
            })
            .await
        })
        .await
    }

    /// Update a person's name and/or user data. Absent fields are left
    /// untouched server-side.
    pub async fn update_person(
        &self,
        group_id: &str,
        person_id: Uuid,
        name: Option<&str>,
        user_data: Option<&str>,
    ) -> ApiResult<()> {
        if name.is_none() && user_data.is_none() {
            return Err(ApiError::config_error(
                "update_person needs a name or user data to set",
            ));
        }

        let url = self.face_url(&format!("persongroups/{}/persons/{}", group_id, person_id));
        let body = PersonBody { name, user_data };

        self.with_retry("update_person", || async {
            self.execute("update_person", &url, async {
                let response = self.patch(&url).json(&body).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }

    /// Delete a person and their persisted faces.
    pub async fn delete_person(&self, group_id: &str, person_id: Uuid) -> ApiResult<()> {
        let url = self.face_url(&format!("persongroups/{}/persons/{}", group_id, person_id));

        self.with_retry("delete_person", || async {
            self.execute("delete_person", &url, async {
                let response = self.delete(&url).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }

    /// Add a face image to a person; returns the persisted face ID.
    ///
    /// `target_face` narrows the image to one face rectangle and is
    /// required when the image contains several faces. Not retried: a
    /// duplicate POST would persist the face twice.
    pub async fn add_person_face(
        &self,
        group_id: &str,
        person_id: Uuid,
        image: &[u8],
        target_face: Option<&FaceRectangle>,
    ) -> ApiResult<Uuid> {
        if image.is_empty() {
            return Err(ApiError::config_error("image bytes are empty"));
        }

        let url = self.face_url(&format!(
            "persongroups/{}/persons/{}/persistedFaces",
            group_id, person_id
        ));
        let target_param = target_face.map(|r| r.to_string());

        let result: AddPersistedFaceResult = self
            .execute("add_person_face", &url, async {
                let mut request = self.post(&url);
                if let Some(target) = &target_param {
                    request = request.query(&[("targetFace", target)]);
                }
                let response = FaceClient::image_body(request, image).send().await?;
                FaceClient::read_json(response).await
            })
            .await?;

        Ok(result.persisted_face_id)
    }

    /// Remove a persisted face from a person.
    pub async fn delete_person_face(
        &self,
        group_id: &str,
        person_id: Uuid,
        persisted_face_id: Uuid,
    ) -> ApiResult<()> {
        let url = self.face_url(&format!(
            "persongroups/{}/persons/{}/persistedFaces/{}",
            group_id, person_id, persisted_face_id
        ));

        self.with_retry("delete_person_face", || async {
            self.execute("delete_person_face", &url, async {
                let response = self.delete(&url).send().await?;
                FaceClient::read_empty(response).await
            })
            .await
        })
        .await
    }
}
