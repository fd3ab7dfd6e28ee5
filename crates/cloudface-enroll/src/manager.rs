//! Person-group orchestration: group lifecycle, user enrollment and
//! the face-login flow.

use cloudface_client::{ApiError, DetectOptions, FaceClient, TrainingWait, TrainingWaitOptions};
use cloudface_models::{
    match_candidates_to_faces, Candidate, Face, FaceRectangle, Person, TrainingState,
};
use cloudface_task::Task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::EnrollConfig;
use crate::error::{EnrollError, EnrollResult};
use crate::outcome::{IdentifyOutcome, PersonMatch, RecognizedFace, TrainingDisposition};

/// Manages the users enrolled in one person group.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Clone, Debug)]
pub struct UserManager {
    client: FaceClient,
    group_id: String,
    config: EnrollConfig,
}

impl UserManager {
    /// Connect to a person group, creating it when missing.
    ///
    /// A freshly created group is also sent for training. The service
    /// refuses to train a group with no enrolled faces, so that first
    /// run fails server-side; the identify flow reads the
    /// failed-and-empty combination as an empty roster, not an error.
    pub async fn connect(
        client: FaceClient,
        group_id: impl Into<String>,
        config: EnrollConfig,
    ) -> EnrollResult<Self> {
        let group_id = group_id.into();
        if group_id.is_empty() {
            return Err(ApiError::config_error("the user-group id is not set").into());
        }

        match client.get_person_group(&group_id).await {
            Ok(group) => {
                info!(%group_id, name = %group.name, "connected to user group");
            }
            Err(ApiError::NotFound(_)) => {
                info!(%group_id, "user group not found, creating it");
                let name = config.group_name.clone().unwrap_or_else(|| group_id.clone());
                client.create_person_group(&group_id, &name, None).await?;
                client.train_person_group(&group_id).await?;
                client.get_person_group(&group_id).await?;
                info!(%group_id, "user group created");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self { client, group_id, config })
    }

    /// The underlying API client.
    pub fn client(&self) -> &FaceClient {
        &self.client
    }

    /// ID of the managed group.
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// List the users enrolled in the group.
    pub async fn users(&self) -> EnrollResult<Vec<Person>> {
        Ok(self.client.list_persons(&self.group_id).await?)
    }

    /// Fetch one enrolled user.
    pub async fn user_by_id(&self, person_id: Uuid) -> EnrollResult<Person> {
        Ok(self.client.get_person(&self.group_id, person_id).await?)
    }

    /// Enroll a new user from a face image and re-train the group.
    ///
    /// `target_face` narrows the image to one face rectangle and is
    /// required when the image contains several. The returned person
    /// carries the persisted face ID of the enrolled image.
    pub async fn enroll_user(
        &self,
        name: &str,
        user_data: Option<&str>,
        image: &[u8],
        target_face: Option<&FaceRectangle>,
    ) -> EnrollResult<Person> {
        let person_id = self
            .client
            .create_person(&self.group_id, name, user_data)
            .await?;
        let persisted_face_id = self
            .client
            .add_person_face(&self.group_id, person_id, image, target_face)
            .await?;
        self.client.train_person_group(&self.group_id).await?;

        info!(group_id = %self.group_id, %person_id, name, "user enrolled");
        Ok(Person {
            person_id,
            name: name.to_string(),
            user_data: user_data.map(str::to_string),
            persisted_face_ids: vec![persisted_face_id],
        })
    }

    /// Add another face image to an enrolled user and re-train.
    pub async fn add_user_face(
        &self,
        person_id: Uuid,
        image: &[u8],
        target_face: Option<&FaceRectangle>,
    ) -> EnrollResult<Uuid> {
        let persisted_face_id = self
            .client
            .add_person_face(&self.group_id, person_id, image, target_face)
            .await?;
        self.client.train_person_group(&self.group_id).await?;

        info!(group_id = %self.group_id, %person_id, "face added to user");
        Ok(persisted_face_id)
    }

    /// Update a user's name and/or user data.
    pub async fn rename_user(
        &self,
        person_id: Uuid,
        name: Option<&str>,
        user_data: Option<&str>,
    ) -> EnrollResult<()> {
        self.client
            .update_person(&self.group_id, person_id, name, user_data)
            .await?;
        Ok(())
    }

    /// Remove a user and their persisted faces, then re-train.
    pub async fn remove_user(&self, person_id: Uuid) -> EnrollResult<()> {
        self.client.delete_person(&self.group_id, person_id).await?;
        self.client.train_person_group(&self.group_id).await?;

        info!(group_id = %self.group_id, %person_id, "user removed");
        Ok(())
    }

    /// Identify the users on an image: face login.
    ///
    /// Detects faces, settles the group's training state, identifies
    /// the detected faces and resolves each candidate to its enrolled
    /// person. Faces come back in detect order.
    pub async fn identify_users(&self, image: &[u8]) -> EnrollResult<IdentifyOutcome> {
        let faces = self
            .client
            .detect_faces(image, &DetectOptions::ids_only())
            .await?;
        if faces.is_empty() {
            info!(group_id = %self.group_id, "no faces detected");
            return Ok(IdentifyOutcome {
                faces: Vec::new(),
                training: TrainingDisposition::Ready,
            });
        }

        let training = self.settle_training().await?;
        if training == TrainingDisposition::EmptyGroup {
            return Ok(IdentifyOutcome { faces: unmatched(faces), training });
        }

        let face_ids: Vec<Uuid> = faces.iter().filter_map(|f| f.face_id).collect();
        let results = self
            .client
            .identify(&self.group_id, &face_ids, self.config.max_candidates)
            .await?;

        let mut faces = faces;
        let matched = match_candidates_to_faces(&mut faces, &results);
        info!(
            group_id = %self.group_id,
            faces = faces.len(),
            matched,
            training = %training,
            "identification finished"
        );

        let mut recognized = Vec::with_capacity(faces.len());
        for face in faces {
            let matched = match face.candidate {
                Some(candidate) => self.resolve_candidate(candidate).await?,
                None => None,
            };
            recognized.push(RecognizedFace { face, matched });
        }

        Ok(IdentifyOutcome { faces: recognized, training })
    }

    /// Run `identify_users` in the background.
    pub fn spawn_identify(&self, image: Vec<u8>) -> Task<IdentifyOutcome> {
        let manager = self.clone();
        Task::spawn(async move { manager.identify_users(&image).await })
    }

    /// Run `enroll_user` in the background.
    pub fn spawn_enroll(
        &self,
        name: String,
        user_data: Option<String>,
        image: Vec<u8>,
    ) -> Task<Person> {
        let manager = self.clone();
        Task::spawn(async move {
            manager
                .enroll_user(&name, user_data.as_deref(), &image, None)
                .await
        })
    }

    /// Bring the group's training state to a point where identify is
    /// worth calling.
    ///
    /// An empty group can never train; its permanent failed status is
    /// reported as `EmptyGroup` so callers skip identification. A
    /// failed status with users enrolled triggers one re-train. The
    /// bounded wait is soft: identify may run against a group whose
    /// training is still in flight.
    async fn settle_training(&self) -> EnrollResult<TrainingDisposition> {
        let status = self.client.get_training_status(&self.group_id).await?;

        let mut disposition = TrainingDisposition::Ready;
        match status.status {
            TrainingState::Succeeded => return Ok(TrainingDisposition::Ready),
            TrainingState::Failed => {
                if self.users().await?.is_empty() {
                    info!(group_id = %self.group_id, "group is empty, skipping identification");
                    return Ok(TrainingDisposition::EmptyGroup);
                }
                warn!(group_id = %self.group_id, "training failed with users enrolled, re-training");
                self.client.train_person_group(&self.group_id).await?;
                disposition = TrainingDisposition::Retrained;
            }
            _ => {}
        }

        let opts = TrainingWaitOptions::new()
            .with_timeout(self.config.training_timeout)
            .with_poll_interval(self.config.training_poll);
        match self.client.wait_for_training(&self.group_id, &opts).await? {
            TrainingWait::Succeeded => Ok(disposition),
            TrainingWait::TimedOut(state) => {
                warn!(group_id = %self.group_id, state = %state, "training still in flight, identifying anyway");
                Ok(TrainingDisposition::TimedOut)
            }
            TrainingWait::Failed(message) => {
                if self.users().await?.is_empty() {
                    info!(group_id = %self.group_id, "group is empty, skipping identification");
                    return Ok(TrainingDisposition::EmptyGroup);
                }
                Err(EnrollError::training(
                    message.unwrap_or_else(|| "training failed".to_string()),
                ))
            }
        }
    }

    /// Fetch the person behind an identify candidate. A person deleted
    /// between identify and this fetch is reported as no match.
    async fn resolve_candidate(&self, candidate: Candidate) -> EnrollResult<Option<PersonMatch>> {
        match self
            .client
            .get_person(&self.group_id, candidate.person_id)
            .await
        {
            Ok(person) => Ok(Some(PersonMatch {
                person,
                confidence: candidate.confidence,
            })),
            Err(ApiError::NotFound(_)) => {
                warn!(
                    group_id = %self.group_id,
                    person_id = %candidate.person_id,
                    "candidate person no longer exists"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn unmatched(faces: Vec<Face>) -> Vec<RecognizedFace> {
    faces
        .into_iter()
        .map(|face| RecognizedFace { face, matched: None })
        .collect()
}
