//! Subcommand handlers.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use cloudface_client::{DetectOptions, FaceClient, TrainingWait, TrainingWaitOptions};
use cloudface_enroll::{detect_with_emotions, EnrollConfig, TrainingDisposition, UserManager};
use cloudface_models::Face;
use cloudface_task::DEFAULT_POLL_INTERVAL_MS;

use crate::{GroupCommand, UsersCommand};

pub async fn detect(
    client: &FaceClient,
    image: &Path,
    landmarks: bool,
    facial_hair: bool,
    emotions: bool,
) -> Result<()> {
    let bytes = read_image(image)?;

    let mut opts = DetectOptions::new();
    if landmarks {
        opts = opts.with_landmarks();
    }
    if facial_hair {
        opts = opts.with_facial_hair();
    }

    let faces = if emotions {
        detect_with_emotions(client, &bytes, &opts).await?
    } else {
        client.detect_faces(&bytes, &opts).await?
    };

    print_faces(&faces);
    Ok(())
}

pub async fn group(client: &FaceClient, group_id: &str, cmd: GroupCommand) -> Result<()> {
    match cmd {
        GroupCommand::Init => {
            let manager = connect(client, group_id).await?;
            println!("Group '{}' is ready", manager.group_id());
        }
        GroupCommand::Status => {
            let group = client.get_person_group(group_id).await?;
            let status = client.get_training_status(group_id).await?;
            println!("Group:       {} ({})", group.person_group_id, group.name);
            println!("Training:    {}", status.status);
            if let Some(t) = status.last_action_date_time {
                println!("Last action: {}", t);
            }
            if let Some(message) = &status.message {
                println!("Message:     {}", message);
            }
        }
        GroupCommand::Train => {
            client.train_person_group(group_id).await?;
            let wait = client
                .wait_for_training(group_id, &TrainingWaitOptions::default())
                .await?;
            match wait {
                TrainingWait::Succeeded => println!("Training succeeded"),
                TrainingWait::Failed(message) => println!(
                    "Training failed: {}",
                    message.unwrap_or_else(|| "no detail".to_string())
                ),
                TrainingWait::TimedOut(state) => {
                    println!("Training still {} after the wait; check status later", state)
                }
            }
        }
        GroupCommand::Delete => {
            client.delete_person_group(group_id).await?;
            println!("Group '{}' deleted", group_id);
        }
    }
    Ok(())
}

pub async fn enroll(
    client: &FaceClient,
    group_id: &str,
    name: &str,
    user_data: Option<&str>,
    image: &Path,
) -> Result<()> {
    let bytes = read_image(image)?;
    let manager = connect(client, group_id).await?;

    let person = manager.enroll_user(name, user_data, &bytes, None).await?;
    println!("Enrolled '{}' with person ID {}", person.name, person.person_id);
    Ok(())
}

pub async fn identify(client: &FaceClient, group_id: &str, image: &Path) -> Result<()> {
    let bytes = read_image(image)?;
    let manager = connect(client, group_id).await?;

    let task = manager.spawn_identify(bytes);
    let outcome = task
        .wait_with_interval(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS), |state| {
            info!(%state, "identifying");
        })
        .await
        .context("Identification failed")?;

    if outcome.faces.is_empty() {
        println!("No faces detected");
        return Ok(());
    }
    if outcome.training != TrainingDisposition::Ready {
        println!("Training disposition: {}", outcome.training);
    }
    for (i, face) in outcome.faces.iter().enumerate() {
        match &face.matched {
            Some(m) => println!(
                "{}. {} ({:.0}% confidence)",
                i + 1,
                m.person.name,
                m.confidence * 100.0
            ),
            None => println!("{}. not recognized", i + 1),
        }
    }
    Ok(())
}

pub async fn users(client: &FaceClient, group_id: &str, cmd: UsersCommand) -> Result<()> {
    let manager = connect(client, group_id).await?;

    match cmd {
        UsersCommand::List => {
            let users = manager.users().await?;
            if users.is_empty() {
                println!("No users enrolled");
                return Ok(());
            }
            for user in users {
                println!(
                    "{}  {}  ({} face(s))",
                    user.person_id,
                    user.name,
                    user.persisted_face_ids.len()
                );
            }
        }
        UsersCommand::Show { person_id } => {
            let user = manager.user_by_id(person_id).await?;
            println!("ID:        {}", user.person_id);
            println!("Name:      {}", user.name);
            if let Some(data) = &user.user_data {
                println!("User data: {}", data);
            }
            println!("Faces:     {}", user.persisted_face_ids.len());
            for face_id in &user.persisted_face_ids {
                println!("  {}", face_id);
            }
        }
        UsersCommand::Rename {
            person_id,
            name,
            user_data,
        } => {
            manager
                .rename_user(person_id, name.as_deref(), user_data.as_deref())
                .await?;
            println!("User {} updated", person_id);
        }
        UsersCommand::Remove { person_id } => {
            manager.remove_user(person_id).await?;
            println!("User {} removed", person_id);
        }
    }
    Ok(())
}

async fn connect(client: &FaceClient, group_id: &str) -> Result<UserManager> {
    UserManager::connect(client.clone(), group_id, EnrollConfig::new())
        .await
        .context("Failed to connect to the user group")
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))
}

fn print_faces(faces: &[Face]) {
    if faces.is_empty() {
        println!("No faces detected");
        return;
    }
    println!("Detected {} face(s)", faces.len());
    for (i, face) in faces.iter().enumerate() {
        println!("{}. {}", i + 1, face.describe());
        println!("   rectangle: {}", face.face_rectangle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_image_reads_bytes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("face.jpg");
        std::fs::write(&path, b"jpeg bytes").expect("write test image");

        assert_eq!(read_image(&path).expect("read succeeds"), b"jpeg bytes");
    }

    #[test]
    fn test_read_image_error_names_path() {
        let err = read_image(Path::new("/nonexistent/face.jpg")).expect_err("missing file");
        assert!(err.to_string().contains("/nonexistent/face.jpg"));
    }
}
