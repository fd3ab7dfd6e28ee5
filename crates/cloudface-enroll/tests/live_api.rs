//! Live Face API integration tests.
//!
//! These talk to the real service. Set `FACE_API_KEY` (and optionally
//! `FACE_API_ENDPOINT`) before running them with `--ignored`. The
//! detect tests additionally need `FACE_TEST_IMAGE` pointing to a photo
//! with at least one face.

use std::time::Duration;

use cloudface_client::{DetectOptions, FaceClient};
use cloudface_enroll::{EnrollConfig, UserManager};
use uuid::Uuid;

fn live_client() -> FaceClient {
    dotenvy::dotenv().ok();
    FaceClient::from_env().expect("Failed to create Face API client")
}

fn test_image() -> Vec<u8> {
    let path = std::env::var("FACE_TEST_IMAGE")
        .expect("Set FACE_TEST_IMAGE to a photo containing a face");
    std::fs::read(&path).expect("Failed to read test image")
}

fn unique_group_id() -> String {
    format!("cloudface-test-{}", Uuid::new_v4())
}

/// Test person group and person CRUD against the live service.
#[tokio::test]
#[ignore = "requires live Face API credentials"]
async fn test_group_and_person_lifecycle() {
    let client = live_client();
    let group_id = unique_group_id();

    // Create
    client
        .create_person_group(&group_id, "Lifecycle test", None)
        .await
        .expect("Failed to create group");
    println!("Created group: {}", group_id);

    let group = client
        .get_person_group(&group_id)
        .await
        .expect("Failed to fetch group");
    assert_eq!(group.name, "Lifecycle test");

    // Person CRUD
    let person_id = client
        .create_person(&group_id, "Integration Tester", Some("temporary"))
        .await
        .expect("Failed to create person");
    println!("Created person: {}", person_id);

    let person = client
        .get_person(&group_id, person_id)
        .await
        .expect("Failed to fetch person");
    assert_eq!(person.name, "Integration Tester");
    assert_eq!(person.user_data.as_deref(), Some("temporary"));

    client
        .update_person(&group_id, person_id, Some("Renamed Tester"), None)
        .await
        .expect("Failed to update person");
    let renamed = client
        .get_person(&group_id, person_id)
        .await
        .expect("Failed to fetch person");
    assert_eq!(renamed.name, "Renamed Tester");

    let roster = client
        .list_persons(&group_id)
        .await
        .expect("Failed to list persons");
    assert!(roster.iter().any(|p| p.person_id == person_id));

    client
        .delete_person(&group_id, person_id)
        .await
        .expect("Failed to delete person");

    // Cleanup
    client
        .delete_person_group(&group_id)
        .await
        .expect("Failed to delete group");
    println!("Deleted group: {}", group_id);
}

/// Test face detection on a real image.
#[tokio::test]
#[ignore = "requires live Face API credentials"]
async fn test_detect_live() {
    let client = live_client();
    let image = test_image();

    let faces = client
        .detect_faces(&image, &DetectOptions::new().with_landmarks())
        .await
        .expect("Failed to detect faces");

    println!("Detected {} face(s)", faces.len());
    for face in &faces {
        println!("  {} ({})", face.describe(), face.face_rectangle);
    }
    assert!(!faces.is_empty(), "test image should contain a face");
    assert!(faces[0].face_id.is_some());
    assert!(faces[0].face_landmarks.is_some());
}

/// Test the full face-login flow against a throwaway group.
#[tokio::test]
#[ignore = "requires live Face API credentials"]
async fn test_identify_flow_live() {
    let client = live_client();
    let image = test_image();
    let group_id = unique_group_id();

    let config = EnrollConfig::new().with_training_timeout(Duration::from_secs(30));
    let manager = UserManager::connect(client.clone(), group_id.clone(), config)
        .await
        .expect("Failed to connect to group");

    // Nobody enrolled yet, every face must come back unmatched
    let outcome = manager
        .identify_users(&image)
        .await
        .expect("Failed to identify");
    println!(
        "Identified {} face(s), {} matched, training {}",
        outcome.faces.len(),
        outcome.matched_count(),
        outcome.training
    );
    assert_eq!(outcome.matched_count(), 0);

    // Enroll the face on the image and log in again
    let person = manager
        .enroll_user("Live Tester", None, &image, None)
        .await
        .expect("Failed to enroll");
    println!("Enrolled person: {}", person.person_id);

    let outcome = manager
        .identify_users(&image)
        .await
        .expect("Failed to identify after enrollment");
    for face in &outcome.faces {
        match face.person_name() {
            Some(name) => println!("  recognized: {}", name),
            None => println!("  not recognized"),
        }
    }

    // Cleanup
    client
        .delete_person_group(&group_id)
        .await
        .expect("Failed to delete group");
}
