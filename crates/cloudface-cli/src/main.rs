//! CloudFace command-line interface.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use cloudface_client::FaceClient;

#[derive(Parser)]
#[command(
    name = "cloudface",
    version,
    about = "Cloud face detection, emotion recognition and face login"
)]
struct Cli {
    /// Person group ID; defaults to $FACE_GROUP_ID, then "home-users"
    #[arg(short, long, global = true)]
    group: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect faces on an image
    Detect {
        /// Path to the image file
        image: PathBuf,
        /// Include the 27 landmark points
        #[arg(long)]
        landmarks: bool,
        /// Include facial hair in the computed attributes
        #[arg(long)]
        facial_hair: bool,
        /// Attach emotion scores from the emotion endpoint
        #[arg(long)]
        emotions: bool,
    },
    /// Manage the person group
    #[command(subcommand)]
    Group(GroupCommand),
    /// Enroll a new user from a face image
    Enroll {
        /// Display name of the new user
        name: String,
        /// Path to the image file
        image: PathBuf,
        /// Free-form data stored with the user
        #[arg(long)]
        user_data: Option<String>,
    },
    /// Identify enrolled users on an image (face login)
    Identify {
        /// Path to the image file
        image: PathBuf,
    },
    /// Manage enrolled users
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// Create the group if it does not exist
    Init,
    /// Show the group and its training status
    Status,
    /// Train the group and wait for the outcome
    Train,
    /// Delete the group and everyone enrolled in it
    Delete,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List enrolled users
    List,
    /// Show one user in detail
    Show {
        /// Person ID of the user
        person_id: Uuid,
    },
    /// Rename a user or replace their stored data
    Rename {
        /// Person ID of the user
        person_id: Uuid,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New stored data
        #[arg(long)]
        user_data: Option<String>,
    },
    /// Remove a user and their enrolled faces
    Remove {
        /// Person ID of the user
        person_id: Uuid,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for command output.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let ansi = std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(ansi)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(env_filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = FaceClient::from_env().context("Face API configuration")?;
    let group_id = resolve_group(cli.group);

    match cli.command {
        Commands::Detect {
            image,
            landmarks,
            facial_hair,
            emotions,
        } => commands::detect(&client, &image, landmarks, facial_hair, emotions).await,
        Commands::Group(cmd) => commands::group(&client, &group_id, cmd).await,
        Commands::Enroll {
            name,
            image,
            user_data,
        } => commands::enroll(&client, &group_id, &name, user_data.as_deref(), &image).await,
        Commands::Identify { image } => commands::identify(&client, &group_id, &image).await,
        Commands::Users(cmd) => commands::users(&client, &group_id, cmd).await,
    }
}

fn resolve_group(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("FACE_GROUP_ID").ok())
        .unwrap_or_else(|| "home-users".to_string())
}
