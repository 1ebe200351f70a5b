use chrono::{DateTime, Utc};
use recut_transcript_edit::Command;

/// A user project. The backend tracks its versions; the editor only ever
/// works against `current_version_id`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub current_version_id: String,
    pub created_at: DateTime<Utc>,
}

/// Body of the batch edit endpoint: the full ordered command list, applied
/// atomically against one version.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BatchEditRequest {
    pub commands: Vec<Command>,
}

/// Body of project creation: ties an uploaded video to a new project. The
/// backend seeds an empty processing version and starts transcribing.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub video_id: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateProjectAck {
    pub success: bool,
}

/// Upload negotiation: the backend only accepts `mp4`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadRequest {
    pub file_extension: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UploadTicket {
    pub upload_url: String,
    pub video_id: String,
}

/// Presigned playback URL for a rendered video.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct VideoUrl {
    pub url: String,
}
