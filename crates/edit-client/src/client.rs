use recut_http::HttpClient;
use recut_transcript_edit::{BatchEditService, BoxError, Command, Version};

use crate::error::Error;
use crate::types::{
    BatchEditRequest, CreateProjectAck, CreateProjectRequest, Project, UploadRequest, UploadTicket,
    VideoUrl,
};

/// Client for the project/version backend, generic over the HTTP transport
/// so tests can run against an in-memory fake.
pub struct EditorClient<C> {
    http: C,
}

impl<C: HttpClient> EditorClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// The underlying transport, for callers that need to reach past the
    /// API surface (tests, instrumentation).
    pub fn transport(&self) -> &C {
        &self.http
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        self.get_json("/projects").await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, Error> {
        self.get_json(&format!("/projects/{project_id}")).await
    }

    /// Create a project around an uploaded video (the `video_id` handed out
    /// by [`upload_url`](Self::upload_url)). Transcription starts server
    /// side; poll the project's current version for completion.
    pub async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
        video_id: &str,
    ) -> Result<CreateProjectAck, Error> {
        let request = CreateProjectRequest {
            name: name.to_string(),
            description: description.map(str::to_string),
            video_id: video_id.to_string(),
        };
        self.post_json("/projects", &request).await
    }

    pub async fn list_versions(&self, project_id: &str) -> Result<Vec<Version>, Error> {
        self.get_json(&format!("/projects/{project_id}/versions"))
            .await
    }

    pub async fn get_version(&self, project_id: &str, version_id: &str) -> Result<Version, Error> {
        self.get_json(&format!("/projects/{project_id}/versions/{version_id}"))
            .await
    }

    /// Presigned playback URL for a rendered video.
    pub async fn video_url(&self, video_id: &str) -> Result<VideoUrl, Error> {
        self.get_json(&format!("/videos/{video_id}/url")).await
    }

    /// Negotiate a presigned upload slot for a new source video.
    pub async fn upload_url(&self, file_extension: &str) -> Result<UploadTicket, Error> {
        let request = UploadRequest {
            file_extension: file_extension.to_string(),
        };
        self.post_json("/upload-url", &request).await
    }

    /// Send one atomic batch of word-index commands against a version.
    /// Returns the new version the backend derived from it.
    pub async fn batch_edit(
        &self,
        project_id: &str,
        version_id: &str,
        commands: Vec<Command>,
    ) -> Result<Version, Error> {
        tracing::debug!(count = commands.len(), version_id, "sending batch edit");
        let path = format!("/projects/{project_id}/versions/{version_id}/edit");
        self.post_json(&path, &BatchEditRequest { commands }).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let bytes = self.http.get(path).await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_vec(body)?;
        let bytes = self
            .http
            .post(path, body, "application/json")
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl<C: HttpClient> BatchEditService for EditorClient<C> {
    async fn apply_batch(
        &self,
        project_id: &str,
        version_id: &str,
        commands: Vec<Command>,
    ) -> Result<Version, BoxError> {
        self.batch_edit(project_id, version_id, commands)
            .await
            .map_err(Into::into)
    }
}
