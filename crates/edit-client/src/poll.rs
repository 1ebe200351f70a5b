//! Version readiness polling.
//!
//! Rendering a version is asynchronous on the backend; after an upload or a
//! batch edit the new version sits in `processing` until the render job
//! finishes. Polling is independent of the editing state machine — the
//! session decides whether a ready result may refresh the view.

use std::time::Duration;

use recut_http::HttpClient;
use recut_transcript_edit::{ProcessingStatus, Version};

use crate::client::EditorClient;
use crate::error::Error;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

impl<C: HttpClient> EditorClient<C> {
    /// Poll a version until the backend finishes rendering it.
    ///
    /// Returns the completed version, or [`Error::VersionFailed`] when the
    /// render job errored. Network errors abort the wait immediately rather
    /// than retrying; the caller owns retry policy.
    pub async fn wait_until_completed(
        &self,
        project_id: &str,
        version_id: &str,
        interval: Duration,
    ) -> Result<Version, Error> {
        loop {
            let version = self.get_version(project_id, version_id).await?;
            match version.status {
                ProcessingStatus::Completed => return Ok(version),
                ProcessingStatus::Failed => {
                    return Err(Error::VersionFailed {
                        id: version.id,
                        message: version
                            .error_message
                            .unwrap_or_else(|| "unknown error".to_string()),
                    });
                }
                ProcessingStatus::Processing => {
                    tracing::debug!(version = %version.id, "version still processing");
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}
