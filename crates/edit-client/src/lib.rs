mod client;
mod error;
mod poll;
mod types;

pub use client::EditorClient;
pub use error::Error;
pub use poll::DEFAULT_POLL_INTERVAL;
pub use types::{
    BatchEditRequest, CreateProjectAck, CreateProjectRequest, Project, UploadRequest, UploadTicket,
    VideoUrl,
};
