/// One recognized word of a version's transcript.
///
/// Position in the transcript vector is the word's canonical index for the
/// lifetime of that version; every queued edit command addresses words by
/// these indices, never by text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct Word {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub speaker: String,
}

/// A derived, speaker-attributed sentence. Never authoritative — rebuilt
/// from the word sequence whenever the version changes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct Sentence {
    pub text: String,
    pub speaker: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// A live speaker. Ids are assigned in first-seen order at segmentation
/// time, starting at 1. Names are unique among live speakers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct Speaker {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Processing,
    Completed,
    Failed,
}

/// Authoritative backend state. Read-only on this side except through the
/// batch-apply boundary, which replaces it wholesale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct Version {
    pub id: String,
    pub status: ProcessingStatus,
    pub transcript: Vec<Word>,
    pub video_id: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// The unit of undo/redo: a full copy of the editable view model.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct ViewSnapshot {
    pub sentences: Vec<Sentence>,
    pub speakers: Vec<Speaker>,
}
