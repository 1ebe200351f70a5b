//! The edit session controller.
//!
//! [`EditSession`] is the single mutator of the view model: it owns the
//! loaded version, the derived sentences and speakers, the pending operation
//! log, and the undo/redo history, and it is the only place that talks to
//! the batch edit boundary. Local mutations are synchronous and total; only
//! `apply_edits` can fail, and its failure is non-destructive.

use std::future::Future;

use crate::history::HistoryStack;
use crate::ops::{Command, EditOperation, EditOperationLog};
use crate::segment::{self, SentenceSpan, TranscriptError};
use crate::types::{Sentence, Speaker, Version, ViewSnapshot};
use crate::words::{self, Selection};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where the session sits relative to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No pending operations.
    Idle,
    /// At least one queued operation.
    Dirty,
    /// A batch request is in flight.
    Applying,
}

/// What `apply_edits` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The batch was accepted and the session reloaded from the new version.
    Applied,
    /// The log was empty; nothing was sent.
    Noop,
    /// A batch was already in flight; this call was ignored.
    InFlight,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("transcript rejected: {0}")]
    InvalidTranscript(#[from] TranscriptError),

    #[error("batch apply failed: {0}")]
    ApplyFailed(#[source] BoxError),

    #[error("no speaker with id {id}")]
    UnknownSpeaker { id: u32 },

    #[error("speaker name {name:?} is already in use")]
    RenameCollision { name: String },
}

/// The batch edit boundary: one atomic request carrying the whole ordered
/// command list, returning the re-rendered version or failing as a unit.
pub trait BatchEditService: Send + Sync {
    fn apply_batch(
        &self,
        project_id: &str,
        version_id: &str,
        commands: Vec<Command>,
    ) -> impl Future<Output = Result<Version, BoxError>> + Send;
}

pub struct EditSession {
    project_id: String,
    version: Version,
    /// Load-time segmentation of the current version. Selection resolution
    /// runs against these original texts and offsets, never against locally
    /// edited sentence text — queued operations address the unedited word
    /// sequence.
    origins: Vec<SentenceSpan>,
    sentences: Vec<Sentence>,
    speakers: Vec<Speaker>,
    selected_speaker: Option<u32>,
    log: EditOperationLog,
    history: HistoryStack,
    state: SessionState,
}

impl EditSession {
    /// Build a session over a freshly loaded version.
    ///
    /// Fails only on a transcript no well-behaved backend produces
    /// (negative or non-monotonic timing); that failure is fatal to the
    /// load.
    pub fn load(project_id: impl Into<String>, version: Version) -> Result<Self, SessionError> {
        segment::validate(&version.transcript)?;

        let origins = segment::segment_spans(&version.transcript);
        let sentences: Vec<Sentence> = origins.iter().map(|s| s.sentence.clone()).collect();
        let speakers = segment::speakers_of(&sentences);

        Ok(Self {
            project_id: project_id.into(),
            version,
            origins,
            sentences,
            speakers,
            selected_speaker: None,
            log: EditOperationLog::new(),
            history: HistoryStack::new(),
            state: SessionState::Idle,
        })
    }

    // ── View accessors ──────────────────────────────────────────────────────

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_speaker(&self) -> Option<u32> {
        self.selected_speaker
    }

    /// Select a speaker to filter by, or `None` for all. Selecting an
    /// unknown id is ignored.
    pub fn select_speaker(&mut self, id: Option<u32>) {
        match id {
            Some(id) if !self.speakers.iter().any(|s| s.id == id) => {}
            _ => self.selected_speaker = id,
        }
    }

    /// The sentence view, filtered by the selected speaker when one is set.
    pub fn filtered_sentences(&self) -> Vec<&Sentence> {
        let name = self
            .selected_speaker
            .and_then(|id| self.speakers.iter().find(|s| s.id == id))
            .map(|s| s.name.clone());

        self.sentences
            .iter()
            .filter(|s| name.as_deref().is_none_or(|n| s.speaker == n))
            .collect()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            sentences: self.sentences.clone(),
            speakers: self.speakers.clone(),
        }
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.log.is_empty()
    }

    pub fn pending_operations(&self) -> &[EditOperation] {
        self.log.list()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Resolve a character selection inside sentence `sentence` (an index
    /// into the load-time segmentation) to global word indices of the
    /// current version's transcript. `None` when the index is out of range.
    pub fn resolve_selection(
        &self,
        sentence: usize,
        sel_start: usize,
        sel_end: usize,
    ) -> Option<Selection> {
        let span = self.origins.get(sentence)?;
        let local = words::resolve_selection(&span.sentence.text, sel_start, sel_end);
        Some(Selection {
            start_word: span.first_word + local.start_word,
            end_word: span.first_word + local.end_word,
        })
    }

    // ── Local mutations ─────────────────────────────────────────────────────

    /// Apply a user edit to sentence `index` and queue `op` for the next
    /// batch. An empty `new_text` removes the sentence locally; removing a
    /// speaker's last sentence removes the speaker too. The server-side
    /// effect is carried entirely by `op`.
    ///
    /// Returns `false` (without mutating anything) when `index` is out of
    /// range or when `op` addresses words outside the current transcript.
    pub fn edit_sentence(&mut self, index: usize, new_text: &str, op: EditOperation) -> bool {
        if index >= self.sentences.len() {
            return false;
        }
        // sole bounds check for I1; selections resolved against the current
        // transcript always pass it
        let (start, end) = op.word_range();
        if start > end || end >= self.version.transcript.len() {
            return false;
        }

        self.history.snapshot_before_change(self.snapshot(), true);
        tracing::debug!(index, range = ?op.word_range(), "queueing operation");

        if new_text.trim().is_empty() {
            let removed = self.sentences.remove(index);
            if !self.sentences.iter().any(|s| s.speaker == removed.speaker) {
                self.remove_speaker_record(&removed.speaker);
            }
        } else {
            self.sentences[index].text = new_text.to_string();
        }

        self.log.append(op);
        self.state = SessionState::Dirty;
        true
    }

    /// Rename a speaker and every sentence carrying the old name. View-only:
    /// nothing is queued for the backend. Renaming to a name another live
    /// speaker holds is rejected.
    pub fn rename_speaker(&mut self, id: u32, new_name: &str) -> Result<(), SessionError> {
        let Some(position) = self.speakers.iter().position(|s| s.id == id) else {
            return Err(SessionError::UnknownSpeaker { id });
        };
        if self
            .speakers
            .iter()
            .any(|s| s.id != id && s.name == new_name)
        {
            return Err(SessionError::RenameCollision {
                name: new_name.to_string(),
            });
        }

        self.history.snapshot_before_change(self.snapshot(), false);

        let old_name = std::mem::replace(&mut self.speakers[position].name, new_name.to_string());
        for sentence in &mut self.sentences {
            if sentence.speaker == old_name {
                sentence.speaker = new_name.to_string();
            }
        }

        Ok(())
    }

    /// Remove a speaker and all of its sentences. View-only, like rename.
    /// Returns `false` when the id is unknown.
    pub fn delete_speaker(&mut self, id: u32) -> bool {
        let Some(position) = self.speakers.iter().position(|s| s.id == id) else {
            return false;
        };

        self.history.snapshot_before_change(self.snapshot(), false);

        let name = self.speakers.remove(position).name;
        self.sentences.retain(|s| s.speaker != name);
        if self.selected_speaker == Some(id) {
            self.selected_speaker = None;
        }

        true
    }

    // ── History ─────────────────────────────────────────────────────────────

    /// Roll the view back one action. When the undone action had queued an
    /// operation, that operation is dropped from the log as well.
    pub fn undo(&mut self) -> bool {
        let Some((snapshot, logged)) = self.history.undo(self.snapshot()) else {
            return false;
        };

        self.restore(snapshot);
        if logged {
            self.log.drop_last();
        }
        if self.log.is_empty() && self.state == SessionState::Dirty {
            self.state = SessionState::Idle;
        }

        true
    }

    /// Roll the view forward one undone action. The operation dropped by the
    /// matching undo is not restored; a redone edit is visible locally but
    /// will not be part of the next batch.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo(self.snapshot()) else {
            return false;
        };

        self.restore(snapshot);
        true
    }

    fn restore(&mut self, snapshot: ViewSnapshot) {
        self.sentences = snapshot.sentences;
        self.speakers = snapshot.speakers;

        if let Some(id) = self.selected_speaker {
            if !self.speakers.iter().any(|s| s.id == id) {
                self.selected_speaker = None;
            }
        }
    }

    fn remove_speaker_record(&mut self, name: &str) {
        if let Some(position) = self.speakers.iter().position(|s| s.name == name) {
            let removed = self.speakers.remove(position);
            if self.selected_speaker == Some(removed.id) {
                self.selected_speaker = None;
            }
        }
    }

    // ── The apply boundary ──────────────────────────────────────────────────

    /// Flush the whole ordered log as one atomic batch.
    ///
    /// An empty log is a no-op. Re-entry while a batch is in flight is
    /// ignored (re-entry can only be observed when a previous apply future
    /// was dropped mid-flight; in-band calls are serialized by `&mut self`).
    ///
    /// On success the authoritative version is replaced, the view is
    /// re-segmented, and the log and both history stacks are cleared. On
    /// failure everything is left untouched so the caller can retry the
    /// exact same batch or keep editing.
    pub async fn apply_edits<S: BatchEditService>(
        &mut self,
        service: &S,
    ) -> Result<ApplyOutcome, SessionError> {
        if self.state == SessionState::Applying {
            return Ok(ApplyOutcome::InFlight);
        }
        if self.log.is_empty() {
            return Ok(ApplyOutcome::Noop);
        }

        self.state = SessionState::Applying;
        let commands = self.log.commands();
        tracing::debug!(
            count = commands.len(),
            version = %self.version.id,
            "applying batch"
        );

        match service
            .apply_batch(&self.project_id, &self.version.id, commands)
            .await
        {
            Ok(new_version) => {
                if let Err(err) = segment::validate(&new_version.transcript) {
                    self.state = SessionState::Dirty;
                    return Err(err.into());
                }
                self.install_version(new_version);
                Ok(ApplyOutcome::Applied)
            }
            Err(err) => {
                tracing::warn!(error = %err, "batch apply failed; pending edits kept");
                self.state = SessionState::Dirty;
                Err(SessionError::ApplyFailed(err))
            }
        }
    }

    /// Refresh the base view from a freshly polled version.
    ///
    /// Only applied while `Idle`: a poll result must never clobber unsaved
    /// local edits, so anything else discards the refresh and reports
    /// `false`.
    pub fn refresh_from(&mut self, version: Version) -> Result<bool, SessionError> {
        if self.state != SessionState::Idle {
            tracing::warn!(state = ?self.state, "discarding poll refresh; local edits pending");
            return Ok(false);
        }

        segment::validate(&version.transcript)?;
        self.install_version(version);
        Ok(true)
    }

    fn install_version(&mut self, version: Version) {
        self.origins = segment::segment_spans(&version.transcript);
        self.sentences = self.origins.iter().map(|s| s.sentence.clone()).collect();
        self.speakers = segment::speakers_of(&self.sentences);
        self.version = version;

        if let Some(id) = self.selected_speaker {
            if !self.speakers.iter().any(|s| s.id == id) {
                self.selected_speaker = None;
            }
        }

        self.log.clear();
        self.history.clear();
        self.state = SessionState::Idle;
    }
}
