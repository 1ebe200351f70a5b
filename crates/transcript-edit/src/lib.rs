pub mod color;
pub mod history;
pub mod ops;
pub mod segment;
pub mod session;
pub mod types;
pub mod words;

pub use color::{DEFAULT_PALETTE, color_for};
pub use history::HistoryStack;
pub use ops::{Command, EditOperation, EditOperationLog};
pub use segment::{SentenceSpan, TranscriptError, segment, segment_spans, speakers_of, validate};
pub use session::{ApplyOutcome, BatchEditService, BoxError, EditSession, SessionError, SessionState};
pub use types::{ProcessingStatus, Sentence, Speaker, Version, ViewSnapshot, Word};
pub use words::{Selection, WordSpan, index_words, resolve_selection};
