//! Pending edit operations, addressed in word-index coordinates.
//!
//! Indices always refer to the original, unedited word sequence of the
//! version they were created against. They are never renumbered as later
//! operations queue up; the backend replays the batch in order against that
//! fixed coordinate space.

/// One pending operation against the current version's word sequence.
///
/// Modeled as a sum type rather than an optional-field struct so every
/// consumer is forced to handle both cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    Edit {
        start_word_index: usize,
        end_word_index: usize,
        new_text: String,
    },
    Delete {
        start_word_index: usize,
        end_word_index: usize,
    },
}

impl EditOperation {
    pub fn word_range(&self) -> (usize, usize) {
        match self {
            Self::Edit {
                start_word_index,
                end_word_index,
                ..
            }
            | Self::Delete {
                start_word_index,
                end_word_index,
            } => (*start_word_index, *end_word_index),
        }
    }
}

/// Flat wire shape of one batch command.
///
/// Presence of `new_text` (including an empty string) marks an edit; its
/// absence marks a deletion. This is the contract of the batch edit
/// endpoint, so deletes must serialize without the key at all.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, specta::Type)]
pub struct Command {
    pub start_word_index: usize,
    pub end_word_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
}

impl From<&EditOperation> for Command {
    fn from(op: &EditOperation) -> Self {
        match op {
            EditOperation::Edit {
                start_word_index,
                end_word_index,
                new_text,
            } => Self {
                start_word_index: *start_word_index,
                end_word_index: *end_word_index,
                new_text: Some(new_text.clone()),
            },
            EditOperation::Delete {
                start_word_index,
                end_word_index,
            } => Self {
                start_word_index: *start_word_index,
                end_word_index: *end_word_index,
                new_text: None,
            },
        }
    }
}

impl From<Command> for EditOperation {
    fn from(command: Command) -> Self {
        match command.new_text {
            Some(new_text) => Self::Edit {
                start_word_index: command.start_word_index,
                end_word_index: command.end_word_index,
                new_text,
            },
            None => Self::Delete {
                start_word_index: command.start_word_index,
                end_word_index: command.end_word_index,
            },
        }
    }
}

/// Ordered list of pending operations, keyed to the current version.
///
/// Append-only between flushes; `drop_last` exists solely for undo. Bounds
/// checking happens at the selection boundary, not here — indices arrive
/// from a live resolution against the current transcript.
#[derive(Debug, Clone, Default)]
pub struct EditOperationLog {
    ops: Vec<EditOperation>,
}

impl EditOperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, op: EditOperation) {
        self.ops.push(op);
    }

    pub fn drop_last(&mut self) -> Option<EditOperation> {
        self.ops.pop()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn list(&self) -> &[EditOperation] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Serialize the whole log, in order, into wire commands.
    pub fn commands(&self) -> Vec<Command> {
        self.ops.iter().map(Command::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_serializes_without_new_text_key() {
        let command = Command::from(&EditOperation::Delete {
            start_word_index: 2,
            end_word_index: 4,
        });
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start_word_index": 2, "end_word_index": 4})
        );
    }

    #[test]
    fn edit_with_empty_text_keeps_the_key() {
        let command = Command::from(&EditOperation::Edit {
            start_word_index: 0,
            end_word_index: 0,
            new_text: String::new(),
        });
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["new_text"], serde_json::json!(""));
    }

    #[test]
    fn command_round_trips_through_operation() {
        let op = EditOperation::Edit {
            start_word_index: 1,
            end_word_index: 3,
            new_text: "friend".into(),
        };
        assert_eq!(EditOperation::from(Command::from(&op)), op);
    }

    #[test]
    fn log_preserves_order_and_drops_from_the_tail() {
        let mut log = EditOperationLog::new();
        log.append(EditOperation::Delete {
            start_word_index: 0,
            end_word_index: 1,
        });
        log.append(EditOperation::Edit {
            start_word_index: 5,
            end_word_index: 5,
            new_text: "x".into(),
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.list()[0].word_range(), (0, 1));

        let dropped = log.drop_last().unwrap();
        assert_eq!(dropped.word_range(), (5, 5));
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(log.is_empty());
        assert!(log.drop_last().is_none());
    }
}
