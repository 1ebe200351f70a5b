//! Undo/redo over full view-model snapshots.
//!
//! Two unbounded LIFO stacks. Every user action pushes the pre-change
//! snapshot onto the undo stack and clears the redo stack, so no redo
//! survives a fresh edit. Entries remember whether the action that produced
//! them also queued a pending operation: only those undos drop a log entry.

use crate::types::ViewSnapshot;

#[derive(Debug, Clone)]
struct Entry {
    snapshot: ViewSnapshot,
    logged: bool,
}

#[derive(Debug, Default)]
pub struct HistoryStack {
    undo: Vec<Entry>,
    redo: Vec<Entry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-change state. `logged` marks whether the change also
    /// appended to the operation log (edits and deletes do; speaker renames
    /// and removals are view-only and don't).
    pub fn snapshot_before_change(&mut self, current: ViewSnapshot, logged: bool) {
        self.undo.push(Entry {
            snapshot: current,
            logged,
        });
        self.redo.clear();
    }

    /// Roll back one step. Returns the restored snapshot and whether the
    /// undone action had queued a pending operation, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: ViewSnapshot) -> Option<(ViewSnapshot, bool)> {
        let entry = self.undo.pop()?;
        self.redo.push(Entry {
            snapshot: current,
            logged: entry.logged,
        });
        Some((entry.snapshot, entry.logged))
    }

    /// Roll forward one step, or `None` when there is nothing to redo.
    ///
    /// Redo restores the snapshot only; the operation dropped by the
    /// matching undo is gone for good. The re-pushed undo entry is therefore
    /// tagged as unlogged, so undoing again cannot drop an operation that no
    /// longer exists.
    pub fn redo(&mut self, current: ViewSnapshot) -> Option<ViewSnapshot> {
        let entry = self.redo.pop()?;
        self.undo.push(Entry {
            snapshot: current,
            logged: false,
        });
        Some(entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
