use std::collections::VecDeque;

use crate::snapshot::Snapshot;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Manages the snapshots used for undo/redo.
///
/// The undo stack holds at most `limit` entries; committing beyond that drops
/// the oldest one. The redo stack only ever receives entries popped from the
/// undo side, so it stays within the same bound.
#[derive(Debug)]
pub struct SnapshotHistory {
    /// Oldest first, popped from the back
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl SnapshotHistory {
    /// Creates an empty history. A limit of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records the state from before a new edit and invalidates redo history
    pub fn commit(&mut self, before: Snapshot) {
        self.push_undo(before);
        if !self.redo_stack.is_empty() {
            log::debug!("Discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
    }

    /// Pops the most recent undo entry, parking `current` on the redo stack
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Pops the most recent redo entry, parking `current` on the undo stack
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.push_undo(current);
        Some(next)
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
            log::debug!("History limit {} reached, dropped oldest entry", self.limit);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
