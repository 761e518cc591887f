//! Reified edit operations
//!
//! An [`OperationInfo`] describes one structural edit without performing
//! it, carrying enough state (the before/after notes, the old/new rest
//! lengths) to be logged, serialized, replayed, and inverted. Applying a
//! descriptor through [`OperationInfo::apply`] is behaviorally identical
//! to calling the named mutator on [`RhythmPattern`] directly.
//!
//! [`EditLog`] is a bounded undo/redo history over applied descriptors.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::models::core::{RhythmPattern, RhythmPatternNote};
use crate::models::errors::PatternError;

/// One reversible edit, tagged by kind.
///
/// Variants carry only the fields they need; the [`Self::before`] and
/// [`Self::after`] accessors fill the gaps with the
/// [`RhythmPatternNote::NONE`] sentinel (Insert has no before, Delete no
/// after). The serialized form is `{kind, index, before/after, ...}`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum OperationInfo {
    /// Insert `after` so it becomes the note at `index`
    Insert {
        index: usize,
        after: RhythmPatternNote,
    },
    /// Delete the note at `index`; `before` is the removed note, kept
    /// for inversion
    Delete {
        index: usize,
        before: RhythmPatternNote,
    },
    /// Replace the note at `index`
    Replace {
        index: usize,
        before: RhythmPatternNote,
        after: RhythmPatternNote,
    },
    /// Set the leading rest from `old_length` to `new_length`
    AdjustLeadingRest { old_length: i32, new_length: i32 },
}

impl OperationInfo {
    /// Descriptor for inserting `note` at `index`
    pub fn insert(index: usize, note: RhythmPatternNote) -> Self {
        OperationInfo::Insert { index, after: note }
    }

    /// Descriptor for deleting the note `pattern` currently holds at
    /// `index`, snapshotting it for inversion. `None` if out of range.
    pub fn delete(pattern: &RhythmPattern, index: usize) -> Option<Self> {
        pattern.note(index).map(|&before| OperationInfo::Delete { index, before })
    }

    /// Descriptor for replacing the note at `index` with `new_note`,
    /// snapshotting the current note for inversion. `None` if out of
    /// range.
    pub fn replace(
        pattern: &RhythmPattern,
        index: usize,
        new_note: RhythmPatternNote,
    ) -> Option<Self> {
        pattern.note(index).map(|&before| OperationInfo::Replace {
            index,
            before,
            after: new_note,
        })
    }

    /// Descriptor for setting `pattern`'s leading rest to `new_length`
    pub fn adjust_leading_rest(pattern: &RhythmPattern, new_length: i32) -> Self {
        OperationInfo::AdjustLeadingRest {
            old_length: pattern.leading_rest,
            new_length,
        }
    }

    /// Target note index (0 for AdjustLeadingRest, which has none)
    pub fn index(&self) -> usize {
        match self {
            OperationInfo::Insert { index, .. }
            | OperationInfo::Delete { index, .. }
            | OperationInfo::Replace { index, .. } => *index,
            OperationInfo::AdjustLeadingRest { .. } => 0,
        }
    }

    /// The note this operation removes or overwrites;
    /// [`RhythmPatternNote::NONE`] where the variant has none
    pub fn before(&self) -> RhythmPatternNote {
        match self {
            OperationInfo::Insert { .. } | OperationInfo::AdjustLeadingRest { .. } => {
                RhythmPatternNote::NONE
            }
            OperationInfo::Delete { before, .. } | OperationInfo::Replace { before, .. } => *before,
        }
    }

    /// The note this operation introduces;
    /// [`RhythmPatternNote::NONE`] where the variant has none
    pub fn after(&self) -> RhythmPatternNote {
        match self {
            OperationInfo::Delete { .. } | OperationInfo::AdjustLeadingRest { .. } => {
                RhythmPatternNote::NONE
            }
            OperationInfo::Insert { after, .. } | OperationInfo::Replace { after, .. } => *after,
        }
    }

    /// The descriptor that undoes this one: Insert and Delete swap at
    /// the same index, Replace swaps before/after, AdjustLeadingRest
    /// swaps lengths. Applying an operation and then its inverse
    /// restores the exact prior pattern; the two costs are independent.
    pub fn inverse(&self) -> Self {
        match *self {
            OperationInfo::Insert { index, after } => OperationInfo::Delete {
                index,
                before: after,
            },
            OperationInfo::Delete { index, before } => OperationInfo::Insert {
                index,
                after: before,
            },
            OperationInfo::Replace {
                index,
                before,
                after,
            } => OperationInfo::Replace {
                index,
                before: after,
                after: before,
            },
            OperationInfo::AdjustLeadingRest {
                old_length,
                new_length,
            } => OperationInfo::AdjustLeadingRest {
                old_length: new_length,
                new_length: old_length,
            },
        }
    }

    /// Apply this operation to `pattern`, dispatching to the equivalent
    /// mutator. Same resulting pattern, same cost.
    pub fn apply(&self, pattern: &mut RhythmPattern) -> u32 {
        match *self {
            OperationInfo::Insert { index, after } => pattern.insert_note(index, after),
            OperationInfo::Delete { index, .. } => pattern.delete_note(index),
            OperationInfo::Replace { index, after, .. } => pattern.replace_note(index, after),
            OperationInfo::AdjustLeadingRest { new_length, .. } => pattern.delay_notes(new_length),
        }
    }

    /// Strict [`Self::apply`], mirroring the pattern's `try_*` mutators
    pub fn try_apply(&self, pattern: &mut RhythmPattern) -> Result<u32, PatternError> {
        match *self {
            OperationInfo::Insert { index, after } => pattern.try_insert_note(index, after),
            OperationInfo::Delete { index, .. } => pattern.try_delete_note(index),
            OperationInfo::Replace { index, after, .. } => pattern.try_replace_note(index, after),
            OperationInfo::AdjustLeadingRest { new_length, .. } => {
                pattern.try_delay_notes(new_length)
            }
        }
    }

    /// Serialize to the JSON wire/persistence shape
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from the JSON wire/persistence shape
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Bounded undo/redo history of applied operations.
///
/// Operations recorded here are assumed to have been applied in order;
/// `undo` applies inverses walking backwards, `redo` reapplies walking
/// forwards. Pushing a new operation truncates any redo tail, and the
/// oldest entries are dropped once `max_size` is exceeded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EditLog {
    operations: VecDeque<OperationInfo>,
    current_index: usize,
    max_size: usize,
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new(100)
    }
}

impl EditLog {
    /// Create a log keeping at most `max_size` operations
    pub fn new(max_size: usize) -> Self {
        Self {
            operations: VecDeque::new(),
            current_index: 0,
            max_size,
        }
    }

    /// Apply `op` to `pattern` and record it, returning the edit cost.
    ///
    /// Only effective operations are recorded: a no-op (rejected input,
    /// or an edit that leaves the pattern as it was) is not pushed, so
    /// undo never applies the inverse of an edit that never happened.
    /// An insert whose index was clamped is recorded at its effective
    /// index so its inverse deletes the right note.
    pub fn apply(&mut self, pattern: &mut RhythmPattern, op: OperationInfo) -> u32 {
        let recorded = match op {
            OperationInfo::Insert { index, after } => OperationInfo::Insert {
                index: index.min(pattern.len()),
                after,
            },
            other => other,
        };

        let before = pattern.clone();
        let cost = recorded.apply(pattern);
        if *pattern != before {
            self.push_applied(recorded);
        }
        cost
    }

    /// Record an operation the caller already applied elsewhere
    pub fn push_applied(&mut self, op: OperationInfo) {
        // Truncate any redo history when a new operation is added
        self.operations.truncate(self.current_index);
        self.operations.push_back(op);
        self.current_index = self.operations.len();

        // Enforce max size
        if self.operations.len() > self.max_size {
            self.operations.pop_front();
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Undo the most recent operation against `pattern`, returning the
    /// cost of the inverse edit, or `None` if there is nothing to undo.
    pub fn undo(&mut self, pattern: &mut RhythmPattern) -> Option<u32> {
        if !self.can_undo() {
            return None;
        }

        self.current_index -= 1;
        let inverse = self.operations[self.current_index].inverse();
        Some(inverse.apply(pattern))
    }

    /// Reapply the most recently undone operation against `pattern`,
    /// returning its cost, or `None` if there is nothing to redo.
    pub fn redo(&mut self, pattern: &mut RhythmPattern) -> Option<u32> {
        if !self.can_redo() {
            return None;
        }

        let op = self.operations[self.current_index];
        self.current_index += 1;
        Some(op.apply(pattern))
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.current_index < self.operations.len()
    }

    /// Number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.current_index
    }

    /// Number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.operations.len() - self.current_index
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.operations.clear();
        self.current_index = 0;
    }
}
