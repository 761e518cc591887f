//! Core data structures for the rhythm pattern engine
//!
//! This module defines the pattern representation and its four edit
//! mutators:
//!
//! - [`RhythmPatternNote`]: one (duration, cluster) pair
//! - [`RhythmPattern`]: leading rest + ordered note sequence, with
//!   cluster bookkeeping derived from the notes themselves
//!
//! Every mutator is a complete, self-contained transaction: it either
//! applies fully and returns a positive edit cost, or rejects invalid
//! input as a silent no-op with cost 0. The cost functions live here as
//! pure methods so the aligner charges exactly what the mutators would.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::errors::PatternError;
use crate::undo::OperationInfo;

/// Sixteenth-note ticks per quarter note; a whole note is 16 ticks.
pub const TICKS_PER_QUARTER: i32 = 4;

/// Flat charge when a replace changes which cluster a note references.
pub const PITCH_CHANGE_COST: u32 = 4;

/// Flat charge when an edit changes the live-cluster rank order: a
/// brand-new cluster appears, or the last reference to one disappears.
pub const RANK_DISRUPTION_COST: u32 = 8;

/// A single note: a duration in sixteenth-note ticks and an opaque
/// pitch-cluster label.
///
/// Equal cluster ids mean "the same relative pitch"; the id is never an
/// absolute MIDI value. Valid notes have `duration >= 1`; the duration-0
/// value exists only as the [`RhythmPatternNote::NONE`] sentinel inside
/// operation descriptors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RhythmPatternNote {
    /// Duration in sixteenth-note ticks (quarter note = 4)
    pub duration: i32,

    /// Relative pitch-cluster label (opaque, signed)
    pub cluster_id: i32,
}

impl RhythmPatternNote {
    /// The "absent note" sentinel used by operation descriptors when an
    /// operation has no before/after note (e.g. Insert has no before).
    pub const NONE: RhythmPatternNote = RhythmPatternNote {
        duration: 0,
        cluster_id: 0,
    };

    /// Create a new note
    pub fn new(duration: i32, cluster_id: i32) -> Self {
        Self {
            duration,
            cluster_id,
        }
    }

    /// Whether this is the absent-note sentinel
    pub fn is_none(&self) -> bool {
        self.duration == 0
    }

    /// Whether this note may appear in a pattern (`duration >= 1`)
    pub fn is_valid(&self) -> bool {
        self.duration >= 1
    }
}

/// A monophonic rhythmic contour: a leading rest followed by notes in
/// playback order.
///
/// The live cluster set is the set of distinct cluster ids referenced
/// by at least one note; rank order is the ascending numeric order of
/// those ids (ids are relative pitches). Clusters are never deleted
/// explicitly; one goes dead when its last referencing note is removed,
/// and the cost model charges that transition as a rank adjustment.
///
/// `Clone` is the deep-copy operation: a clone shares nothing with the
/// original and may be mutated or handed to another thread freely.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct RhythmPattern {
    /// Duration of silence before the first note, in ticks (>= 0)
    pub leading_rest: i32,

    /// Notes in playback order; every entry has `duration >= 1`
    pub notes: Vec<RhythmPatternNote>,
}

impl RhythmPattern {
    /// Create an empty pattern (zero rest, no notes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pattern from an explicit note list.
    ///
    /// Invalid notes (duration < 1) are discarded with a warning; a
    /// negative leading rest is clamped to 0.
    pub fn from_notes(leading_rest: i32, notes: Vec<RhythmPatternNote>) -> Self {
        let kept: Vec<RhythmPatternNote> = notes
            .into_iter()
            .filter(|n| {
                if !n.is_valid() {
                    log::warn!("discarding note with duration {} (must be >= 1)", n.duration);
                }
                n.is_valid()
            })
            .collect();

        Self {
            leading_rest: leading_rest.max(0),
            notes: kept,
        }
    }

    /// Number of notes in the pattern
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the pattern has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note at `index`, if in range
    pub fn note(&self, index: usize) -> Option<&RhythmPatternNote> {
        self.notes.get(index)
    }

    /// Leading rest plus the sum of all note durations, in ticks
    pub fn total_duration(&self) -> i32 {
        self.leading_rest + self.notes.iter().map(|n| n.duration).sum::<i32>()
    }

    // ------------------------------------------------------------------
    // Cluster bookkeeping
    // ------------------------------------------------------------------

    /// The live cluster set, in rank (ascending id) order
    pub fn live_clusters(&self) -> BTreeSet<i32> {
        self.notes.iter().map(|n| n.cluster_id).collect()
    }

    /// How many notes currently reference `cluster_id`
    fn cluster_refcount(&self, cluster_id: i32) -> usize {
        self.notes
            .iter()
            .filter(|n| n.cluster_id == cluster_id)
            .count()
    }

    /// The cluster id of the note at `index`, for callers who want to
    /// reuse an existing pitch class rather than allocate a new one.
    pub fn get_existing_cluster_number(&self, index: usize) -> Option<i32> {
        self.notes.get(index).map(|n| n.cluster_id)
    }

    /// Allocate a cluster id distinct from every live id, ranked as
    /// close as possible to the cluster of the note at `reference_index`
    /// (a freshly introduced pitch is one relative step away from its
    /// context note whenever that id is free; otherwise the nearest free
    /// id is used, probing +1, -1, +2, -2, ...).
    ///
    /// With an out-of-range `reference_index` the id is ranked at the
    /// top extreme: one above the current maximum live id, or 0 for an
    /// empty pattern.
    pub fn get_new_cluster_number(&self, reference_index: usize) -> i32 {
        let live = self.live_clusters();

        match self.notes.get(reference_index) {
            Some(reference) => {
                let base = reference.cluster_id;
                for step in 1.. {
                    if !live.contains(&(base + step)) {
                        return base + step;
                    }
                    if !live.contains(&(base - step)) {
                        return base - step;
                    }
                }
                unreachable!("live cluster set is finite")
            }
            None => match live.iter().next_back() {
                Some(max) => max + 1,
                None => 0,
            },
        }
    }

    // ------------------------------------------------------------------
    // Cost functions
    //
    // Pure, shared between the mutators and the aligner so the two can
    // never disagree on what an edit costs. Callers of the index-taking
    // functions guarantee the index is in range.
    // ------------------------------------------------------------------

    /// Length component of an edit cost: the note's duration in ticks
    /// (inserting a whole note pays 16, a sixteenth pays 1).
    pub(crate) fn length_cost(note: &RhythmPatternNote) -> u32 {
        note.duration.unsigned_abs()
    }

    /// Cost of adjusting the leading rest between two lengths
    pub(crate) fn rest_cost(old: i32, new: i32) -> u32 {
        old.abs_diff(new)
    }

    /// Cost of inserting `note`: length plus a rank charge if the
    /// note's cluster is not yet live. Reusing a live cluster is the
    /// cheap case.
    pub(crate) fn insert_cost(&self, note: &RhythmPatternNote) -> u32 {
        let rank = if self.cluster_refcount(note.cluster_id) == 0 {
            RANK_DISRUPTION_COST
        } else {
            0
        };
        Self::length_cost(note) + rank
    }

    /// Cost of deleting the note at `index`: length plus a rank charge
    /// if this is the last reference to its cluster (the cluster goes
    /// dead and the remaining ranks renumber).
    pub(crate) fn delete_cost(&self, index: usize) -> u32 {
        let note = &self.notes[index];
        let rank = if self.cluster_refcount(note.cluster_id) == 1 {
            RANK_DISRUPTION_COST
        } else {
            0
        };
        Self::length_cost(note) + rank
    }

    /// Cost of replacing the note at `index` with `new_note`: 0 when
    /// the notes are equal, otherwise the summed duration-change,
    /// pitch-identity, and rank-disruption components. The first note
    /// never pays the rank component (no preceding context to disturb).
    pub(crate) fn replace_cost(&self, index: usize, new_note: &RhythmPatternNote) -> u32 {
        let old = &self.notes[index];
        if old == new_note {
            return 0;
        }

        let mut cost = old.duration.abs_diff(new_note.duration);

        if old.cluster_id != new_note.cluster_id {
            cost += PITCH_CHANGE_COST;

            if index != 0 {
                let introduces_cluster = self.cluster_refcount(new_note.cluster_id) == 0;
                let retires_cluster = self.cluster_refcount(old.cluster_id) == 1;
                if introduces_cluster || retires_cluster {
                    cost += RANK_DISRUPTION_COST;
                }
            }
        }

        cost
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Insert `note` so it becomes the element at `index`; an index past
    /// the end is clamped to the end (effectively append). A note with
    /// duration < 1 is rejected as a no-op with cost 0.
    pub fn insert_note(&mut self, index: usize, note: RhythmPatternNote) -> u32 {
        if !note.is_valid() {
            log::warn!("insert rejected: duration {} must be >= 1", note.duration);
            return 0;
        }

        let index = index.min(self.notes.len());
        let cost = self.insert_cost(&note);
        self.notes.insert(index, note);
        cost
    }

    /// Remove the note at `index`; an out-of-range index is a no-op with
    /// cost 0.
    pub fn delete_note(&mut self, index: usize) -> u32 {
        if index >= self.notes.len() {
            log::warn!(
                "delete rejected: index {} out of range for {} notes",
                index,
                self.notes.len()
            );
            return 0;
        }

        let cost = self.delete_cost(index);
        self.notes.remove(index);
        cost
    }

    /// Substitute the note at `index` with `new_note`. Replacing a note
    /// with itself costs 0 and changes nothing; an out-of-range index or
    /// a note with duration < 1 is a no-op with cost 0.
    pub fn replace_note(&mut self, index: usize, new_note: RhythmPatternNote) -> u32 {
        if index >= self.notes.len() {
            log::warn!(
                "replace rejected: index {} out of range for {} notes",
                index,
                self.notes.len()
            );
            return 0;
        }
        if !new_note.is_valid() {
            log::warn!("replace rejected: duration {} must be >= 1", new_note.duration);
            return 0;
        }

        let cost = self.replace_cost(index, &new_note);
        self.notes[index] = new_note;
        cost
    }

    /// Set the leading rest; a negative length is a no-op with cost 0.
    /// Never touches the notes or the cluster bookkeeping; rests carry
    /// no pitch information.
    pub fn delay_notes(&mut self, new_leading_rest: i32) -> u32 {
        if new_leading_rest < 0 {
            log::warn!("delay rejected: leading rest {} is negative", new_leading_rest);
            return 0;
        }

        let cost = Self::rest_cost(self.leading_rest, new_leading_rest);
        self.leading_rest = new_leading_rest;
        cost
    }

    /// Apply a reified operation descriptor. Behaviorally identical to
    /// calling the corresponding mutator directly: same resulting
    /// pattern, same cost.
    pub fn perform_operation(&mut self, op: &OperationInfo) -> u32 {
        op.apply(self)
    }

    // ------------------------------------------------------------------
    // Strict variants
    //
    // Same behavior for valid input; invalid input surfaces an error
    // instead of silently costing 0.
    // ------------------------------------------------------------------

    /// Strict [`Self::insert_note`]: out-of-range index (> len) and
    /// invalid duration are errors rather than clamp/no-op.
    pub fn try_insert_note(
        &mut self,
        index: usize,
        note: RhythmPatternNote,
    ) -> Result<u32, PatternError> {
        if !note.is_valid() {
            return Err(PatternError::InvalidDuration(note.duration));
        }
        if index > self.notes.len() {
            return Err(PatternError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        Ok(self.insert_note(index, note))
    }

    /// Strict [`Self::delete_note`]
    pub fn try_delete_note(&mut self, index: usize) -> Result<u32, PatternError> {
        if index >= self.notes.len() {
            return Err(PatternError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        Ok(self.delete_note(index))
    }

    /// Strict [`Self::replace_note`]
    pub fn try_replace_note(
        &mut self,
        index: usize,
        new_note: RhythmPatternNote,
    ) -> Result<u32, PatternError> {
        if index >= self.notes.len() {
            return Err(PatternError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        if !new_note.is_valid() {
            return Err(PatternError::InvalidDuration(new_note.duration));
        }
        Ok(self.replace_note(index, new_note))
    }

    /// Strict [`Self::delay_notes`]
    pub fn try_delay_notes(&mut self, new_leading_rest: i32) -> Result<u32, PatternError> {
        if new_leading_rest < 0 {
            return Err(PatternError::NegativeRest(new_leading_rest));
        }
        Ok(self.delay_notes(new_leading_rest))
    }

    /// Strict [`Self::perform_operation`]
    pub fn try_perform_operation(&mut self, op: &OperationInfo) -> Result<u32, PatternError> {
        op.try_apply(self)
    }
}
