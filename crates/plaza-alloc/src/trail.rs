// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Undo log for corridor loads, corridor capacities and placements.
//!
//! Each decision level owns one frame. Applying a decision records the
//! previous load and capacity of every corridor it touches and remembers the
//! placement in
//! the frame; backtracking replays the frame's entries in reverse and removes
//! the placement. A frame is undone completely regardless of whether the
//! subtree below it produced an allocation.

use crate::{decision::Decision, state::SearchState};
use plaza_model::{index::CorridorIndex, model::Contribution};

/// The load and capacity a corridor had before a contribution was added to
/// it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrailEntry {
    corridor: CorridorIndex,
    old_load: u64,
    old_capacity: u64,
}

impl TrailEntry {
    #[inline]
    pub fn corridor(&self) -> CorridorIndex {
        self.corridor
    }

    #[inline]
    pub fn old_load(&self) -> u64 {
        self.old_load
    }

    #[inline]
    pub fn old_capacity(&self) -> u64 {
        self.old_capacity
    }
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrailEntry(corridor: {}, old_load: {}, old_capacity: {})",
            self.corridor.get(),
            self.old_load,
            self.old_capacity
        )
    }
}

/// Marks where a decision level begins on the trail, and which placement
/// the level committed (none for the root level).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameEntry {
    entry_start_index: usize,
    decision: Option<Decision>,
}

impl FrameEntry {
    #[inline]
    pub fn entry_start_index(&self) -> usize {
        self.entry_start_index
    }

    #[inline]
    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<TrailEntry>,
    frames: Vec<FrameEntry>,
}

impl SearchTrail {
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail that will not reallocate for a problem of this size.
    ///
    /// Every corridor can be touched at most once per level.
    #[inline]
    pub fn preallocated(num_events: usize, num_corridors: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_events.saturating_mul(num_corridors)),
            frames: Vec::with_capacity(num_events.saturating_add(1)),
        }
    }

    #[inline]
    pub fn ensure_capacity(&mut self, num_events: usize, num_corridors: usize) {
        let entry_capacity = num_events.saturating_mul(num_corridors);
        let frame_capacity = num_events.saturating_add(1);

        if self.entries.capacity() < entry_capacity {
            self.entries.reserve(entry_capacity - self.entries.len());
        }
        if self.frames.capacity() < frame_capacity {
            self.frames.reserve(frame_capacity - self.frames.len());
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Opens a new frame at the current end of the trail.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(FrameEntry {
            entry_start_index: self.entries.len(),
            decision: None,
        });
    }

    /// Commits `decision` in the current frame: adds every contribution to
    /// its corridor load, lowers the corridor capacity to the one the venue
    /// declares, and places the event.
    ///
    /// The caller must have checked that no corridor capacity is exceeded.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no frame is open or the frame already holds
    /// a decision.
    pub fn apply(
        &mut self,
        state: &mut SearchState,
        decision: Decision,
        contributions: &[Contribution],
    ) {
        debug_assert!(
            self.frames.last().is_some_and(|f| f.decision.is_none()),
            "called `SearchTrail::apply` without an open frame or on a frame that already holds a decision"
        );

        for contribution in contributions {
            let corridor = contribution.corridor();
            let old_load = state.corridor_load(corridor);
            let old_capacity = state.corridor_capacity(corridor);
            self.entries.push(TrailEntry {
                corridor,
                old_load,
                old_capacity,
            });
            state.set_corridor_load(corridor, old_load.saturating_add(contribution.amount()));
            state.set_corridor_capacity(corridor, old_capacity.min(contribution.capacity()));
        }
        state.assign_next(decision.event(), decision.venue());

        if let Some(frame) = self.frames.last_mut() {
            frame.decision = Some(decision);
        }
    }

    /// Pops the current frame and undoes everything recorded in it.
    pub fn backtrack(&mut self, state: &mut SearchState) {
        let frame = match self.frames.pop() {
            Some(f) => f,
            None => return,
        };

        while self.entries.len() > frame.entry_start_index {
            if let Some(entry) = self.entries.pop() {
                state.set_corridor_load(entry.corridor, entry.old_load);
                state.set_corridor_capacity(entry.corridor, entry.old_capacity);
            }
        }
        if let Some(decision) = frame.decision {
            state.unassign_last(decision.event());
        }
    }

    /// Undoes every frame, returning `state` to where the trail started.
    pub fn clear(&mut self, state: &mut SearchState) {
        while !self.frames.is_empty() {
            self.backtrack(state);
        }
        self.entries.clear();
    }

    /// Forgets all frames without touching any state.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }

    #[inline]
    pub fn iter_entries(&self) -> std::slice::Iter<'_, TrailEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_frames(&self) -> std::slice::Iter<'_, FrameEntry> {
        self.frames.iter()
    }

    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<TrailEntry>()
            + self.frames.capacity() * std::mem::size_of::<FrameEntry>()
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(entries: {}, frames: {})",
            self.entries.len(),
            self.frames.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_model::index::{EventIndex, VenueIndex};

    fn ci(i: usize) -> CorridorIndex {
        CorridorIndex::new(i)
    }

    fn d(e: usize, v: usize) -> Decision {
        Decision::new(EventIndex::new(e), VenueIndex::new(v))
    }

    #[test]
    fn test_apply_records_old_loads() {
        let mut state = SearchState::new(2, 2, 2);
        let mut trail = SearchTrail::new();
        trail.push_frame();
        trail.push_frame();
        trail.apply(
            &mut state,
            d(0, 1),
            &[Contribution::new(ci(0), 30, 60), Contribution::new(ci(1), 7, 9)],
        );

        assert_eq!(state.corridor_loads(), &[30, 7]);
        assert_eq!(state.corridor_capacities(), &[60, 9]);
        assert_eq!(state.num_assigned_events(), 1);
        assert_eq!(trail.num_entries(), 2);
        let olds: Vec<u64> = trail.iter_entries().map(|e| e.old_load()).collect();
        assert_eq!(olds, vec![0, 0]);
        assert!(trail.iter_entries().all(|e| e.old_capacity() == u64::MAX));
        assert_eq!(trail.iter_frames().last().and_then(|f| f.decision()), Some(d(0, 1)));
    }

    #[test]
    fn test_backtrack_restores_loads_and_placement() {
        let mut state = SearchState::new(2, 2, 1);
        let mut trail = SearchTrail::preallocated(2, 1);
        trail.push_frame();

        trail.push_frame();
        trail.apply(&mut state, d(0, 0), &[Contribution::new(ci(0), 30, 100)]);
        trail.push_frame();
        trail.apply(&mut state, d(1, 1), &[Contribution::new(ci(0), 48, 80)]);
        assert_eq!(state.corridor_load(ci(0)), 78);
        assert_eq!(state.corridor_capacity(ci(0)), 80);
        assert!(state.is_complete());

        trail.backtrack(&mut state);
        assert_eq!(state.corridor_load(ci(0)), 30);
        assert_eq!(state.corridor_capacity(ci(0)), 100);
        assert_eq!(state.num_assigned_events(), 1);
        assert!(!state.is_venue_consumed(VenueIndex::new(1)));

        trail.backtrack(&mut state);
        assert_eq!(state.corridor_load(ci(0)), 0);
        assert_eq!(state.corridor_capacity(ci(0)), u64::MAX);
        assert_eq!(state.num_assigned_events(), 0);
        assert_eq!(trail.depth(), 1);

        // Root frame holds no decision.
        trail.backtrack(&mut state);
        assert!(trail.is_empty());
        assert_eq!(trail.num_entries(), 0);
    }

    #[test]
    fn test_placement_without_contributions_is_undone() {
        let mut state = SearchState::new(1, 1, 0);
        let mut trail = SearchTrail::new();
        trail.push_frame();
        trail.apply(&mut state, d(0, 0), &[]);
        assert!(state.is_venue_consumed(VenueIndex::new(0)));

        trail.backtrack(&mut state);
        assert!(!state.is_venue_consumed(VenueIndex::new(0)));
        assert_eq!(state.num_assigned_events(), 0);
    }

    #[test]
    fn test_clear_undoes_all_frames() {
        let initial = SearchState::new(3, 3, 2);
        let mut state = initial.clone();
        let mut trail = SearchTrail::new();
        trail.push_frame();
        for e in 0..3 {
            trail.push_frame();
            trail.apply(
                &mut state,
                d(e, e),
                &[Contribution::new(ci(e % 2), 10 + e as u64, 50 - e as u64)],
            );
        }
        assert_ne!(state, initial);

        trail.clear(&mut state);
        assert_eq!(state, initial);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_backtrack_on_empty_trail_is_noop() {
        let mut state = SearchState::new(1, 1, 1);
        let mut trail = SearchTrail::new();
        trail.backtrack(&mut state);
        assert_eq!(state, SearchState::new(1, 1, 1));
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut trail = SearchTrail::preallocated(4, 4);
        let bytes = trail.allocated_memory_bytes();
        trail.push_frame();
        trail.reset();
        assert!(trail.is_empty());
        assert_eq!(trail.allocated_memory_bytes(), bytes);
        assert_eq!(format!("{}", trail), "SearchTrail(entries: 0, frames: 0)");
    }
}
