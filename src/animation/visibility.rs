//! Visibility-window propagation
//!
//! Objects that depend on a revealed object (lights parented to it) must
//! not show up before the reveal has finished. Each dependent gets a
//! schedule that keeps it hidden through `[start, end - 1]` and turns it on
//! at `end`.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::animation::keyframe::KeyframeEntry;

/// The hide/show keys of one dependent, in strictly increasing frame order.
pub type VisibilitySchedule = SmallVec<[KeyframeEntry; 4]>;

/// Builds the hide/show schedule for the window `[start, end]`.
///
/// Keys: hidden at `start - 1` (only if `start > 0`), hidden at `start`,
/// hidden at `end - 1`, visible at `end`. A key whose frame is not past the
/// previous one is redundant and skipped, so short windows collapse instead
/// of producing out-of-order frames. `end` is raised to `start + 1` if it
/// does not lie after `start`.
#[must_use]
pub fn visibility_window(start: u32, end: u32) -> VisibilitySchedule {
    let end = end.max(start.saturating_add(1));

    let candidates = [
        start.checked_sub(1).map(|f| (f, false)),
        Some((start, false)),
        Some((end - 1, false)),
        Some((end, true)),
    ];

    let mut schedule = VisibilitySchedule::new();
    for (frame, visible) in candidates.into_iter().flatten() {
        if schedule.last().is_some_and(|last: &KeyframeEntry| frame <= last.frame) {
            continue;
        }
        schedule.push(KeyframeEntry::visible(frame, visible));
    }
    schedule
}

/// Builds the visibility schedule of every dependent for the window
/// `[start, end]`.
pub fn propagate_visibility<K>(dependents: &[K], start: u32, end: u32) -> FxHashMap<K, VisibilitySchedule>
where
    K: Copy + Eq + Hash,
{
    let schedule = visibility_window(start, end);
    dependents.iter().map(|&key| (key, schedule.clone())).collect()
}
