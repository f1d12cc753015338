//! Shared track storage
//!
//! Tracks are owned by the store and referenced by objects through
//! [`TrackKey`]s. A track may be linked to several objects at once, so each
//! slot counts its users. Writers never edit a shared track in place: they
//! call [`TrackStore::acquire_exclusive`], which hands out a private copy on
//! the first write.

use slotmap::SlotMap;

use crate::animation::tracks::AnimationTrack;
use crate::scene::TrackKey;

#[derive(Debug, Clone)]
struct TrackSlot {
    track: AnimationTrack,
    users: u32,
}

#[derive(Debug, Default)]
pub struct TrackStore {
    slots: SlotMap<TrackKey, TrackSlot>,
}

impl TrackStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    /// Creates a track with a single user.
    pub fn create(&mut self, track: AnimationTrack) -> TrackKey {
        self.slots.insert(TrackSlot { track, users: 1 })
    }

    #[must_use]
    pub fn get(&self, key: TrackKey) -> Option<&AnimationTrack> {
        self.slots.get(key).map(|s| &s.track)
    }

    /// Mutable access without any sharing check. Prefer
    /// [`acquire_exclusive`](Self::acquire_exclusive) for writes on behalf
    /// of an object.
    pub fn get_mut(&mut self, key: TrackKey) -> Option<&mut AnimationTrack> {
        self.slots.get_mut(key).map(|s| &mut s.track)
    }

    #[must_use]
    pub fn users(&self, key: TrackKey) -> u32 {
        self.slots.get(key).map_or(0, |s| s.users)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registers one more user of `key`.
    pub fn retain(&mut self, key: TrackKey) -> bool {
        match self.slots.get_mut(key) {
            Some(slot) => {
                slot.users += 1;
                true
            }
            None => false,
        }
    }

    /// Drops one user of `key`; the track is freed with its last user.
    /// Returns `true` if the track was freed.
    pub fn release(&mut self, key: TrackKey) -> bool {
        let Some(slot) = self.slots.get_mut(key) else {
            return false;
        };
        slot.users = slot.users.saturating_sub(1);
        if slot.users == 0 {
            self.slots.remove(key);
            return true;
        }
        false
    }

    /// Returns a track key the caller may write to exclusively.
    ///
    /// - `None` (no track yet): a new empty track named `name` is created.
    /// - A track with one user: returned unchanged.
    /// - A shared track: cloned; the caller's reference moves to the copy
    ///   and the original loses one user.
    pub fn acquire_exclusive(&mut self, current: Option<TrackKey>, name: &str) -> TrackKey {
        let Some(key) = current.filter(|&k| self.slots.contains_key(k)) else {
            return self.create(AnimationTrack::new(name));
        };

        let Some(slot) = self.slots.get_mut(key) else {
            return self.create(AnimationTrack::new(name));
        };
        if slot.users <= 1 {
            return key;
        }

        slot.users -= 1;
        let mut copy = slot.track.clone();
        copy.name = name.to_string();
        log::debug!(
            "Track '{}' is shared by {} other user(s), duplicating as '{}'",
            slot.track.name,
            slot.users,
            name
        );
        self.create(copy)
    }
}
