//! Keyframe plan builder
//!
//! [`build_plan`] turns an effect, its parameters and the object's rest state
//! into an ordered list of [`KeyframeEntry`]s. It is a pure function: the
//! same inputs always produce the same entries, so re-applying an effect is
//! reproducible.
//!
//! Every non-`None` effect shares the same reveal schedule: hidden on the
//! frame before the start (when there is one), visible from the start.

use glam::{Quat, Vec3};

use crate::animation::keyframe::{Channel, KeyframeEntry};
use crate::animation::params::{AnimationParameters, EffectKind, RestState};
use crate::errors::Result;

/// Ordered keyframe entries for one object, with the frame window they span.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframePlan {
    entries: Vec<KeyframeEntry>,
    start_frame: u32,
    end_frame: u32,
}

impl KeyframePlan {
    fn new(start_frame: u32, end_frame: u32) -> Self {
        Self {
            entries: Vec::with_capacity(8),
            start_frame,
            end_frame,
        }
    }

    fn push(&mut self, entry: KeyframeEntry) {
        debug_assert!(
            self.entries.last().is_none_or(|last| last.frame <= entry.frame),
            "plan entries must be pushed in frame order"
        );
        self.entries.push(entry);
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[KeyframeEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<KeyframeEntry> {
        self.entries
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeyframeEntry> {
        self.entries.iter()
    }

    /// Frame the reveal starts on.
    #[inline]
    #[must_use]
    pub fn start_frame(&self) -> u32 {
        self.start_frame
    }

    /// Frame the object reaches its rest state. May exceed
    /// `start + duration` when an overshoot needed room for its middle key.
    #[inline]
    #[must_use]
    pub fn end_frame(&self) -> u32 {
        self.end_frame
    }

    /// Entries of one channel, in frame order.
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = &KeyframeEntry> {
        self.entries.iter().filter(move |e| e.channel == channel)
    }

    /// The entry of `channel` on `frame`, if any.
    #[must_use]
    pub fn find(&self, channel: Channel, frame: u32) -> Option<&KeyframeEntry> {
        self.entries.iter().find(|e| e.channel == channel && e.frame == frame)
    }
}

impl<'a> IntoIterator for &'a KeyframePlan {
    type Item = &'a KeyframeEntry;
    type IntoIter = std::slice::Iter<'a, KeyframeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Computes the keyframe plan of `effect`.
///
/// `parent_rotation` is the world rotation of the object's parent, if it has
/// one. It only matters for [`EffectKind::FallDown`], whose drop is defined
/// in world space but keyed in the parent's local space.
pub fn build_plan(
    effect: EffectKind,
    params: &AnimationParameters,
    rest: &RestState,
    parent_rotation: Option<Quat>,
) -> Result<KeyframePlan> {
    params.validate()?;

    let start = params.start_frame;
    let end = params.end_frame();

    let plan = match effect {
        EffectKind::None => KeyframePlan::new(start, end),
        EffectKind::GrowFromFloor => {
            let mut plan = KeyframePlan::new(start, end);
            push_reveal(&mut plan, start);
            plan.push(KeyframeEntry::position_z(start, params.floor_offset));
            plan.push(KeyframeEntry::scale(start, Vec3::ZERO));
            plan.push(KeyframeEntry::position_z(end, rest.position.z));
            plan.push(KeyframeEntry::scale(end, rest.scale));
            plan
        }
        EffectKind::GrowOvershoot => {
            let (overshoot, end) = overshoot_frames(params);
            let peak = rest.scale * (1.0 + params.overshoot_amount);

            let mut plan = KeyframePlan::new(start, end);
            push_reveal(&mut plan, start);
            plan.push(KeyframeEntry::position_z(start, params.floor_offset));
            plan.push(KeyframeEntry::scale(start, Vec3::ZERO));
            plan.push(KeyframeEntry::position_z(overshoot, rest.position.z));
            plan.push(KeyframeEntry::scale(overshoot, peak));
            plan.push(KeyframeEntry::position_z(end, rest.position.z));
            plan.push(KeyframeEntry::scale(end, rest.scale));
            plan
        }
        EffectKind::FallDown => {
            let local_fall = local_fall_offset(params.fall_height, parent_rotation);

            let mut plan = KeyframePlan::new(start, end);
            push_reveal(&mut plan, start);
            plan.push(KeyframeEntry::position(start, rest.position + local_fall));
            plan.push(KeyframeEntry::position(end, rest.position));
            plan
        }
    };

    Ok(plan)
}

fn push_reveal(plan: &mut KeyframePlan, start: u32) {
    if start > 0 {
        plan.push(KeyframeEntry::visible(start - 1, false));
    }
    plan.push(KeyframeEntry::visible(start, true));
}

/// Returns `(overshoot_frame, end_frame)` with
/// `start < overshoot_frame < end_frame`.
///
/// A one-frame duration has no frame strictly inside it, so the end is
/// pushed out to `start + 2`. Frames saturate at `u32::MAX`; parameters that
/// pass [`AnimationParameters::validate`] never get there.
#[must_use]
pub fn overshoot_frames(params: &AnimationParameters) -> (u32, u32) {
    let start = params.start_frame;
    let mut end = params.end_frame();
    if end - start < 2 {
        log::debug!(
            "Overshoot over {} frame(s) has no room for a peak key, extending to 2 frames",
            end - start
        );
        end = start.saturating_add(2);
    }

    let duration = end - start;
    let settle = ((duration as f32 * params.overshoot_settle_ratio).floor() as u32).max(1);
    let lo = start.saturating_add(1);
    let hi = end.saturating_sub(1).max(lo);
    let overshoot = end.saturating_sub(settle).clamp(lo, hi);
    (overshoot, end)
}

/// The world-space fall `(0, 0, height)` expressed in the parent's space.
#[must_use]
pub fn local_fall_offset(fall_height: f32, parent_rotation: Option<Quat>) -> Vec3 {
    let world_fall = Vec3::new(0.0, 0.0, fall_height);
    match parent_rotation {
        Some(rotation) => rotation.inverse() * world_fall,
        None => world_fall,
    }
}
