use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{BuildupError, Result};
use crate::scene::Transform;

/// The buildup effect applied to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    /// Scales up from nothing while rising from below the floor.
    GrowFromFloor,
    /// Like `GrowFromFloor`, but overshoots the rest scale before settling.
    GrowOvershoot,
    /// Appears above its rest position and drops into place.
    FallDown,
    #[default]
    None,
}

pub const SETTLE_RATIO_MIN: f32 = 0.05;
pub const SETTLE_RATIO_MAX: f32 = 0.5;

/// Timing and shape parameters of a buildup effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParameters {
    pub start_frame: u32,
    /// Length in frames, at least 1.
    pub duration: u32,
    /// Z the object starts at when growing; usually just below the floor.
    pub floor_offset: f32,
    /// Fractional scale overshoot (0.15 peaks at 115%).
    pub overshoot_amount: f32,
    /// Fraction of the duration spent settling back from the overshoot.
    pub overshoot_settle_ratio: f32,
    /// World-space distance above the rest position a fall starts from.
    pub fall_height: f32,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            start_frame: 0,
            duration: 15,
            floor_offset: -0.05,
            overshoot_amount: 0.15,
            overshoot_settle_ratio: 0.3,
            fall_height: 0.5,
        }
    }
}

impl AnimationParameters {
    #[inline]
    #[must_use]
    pub fn end_frame(&self) -> u32 {
        self.start_frame.saturating_add(self.duration)
    }

    /// Checks the ranges every plan relies on.
    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(BuildupError::InvalidParameters("duration must be at least 1 frame".into()));
        }
        // An overshoot may extend a one-frame duration to two.
        if self.start_frame.checked_add(self.duration.max(2)).is_none() {
            return Err(BuildupError::InvalidParameters(format!(
                "start frame {} + duration {} overflows",
                self.start_frame, self.duration
            )));
        }
        let finite = [
            self.floor_offset,
            self.overshoot_amount,
            self.overshoot_settle_ratio,
            self.fall_height,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(BuildupError::InvalidParameters("parameters must be finite".into()));
        }
        if self.overshoot_amount <= 0.0 {
            return Err(BuildupError::InvalidParameters(format!(
                "overshoot amount must be positive, got {}",
                self.overshoot_amount
            )));
        }
        if !(SETTLE_RATIO_MIN..=SETTLE_RATIO_MAX).contains(&self.overshoot_settle_ratio) {
            return Err(BuildupError::InvalidParameters(format!(
                "overshoot settle ratio must lie in [{SETTLE_RATIO_MIN}, {SETTLE_RATIO_MAX}], got {}",
                self.overshoot_settle_ratio
            )));
        }
        if self.fall_height < 0.0 {
            return Err(BuildupError::InvalidParameters(format!(
                "fall height must not be negative, got {}",
                self.fall_height
            )));
        }
        Ok(())
    }
}

/// An object's transform before any buildup keys are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestState {
    pub position: Vec3,
    pub scale: Vec3,
}

impl RestState {
    #[must_use]
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    #[must_use]
    pub fn capture(transform: &Transform) -> Self {
        Self {
            position: transform.position,
            scale: transform.scale,
        }
    }

    /// Writes the rest position and scale back onto `transform`.
    pub fn restore(&self, transform: &mut Transform) {
        transform.position = self.position;
        transform.scale = self.scale;
    }
}
