//! Buildup Settings & Per-Object Configuration
//!
//! [`BuildupSettings`] is the configuration surface of one object: which
//! effect to apply, its timing, and the parameters of lights created from
//! that object's vertices. [`ConfigStore`] keeps one settings record per
//! object, keyed by [`ObjectKey`], together with the object's place in the
//! effect lifecycle.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use buildup::settings::{BuildupSettings, ConfigStore};
//! use buildup::animation::EffectKind;
//!
//! let mut configs = ConfigStore::new();
//! configs.set(cube, BuildupSettings {
//!     effect_type: EffectKind::GrowOvershoot,
//!     enabled: true,
//!     start_frame: 10,
//!     ..Default::default()
//! });
//!
//! // Presets can also be loaded from JSON.
//! let preset = BuildupSettings::from_json(r#"{ "effect_type": "FALL_DOWN", "enabled": true }"#)?;
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::params::{SETTLE_RATIO_MAX, SETTLE_RATIO_MIN};
use crate::animation::{AnimationParameters, EffectKind};
use crate::errors::Result;
use crate::lighting::ColorTemp;
use crate::scene::ObjectKey;

// ---------------------------------------------------------------------------
// BuildupSettings
// ---------------------------------------------------------------------------

/// Per-object buildup configuration.
///
/// Missing fields in a JSON preset take their [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildupSettings {
    pub effect_type: EffectKind,
    /// Apply refuses to run on a disabled configuration.
    pub enabled: bool,
    pub start_frame: u32,
    /// Number of frames for the animation (15 is ~0.5s at 30fps).
    pub duration: u32,
    /// Distance below z = 0 where a growing object starts.
    pub floor_offset: f32,
    /// Fractional scale overshoot of `GrowOvershoot`.
    pub overshoot_amount: f32,
    /// Fraction of the duration `GrowOvershoot` spends settling.
    pub overshoot_settle_ratio: f32,
    /// Distance above the final position a `FallDown` starts from.
    pub fall_height: f32,
    /// Distance a generated area light sits off the surface.
    pub light_offset: f32,
    /// Power of generated lights, in watts.
    pub light_intensity: f32,
    pub light_color_temp: ColorTemp,
}

impl Default for BuildupSettings {
    fn default() -> Self {
        let params = AnimationParameters::default();
        Self {
            effect_type: EffectKind::None,
            enabled: false,
            start_frame: params.start_frame,
            duration: params.duration,
            floor_offset: params.floor_offset,
            overshoot_amount: params.overshoot_amount,
            overshoot_settle_ratio: params.overshoot_settle_ratio,
            fall_height: params.fall_height,
            light_offset: 0.1,
            light_intensity: 50.0,
            light_color_temp: ColorTemp::Neutral,
        }
    }
}

impl BuildupSettings {
    /// The timing and shape parameters consumed by the plan builder.
    #[must_use]
    pub fn parameters(&self) -> AnimationParameters {
        AnimationParameters {
            start_frame: self.start_frame,
            duration: self.duration,
            floor_offset: self.floor_offset,
            overshoot_amount: self.overshoot_amount,
            overshoot_settle_ratio: self.overshoot_settle_ratio,
            fall_height: self.fall_height,
        }
    }

    /// Clamps every field into its valid range, replacing non-finite values
    /// with defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        Self {
            duration: self.duration.max(1),
            floor_offset: finite_or(self.floor_offset, defaults.floor_offset),
            overshoot_amount: finite_or(self.overshoot_amount, defaults.overshoot_amount).max(f32::EPSILON),
            overshoot_settle_ratio: finite_or(self.overshoot_settle_ratio, defaults.overshoot_settle_ratio)
                .clamp(SETTLE_RATIO_MIN, SETTLE_RATIO_MAX),
            fall_height: finite_or(self.fall_height, defaults.fall_height).max(0.0),
            light_offset: finite_or(self.light_offset, defaults.light_offset),
            light_intensity: finite_or(self.light_intensity, defaults.light_intensity).max(0.0),
            ..self
        }
    }

    /// Parses a JSON preset. Out-of-range values are clamped.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Where an object stands in the buildup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectLifecycle {
    /// No settings recorded for the object.
    Unconfigured,
    /// Settings exist; no plan of ours is active on the object.
    Configured { enabled: bool },
    /// A plan has been written to the object's track.
    Applied,
}

#[derive(Debug, Clone, Default)]
struct ObjectConfig {
    settings: BuildupSettings,
    applied: bool,
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Keyed store of per-object settings.
#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: FxHashMap<ObjectKey, ObjectConfig>,
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&BuildupSettings> {
        self.entries.get(&key).map(|c| &c.settings)
    }

    /// Settings of `key`, or the defaults if it was never configured.
    #[must_use]
    pub fn settings_or_default(&self, key: ObjectKey) -> BuildupSettings {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Mutable settings of `key`, configuring it with defaults if needed.
    pub fn settings_mut(&mut self, key: ObjectKey) -> &mut BuildupSettings {
        &mut self.entries.entry(key).or_default().settings
    }

    /// Replaces the settings of `key`. An active plan stays active.
    pub fn set(&mut self, key: ObjectKey, settings: BuildupSettings) {
        self.entries.entry(key).or_default().settings = settings.sanitized();
    }

    pub fn enable(&mut self, key: ObjectKey) {
        self.settings_mut(key).enabled = true;
    }

    /// Disables the effect. Keys already written stay on the track, but the
    /// object returns to `Configured`.
    pub fn disable(&mut self, key: ObjectKey) {
        let entry = self.entries.entry(key).or_default();
        entry.settings.enabled = false;
        entry.applied = false;
    }

    #[must_use]
    pub fn lifecycle(&self, key: ObjectKey) -> EffectLifecycle {
        match self.entries.get(&key) {
            None => EffectLifecycle::Unconfigured,
            Some(c) if c.applied => EffectLifecycle::Applied,
            Some(c) => EffectLifecycle::Configured {
                enabled: c.settings.enabled,
            },
        }
    }

    pub(crate) fn mark_applied(&mut self, key: ObjectKey) {
        self.entries.entry(key).or_default().applied = true;
    }

    /// Back to `Configured` with default settings (disabled, no effect).
    pub fn reset(&mut self, key: ObjectKey) {
        self.entries.insert(key, ObjectConfig::default());
    }

    /// Forgets `key` entirely (for deleted objects).
    pub fn remove(&mut self, key: ObjectKey) {
        self.entries.remove(&key);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
