#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Procedural "buildup" reveal animations for 3D scenes.
//!
//! Objects are keyframed to grow out of the floor, grow with an overshoot or
//! fall into place, and lights parented to them stay hidden until the reveal
//! completes. Two mesh utilities sit alongside: fitting a light to selected
//! vertices and assigning a shared mirror material to selected faces.

pub mod animation;
pub mod errors;
pub mod lighting;
pub mod ops;
pub mod scene;
pub mod settings;

pub use animation::{AnimationParameters, EffectKind, KeyframeEntry, KeyframePlan, RestState, build_plan};
pub use errors::{BuildupError, Result};
pub use lighting::{ColorTemp, LightSpec, compute_light_spec};
pub use ops::{ApplyReport, ClearReport, MirrorReport, add_light_from_vertices, apply_animation, assign_mirror_material, clear_animation};
pub use scene::{LightKind, ObjectKey, Scene, SceneObject};
pub use settings::{BuildupSettings, ConfigStore, EffectLifecycle};
