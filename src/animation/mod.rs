//! Buildup animation kernel
//!
//! - [`keyframe`]: channels, values and the [`KeyframeEntry`] plan unit
//! - [`params`]: effect kinds, timing parameters and the rest-state snapshot
//! - [`plan`]: the pure keyframe plan builder
//! - [`visibility`]: hide/show schedules for dependent objects
//! - [`tracks`]: host-side keyframe curves and their evaluation
//! - [`store`]: shared track storage with copy-on-write

mod values;
pub mod keyframe;
pub mod params;
pub mod plan;
pub mod visibility;
pub mod tracks;
pub mod store;

pub use keyframe::{Channel, Interpolation, KeyValue, KeyframeEntry};
pub use params::{AnimationParameters, EffectKind, RestState};
pub use plan::{KeyframePlan, build_plan};
pub use visibility::{VisibilitySchedule, propagate_visibility, visibility_window};
pub use tracks::{AnimationTrack, ChannelCurve, CurveData, KeyframeCurve, Pose};
pub use store::TrackStore;
pub use values::Interpolatable;
