use glam::Vec3;
use smallvec::SmallVec;

use crate::animation::keyframe::{Channel, Interpolation, KeyValue, KeyframeEntry};
use crate::animation::values::Interpolatable;
use crate::errors::{BuildupError, Result};
use crate::scene::Transform;

/// A single animation curve: keys sorted by frame, each carrying the
/// interpolation used for the segment that starts at it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeCurve<T: Interpolatable> {
    pub frames: Vec<u32>,
    pub values: Vec<T>,
    pub interpolations: Vec<Interpolation>,
}

impl<T: Interpolatable> KeyframeCurve<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            values: Vec::new(),
            interpolations: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Inserts a key, replacing any key already on `frame`.
    pub fn insert(&mut self, frame: u32, value: T, interpolation: Interpolation) {
        match self.frames.binary_search(&frame) {
            Ok(i) => {
                self.values[i] = value;
                self.interpolations[i] = interpolation;
            }
            Err(i) => {
                self.frames.insert(i, frame);
                self.values.insert(i, value);
                self.interpolations.insert(i, interpolation);
            }
        }
    }

    /// Evaluates the curve at a (possibly fractional) frame.
    ///
    /// Frames before the first key hold the first value; frames after the
    /// last key hold the last value. Returns `None` for an empty curve.
    #[must_use]
    pub fn sample(&self, frame: f32) -> Option<T> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }

        // partition_point finds the first key strictly after `frame`
        let next_idx = self.frames.partition_point(|&f| f as f32 <= frame);
        if next_idx == 0 {
            return Some(self.values[0]);
        }
        let index = next_idx - 1;
        if index >= len - 1 {
            return Some(self.values[len - 1]);
        }

        let f0 = self.frames[index] as f32;
        let f1 = self.frames[index + 1] as f32;
        let df = f1 - f0;
        let t = if df > 1e-6 { (frame - f0) / df } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        let v0 = self.values[index];
        let v1 = self.values[index + 1];
        Some(match self.interpolations[index] {
            Interpolation::Constant => v0,
            Interpolation::Bezier => T::interpolate_eased(v0, v1, t),
        })
    }
}

impl<T: Interpolatable> Default for KeyframeCurve<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CurveData {
    Scalar(KeyframeCurve<f32>),
    Vector3(KeyframeCurve<Vec3>),
    Flag(KeyframeCurve<bool>),
}

impl CurveData {
    fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::VisibleFlag => Self::Flag(KeyframeCurve::new()),
            Channel::PositionZ => Self::Scalar(KeyframeCurve::new()),
            Channel::Position3 | Channel::Scale3 => Self::Vector3(KeyframeCurve::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(c) => c.len(),
            Self::Vector3(c) => c.len(),
            Self::Flag(c) => c.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn frames(&self) -> &[u32] {
        match self {
            Self::Scalar(c) => &c.frames,
            Self::Vector3(c) => &c.frames,
            Self::Flag(c) => &c.frames,
        }
    }
}

/// A curve bound to one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCurve {
    pub channel: Channel,
    pub data: CurveData,
}

/// The evaluated animatable state of an object at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
}

impl Pose {
    #[must_use]
    pub fn from_transform(transform: &Transform, visible: bool) -> Self {
        Self {
            position: transform.position,
            scale: transform.scale,
            visible,
        }
    }
}

/// The per-object container of keyframe curves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationTrack {
    pub name: String,
    curves: SmallVec<[ChannelCurve; 4]>,
}

impl AnimationTrack {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            curves: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn curves(&self) -> &[ChannelCurve] {
        &self.curves
    }

    #[must_use]
    pub fn curve(&self, channel: Channel) -> Option<&CurveData> {
        self.curves.iter().find(|c| c.channel == channel).map(|c| &c.data)
    }

    #[must_use]
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.curve(channel).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.iter().all(|c| c.data.is_empty())
    }

    /// Total number of keys across all curves.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.curves.iter().map(|c| c.data.len()).sum()
    }

    /// First and last keyed frame across all curves.
    #[must_use]
    pub fn frame_range(&self) -> Option<(u32, u32)> {
        let frames = self.curves.iter().flat_map(|c| c.data.frames().iter().copied());
        frames.fold(None, |acc, f| match acc {
            None => Some((f, f)),
            Some((lo, hi)) => Some((lo.min(f), hi.max(f))),
        })
    }

    fn curve_mut(&mut self, channel: Channel) -> &mut CurveData {
        let index = match self.curves.iter().position(|c| c.channel == channel) {
            Some(i) => i,
            None => {
                self.curves.push(ChannelCurve {
                    channel,
                    data: CurveData::for_channel(channel),
                });
                self.curves.len() - 1
            }
        };
        &mut self.curves[index].data
    }

    /// Writes one keyframe, replacing any key on the same channel and frame.
    pub fn insert(&mut self, entry: &KeyframeEntry) -> Result<()> {
        if !entry.channel.accepts(&entry.value) {
            return Err(BuildupError::InvalidParameters(format!(
                "{:?} cannot hold {:?}",
                entry.channel, entry.value
            )));
        }

        let (frame, interpolation) = (entry.frame, entry.interpolation);
        match (self.curve_mut(entry.channel), entry.value) {
            (CurveData::Scalar(curve), KeyValue::Scalar(v)) => curve.insert(frame, v, interpolation),
            (CurveData::Vector3(curve), KeyValue::Vector(v)) => curve.insert(frame, v, interpolation),
            (CurveData::Flag(curve), KeyValue::Flag(v)) => curve.insert(frame, v, interpolation),
            (data, value) => {
                return Err(BuildupError::InvalidParameters(format!(
                    "curve of {} keys cannot hold {value:?}",
                    data.len()
                )));
            }
        }
        Ok(())
    }

    pub fn insert_all<'a>(&mut self, entries: impl IntoIterator<Item = &'a KeyframeEntry>) -> Result<()> {
        for entry in entries {
            self.insert(entry)?;
        }
        Ok(())
    }

    /// Removes the curves of `channels`. Returns how many curves were removed.
    pub fn remove_channels(&mut self, channels: &[Channel]) -> usize {
        let before = self.curves.len();
        self.curves.retain(|c| !channels.contains(&c.channel));
        before - self.curves.len()
    }

    pub fn clear(&mut self) {
        self.curves.clear();
    }

    /// Rebuilds the keyframe entries of one channel, in frame order.
    #[must_use]
    pub fn keyframes(&self, channel: Channel) -> Vec<KeyframeEntry> {
        fn collect<T: Interpolatable>(
            channel: Channel,
            curve: &KeyframeCurve<T>,
            wrap: impl Fn(T) -> KeyValue,
        ) -> Vec<KeyframeEntry> {
            curve
                .frames
                .iter()
                .zip(&curve.values)
                .zip(&curve.interpolations)
                .map(|((&frame, &value), &interpolation)| KeyframeEntry {
                    frame,
                    channel,
                    value: wrap(value),
                    interpolation,
                })
                .collect()
        }

        match self.curve(channel) {
            Some(CurveData::Scalar(c)) => collect(channel, c, KeyValue::Scalar),
            Some(CurveData::Vector3(c)) => collect(channel, c, KeyValue::Vector),
            Some(CurveData::Flag(c)) => collect(channel, c, KeyValue::Flag),
            None => Vec::new(),
        }
    }

    /// Applies every curve to `base` at `frame`.
    ///
    /// `Position3` is applied before `PositionZ`, so a keyed Z overrides the
    /// Z of a keyed position.
    #[must_use]
    pub fn evaluate(&self, frame: f32, base: Pose) -> Pose {
        let mut pose = base;
        for channel in [Channel::VisibleFlag, Channel::Position3, Channel::PositionZ, Channel::Scale3] {
            match (channel, self.curve(channel)) {
                (Channel::VisibleFlag, Some(CurveData::Flag(c))) => {
                    pose.visible = c.sample(frame).unwrap_or(pose.visible);
                }
                (Channel::Position3, Some(CurveData::Vector3(c))) => {
                    pose.position = c.sample(frame).unwrap_or(pose.position);
                }
                (Channel::PositionZ, Some(CurveData::Scalar(c))) => {
                    pose.position.z = c.sample(frame).unwrap_or(pose.position.z);
                }
                (Channel::Scale3, Some(CurveData::Vector3(c))) => {
                    pose.scale = c.sample(frame).unwrap_or(pose.scale);
                }
                _ => {}
            }
        }
        pose
    }
}
