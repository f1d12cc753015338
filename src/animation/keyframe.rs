use glam::Vec3;

/// An animatable property of a scene object.
///
/// The declaration order doubles as the ordering of entries that share a
/// frame inside a keyframe plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Maps to `SceneObject::visible`
    VisibleFlag,
    /// Maps to `transform.position.z`
    PositionZ,
    /// Maps to `transform.position`
    Position3,
    /// Maps to `transform.scale`
    Scale3,
}

impl Channel {
    /// Channels written by the buildup effects themselves.
    pub const TRANSFORM: [Channel; 3] = [Channel::PositionZ, Channel::Position3, Channel::Scale3];

    /// Every channel a buildup plan may write.
    pub const ALL: [Channel; 4] = [
        Channel::VisibleFlag,
        Channel::PositionZ,
        Channel::Position3,
        Channel::Scale3,
    ];

    #[must_use]
    pub fn accepts(self, value: &KeyValue) -> bool {
        matches!(
            (self, value),
            (Channel::VisibleFlag, KeyValue::Flag(_))
                | (Channel::PositionZ, KeyValue::Scalar(_))
                | (Channel::Position3 | Channel::Scale3, KeyValue::Vector(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    /// Smooth ease between keys (auto-clamped handles).
    #[default]
    Bezier,
    /// Holds the key's value until the next key.
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyValue {
    Scalar(f32),
    Vector(Vec3),
    Flag(bool),
}

/// One keyframe of a plan: the value a channel takes at a frame, and how the
/// curve leaves that key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeEntry {
    pub frame: u32,
    pub channel: Channel,
    pub value: KeyValue,
    pub interpolation: Interpolation,
}

impl KeyframeEntry {
    #[must_use]
    pub fn position_z(frame: u32, z: f32) -> Self {
        Self {
            frame,
            channel: Channel::PositionZ,
            value: KeyValue::Scalar(z),
            interpolation: Interpolation::Bezier,
        }
    }

    #[must_use]
    pub fn position(frame: u32, position: Vec3) -> Self {
        Self {
            frame,
            channel: Channel::Position3,
            value: KeyValue::Vector(position),
            interpolation: Interpolation::Bezier,
        }
    }

    #[must_use]
    pub fn scale(frame: u32, scale: Vec3) -> Self {
        Self {
            frame,
            channel: Channel::Scale3,
            value: KeyValue::Vector(scale),
            interpolation: Interpolation::Bezier,
        }
    }

    /// Visibility is discrete, so its keys never interpolate.
    #[must_use]
    pub fn visible(frame: u32, visible: bool) -> Self {
        Self {
            frame,
            channel: Channel::VisibleFlag,
            value: KeyValue::Flag(visible),
            interpolation: Interpolation::Constant,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<f32> {
        match self.value {
            KeyValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vector(&self) -> Option<Vec3> {
        match self.value {
            KeyValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self.value {
            KeyValue::Flag(v) => Some(v),
            _ => None,
        }
    }
}
