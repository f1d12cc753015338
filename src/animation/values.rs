use glam::Vec3;

/// Values a [`KeyframeCurve`](crate::animation::KeyframeCurve) can blend
/// between two keys.
pub trait Interpolatable: Copy + Clone + Sized {
    /// Bezier segment with auto-clamped handles: both end tangents are flat,
    /// so the curve eases in and out and never overshoots its keys.
    fn interpolate_eased(v0: Self, v1: Self, t: f32) -> Self;
}

/// Weight of the end key on a cubic Hermite segment with zero tangents.
#[inline]
fn eased_weight(t: f32) -> f32 {
    let t2 = t * t;
    -2.0 * t2 * t + 3.0 * t2
}

impl Interpolatable for f32 {
    fn interpolate_eased(v0: Self, v1: Self, t: f32) -> Self {
        let s = eased_weight(t);
        (1.0 - s) * v0 + s * v1
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_eased(v0: Self, v1: Self, t: f32) -> Self {
        let s = eased_weight(t);
        v0 * (1.0 - s) + v1 * s
    }
}

/// Discrete values step at the end of the segment.
impl Interpolatable for bool {
    fn interpolate_eased(v0: Self, v1: Self, t: f32) -> Self {
        if t < 1.0 { v0 } else { v1 }
    }
}
