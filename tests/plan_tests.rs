//! Keyframe Plan Tests
//!
//! Tests for:
//! - GrowFromFloor / GrowOvershoot / FallDown key values and frames
//! - Reveal (visibility) keys and per-frame channel ordering
//! - Overshoot frame partitioning across durations and settle ratios
//! - Parent-relative fall offsets
//! - Parameter validation and determinism

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use buildup::animation::plan::{local_fall_offset, overshoot_frames};
use buildup::animation::{AnimationParameters, Channel, EffectKind, Interpolation, KeyframePlan, RestState, build_plan};
use buildup::errors::BuildupError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn params(start: u32, duration: u32) -> AnimationParameters {
    AnimationParameters {
        start_frame: start,
        duration,
        ..Default::default()
    }
}

fn plan(effect: EffectKind, params: &AnimationParameters, rest: &RestState) -> KeyframePlan {
    build_plan(effect, params, rest, None).expect("valid parameters")
}

fn assert_frames_ordered(plan: &KeyframePlan) {
    for pair in plan.entries().windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.frame < b.frame || (a.frame == b.frame && a.channel < b.channel),
            "entries out of order: {a:?} then {b:?}"
        );
    }
}

// ============================================================================
// GrowFromFloor
// ============================================================================

#[test]
fn grow_from_floor_end_to_end() {
    let p = AnimationParameters {
        start_frame: 10,
        duration: 15,
        floor_offset: -0.05,
        ..Default::default()
    };
    let rest = RestState::new(Vec3::new(1.0, 3.0, 2.0), Vec3::ONE);
    let plan = plan(EffectKind::GrowFromFloor, &p, &rest);

    let summary: Vec<(u32, Channel)> = plan.iter().map(|e| (e.frame, e.channel)).collect();
    assert_eq!(
        summary,
        vec![
            (9, Channel::VisibleFlag),
            (10, Channel::VisibleFlag),
            (10, Channel::PositionZ),
            (10, Channel::Scale3),
            (25, Channel::PositionZ),
            (25, Channel::Scale3),
        ]
    );

    assert_eq!(plan.find(Channel::VisibleFlag, 9).unwrap().as_flag(), Some(false));
    assert_eq!(plan.find(Channel::VisibleFlag, 10).unwrap().as_flag(), Some(true));

    let z0 = plan.find(Channel::PositionZ, 10).unwrap().as_scalar().unwrap();
    let z1 = plan.find(Channel::PositionZ, 25).unwrap().as_scalar().unwrap();
    assert!(approx(z0, -0.05), "start z {z0}");
    assert!(approx(z1, 2.0), "end z {z1}");

    let s0 = plan.find(Channel::Scale3, 10).unwrap().as_vector().unwrap();
    let s1 = plan.find(Channel::Scale3, 25).unwrap().as_vector().unwrap();
    assert_eq!(s0, Vec3::ZERO);
    assert_eq!(s1, Vec3::ONE);

    assert_eq!(plan.start_frame(), 10);
    assert_eq!(plan.end_frame(), 25);
}

#[test]
fn grow_from_floor_keeps_non_uniform_rest_scale() {
    let rest = RestState::new(Vec3::new(0.0, 0.0, 0.5), Vec3::new(2.0, 1.0, 0.5));
    let plan = plan(EffectKind::GrowFromFloor, &params(0, 15), &rest);

    let end_scale = plan.find(Channel::Scale3, 15).unwrap().as_vector().unwrap();
    assert_eq!(end_scale, Vec3::new(2.0, 1.0, 0.5));
}

#[test]
fn interpolation_per_channel() {
    let rest = RestState::new(Vec3::ZERO, Vec3::ONE);
    let plan = plan(EffectKind::GrowFromFloor, &params(5, 10), &rest);

    for entry in &plan {
        let expected = if entry.channel == Channel::VisibleFlag {
            Interpolation::Constant
        } else {
            Interpolation::Bezier
        };
        assert_eq!(entry.interpolation, expected, "{entry:?}");
    }
}

// ============================================================================
// Reveal keys
// ============================================================================

#[test]
fn reveal_at_frame_zero_has_no_hide_key() {
    let rest = RestState::new(Vec3::ZERO, Vec3::ONE);
    for effect in [EffectKind::GrowFromFloor, EffectKind::GrowOvershoot, EffectKind::FallDown] {
        let plan = plan(effect, &params(0, 15), &rest);
        let visibility: Vec<_> = plan.channel(Channel::VisibleFlag).collect();
        assert_eq!(visibility.len(), 1, "{effect:?}");
        assert_eq!(visibility[0].frame, 0);
        assert_eq!(visibility[0].as_flag(), Some(true));
    }
}

#[test]
fn none_effect_yields_empty_plan() {
    let rest = RestState::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
    let plan = plan(EffectKind::None, &params(10, 15), &rest);
    assert!(plan.is_empty());
    assert_eq!(plan.len(), 0);
}

// ============================================================================
// GrowOvershoot
// ============================================================================

#[test]
fn grow_overshoot_peak_and_settle() {
    let p = AnimationParameters {
        start_frame: 10,
        duration: 15,
        overshoot_amount: 0.15,
        overshoot_settle_ratio: 0.3,
        ..Default::default()
    };
    let rest = RestState::new(Vec3::new(0.0, 0.0, 1.0), Vec3::splat(2.0));
    let plan = plan(EffectKind::GrowOvershoot, &p, &rest);

    // 15 * 0.3 = 4.5 -> 4 settle frames
    let peak = plan.find(Channel::Scale3, 21).unwrap().as_vector().unwrap();
    assert!(approx_vec3(peak, Vec3::splat(2.3)), "peak {peak}");
    assert!(approx(plan.find(Channel::PositionZ, 21).unwrap().as_scalar().unwrap(), 1.0));

    let end = plan.find(Channel::Scale3, 25).unwrap().as_vector().unwrap();
    assert_eq!(end, Vec3::splat(2.0));
    assert_frames_ordered(&plan);
}

#[test]
fn grow_overshoot_frames_strictly_inside() {
    for duration in 1..=300 {
        for ratio in [0.05, 0.3, 0.5] {
            let p = AnimationParameters {
                start_frame: 7,
                duration,
                overshoot_settle_ratio: ratio,
                ..Default::default()
            };
            let (overshoot, end) = overshoot_frames(&p);
            assert!(
                7 < overshoot && overshoot < end,
                "duration {duration} ratio {ratio}: overshoot {overshoot} end {end}"
            );
        }
    }
}

#[test]
fn grow_overshoot_single_frame_is_stretched() {
    let rest = RestState::new(Vec3::ZERO, Vec3::ONE);
    let plan = plan(EffectKind::GrowOvershoot, &params(5, 1), &rest);

    let scale_frames: Vec<u32> = plan.channel(Channel::Scale3).map(|e| e.frame).collect();
    assert_eq!(scale_frames, vec![5, 6, 7]);
    assert_eq!(plan.end_frame(), 7);
}

// ============================================================================
// FallDown
// ============================================================================

#[test]
fn fall_down_without_parent() {
    let p = AnimationParameters {
        fall_height: 0.5,
        ..params(10, 15)
    };
    let rest = RestState::new(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(4.0));
    let plan = plan(EffectKind::FallDown, &p, &rest);

    let start = plan.find(Channel::Position3, 10).unwrap().as_vector().unwrap();
    let end = plan.find(Channel::Position3, 25).unwrap().as_vector().unwrap();
    assert!(approx_vec3(start, Vec3::new(1.0, 2.0, 3.5)));
    assert_eq!(end, Vec3::new(1.0, 2.0, 3.0));

    // Scale is never keyed by a fall.
    assert_eq!(plan.channel(Channel::Scale3).count(), 0);
    assert_eq!(plan.channel(Channel::PositionZ).count(), 0);
}

#[test]
fn fall_down_under_rotated_parent() {
    let parent = Quat::from_rotation_x(FRAC_PI_2);
    let p = AnimationParameters {
        fall_height: 0.5,
        ..params(0, 10)
    };
    let rest = RestState::new(Vec3::new(0.0, 1.0, 0.0), Vec3::ONE);
    let plan = build_plan(EffectKind::FallDown, &p, &rest, Some(parent)).unwrap();

    let start = plan.find(Channel::Position3, 0).unwrap().as_vector().unwrap();
    let local_fall = start - rest.position;
    assert!(approx_vec3(local_fall, Vec3::new(0.0, 0.5, 0.0)), "local fall {local_fall}");

    // Seen from the world the drop is straight down along Z.
    assert!(approx_vec3(parent * local_fall, Vec3::new(0.0, 0.0, 0.5)));
}

#[test]
fn local_fall_offset_identity_parent() {
    let fall = local_fall_offset(2.0, Some(Quat::IDENTITY));
    assert!(approx_vec3(fall, Vec3::new(0.0, 0.0, 2.0)));
    assert_eq!(local_fall_offset(2.0, None), Vec3::new(0.0, 0.0, 2.0));
}

// ============================================================================
// Validation & Determinism
// ============================================================================

#[test]
fn zero_duration_is_rejected() {
    let rest = RestState::new(Vec3::ZERO, Vec3::ONE);
    let result = build_plan(EffectKind::GrowFromFloor, &params(0, 0), &rest, None);
    assert!(matches!(result, Err(BuildupError::InvalidParameters(_))));
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let rest = RestState::new(Vec3::ZERO, Vec3::ONE);
    let cases = [
        AnimationParameters {
            overshoot_settle_ratio: 0.9,
            ..Default::default()
        },
        AnimationParameters {
            overshoot_amount: 0.0,
            ..Default::default()
        },
        AnimationParameters {
            fall_height: -1.0,
            ..Default::default()
        },
        AnimationParameters {
            floor_offset: f32::NAN,
            ..Default::default()
        },
        AnimationParameters {
            start_frame: u32::MAX - 1,
            duration: 1,
            ..Default::default()
        },
    ];

    for p in &cases {
        let result = build_plan(EffectKind::GrowOvershoot, p, &rest, None);
        assert!(matches!(result, Err(BuildupError::InvalidParameters(_))), "{p:?} accepted");
    }
}

#[test]
fn plans_are_deterministic() {
    let rest = RestState::new(Vec3::new(0.3, -1.2, 4.0), Vec3::new(1.0, 2.0, 3.0));
    let parent = Some(Quat::from_rotation_z(0.7) * Quat::from_rotation_x(0.2));
    let p = params(42, 17);

    for effect in [
        EffectKind::GrowFromFloor,
        EffectKind::GrowOvershoot,
        EffectKind::FallDown,
        EffectKind::None,
    ] {
        let a = build_plan(effect, &p, &rest, parent).unwrap();
        let b = build_plan(effect, &p, &rest, parent).unwrap();
        assert_eq!(a, b, "{effect:?}");
    }
}

#[test]
fn plans_are_ordered_across_parameter_sweep() {
    let rest = RestState::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE);
    for start in (0..=1000).step_by(37) {
        for duration in (1..=300).step_by(13) {
            for effect in [EffectKind::GrowFromFloor, EffectKind::GrowOvershoot, EffectKind::FallDown] {
                let plan = plan(effect, &params(start, duration), &rest);
                assert_frames_ordered(&plan);
                assert!(plan.end_frame() > plan.start_frame());
            }
        }
    }
}
