//! Light Placement Tests
//!
//! Tests for:
//! - Area light sizing, offset and orientation
//! - Point light radius from vertex spread
//! - Minimum size floor
//! - Color temperature palette

use glam::Vec3;

use buildup::errors::BuildupError;
use buildup::lighting::{ColorTemp, MIN_LIGHT_SIZE, compute_light_spec};
use buildup::scene::{LightKind, LightShape};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

fn unit_square() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ]
}

// ============================================================================
// Area Lights
// ============================================================================

#[test]
fn area_light_over_unit_square() {
    let spec = compute_light_spec(&unit_square(), Some(Vec3::Z), LightKind::Area, ColorTemp::Neutral, 50.0, 0.1).unwrap();

    assert_eq!(spec.kind, LightKind::Area);
    assert_eq!(spec.shape, LightShape::Area { width: 1.0, height: 1.0 });
    assert!(approx_vec3(spec.position, Vec3::new(0.5, 0.5, 0.1)), "position {}", spec.position);

    // The emitter faces along its local -Z, which must end up on the normal.
    let facing = spec.orientation * Vec3::NEG_Z;
    assert!(approx_vec3(facing, Vec3::Z), "facing {facing}");
    assert!(approx(spec.intensity, 50.0));
}

#[test]
fn area_light_normal_is_normalized() {
    let spec = compute_light_spec(
        &unit_square(),
        Some(Vec3::new(0.0, 0.0, 5.0)),
        LightKind::Area,
        ColorTemp::Neutral,
        10.0,
        0.25,
    )
    .unwrap();
    assert!(approx_vec3(spec.position, Vec3::new(0.5, 0.5, 0.25)));
}

#[test]
fn area_light_without_normal_sits_at_center() {
    let spec = compute_light_spec(&unit_square(), None, LightKind::Area, ColorTemp::Neutral, 10.0, 0.1).unwrap();
    assert!(approx_vec3(spec.position, Vec3::new(0.5, 0.5, 0.0)));
    assert_eq!(spec.orientation, glam::Quat::IDENTITY);

    // A zero normal counts as none.
    let zero = compute_light_spec(&unit_square(), Some(Vec3::ZERO), LightKind::Area, ColorTemp::Neutral, 10.0, 0.1).unwrap();
    assert_eq!(zero.position, spec.position);
}

#[test]
fn area_light_uses_two_largest_extents() {
    let points = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 0.5, 2.0)];
    let spec = compute_light_spec(&points, None, LightKind::Area, ColorTemp::Neutral, 10.0, 0.1).unwrap();
    assert_eq!(spec.shape, LightShape::Area { width: 3.0, height: 2.0 });
}

#[test]
fn area_light_facing_down() {
    let spec = compute_light_spec(&unit_square(), Some(Vec3::NEG_Z), LightKind::Area, ColorTemp::Neutral, 10.0, 0.1).unwrap();
    assert!(approx_vec3(spec.orientation * Vec3::NEG_Z, Vec3::NEG_Z));
    assert!(approx_vec3(spec.position, Vec3::new(0.5, 0.5, -0.1)));
}

// ============================================================================
// Point Lights
// ============================================================================

#[test]
fn point_light_over_unit_square() {
    let spec = compute_light_spec(&unit_square(), Some(Vec3::Z), LightKind::Point, ColorTemp::Neutral, 50.0, 0.1).unwrap();

    assert!(approx_vec3(spec.position, Vec3::new(0.5, 0.5, 0.0)));
    assert_eq!(spec.orientation, glam::Quat::IDENTITY);
    match spec.shape {
        LightShape::Point { radius } => assert!(approx(radius, 0.5_f32.sqrt()), "radius {radius}"),
        other => panic!("expected point shape, got {other:?}"),
    }
}

#[test]
fn tiny_selection_is_floored() {
    let single = [Vec3::new(2.0, 2.0, 2.0)];

    let point = compute_light_spec(&single, None, LightKind::Point, ColorTemp::Neutral, 1.0, 0.1).unwrap();
    assert_eq!(point.shape, LightShape::Point { radius: MIN_LIGHT_SIZE });

    let area = compute_light_spec(&single, None, LightKind::Area, ColorTemp::Neutral, 1.0, 0.1).unwrap();
    assert_eq!(
        area.shape,
        LightShape::Area {
            width: MIN_LIGHT_SIZE,
            height: MIN_LIGHT_SIZE
        }
    );
}

#[test]
fn empty_points_are_rejected() {
    let result = compute_light_spec(&[], Some(Vec3::Z), LightKind::Area, ColorTemp::Neutral, 1.0, 0.1);
    assert!(matches!(result, Err(BuildupError::EmptySelection)));
}

// ============================================================================
// Palette
// ============================================================================

#[test]
fn color_temperature_palette() {
    assert_eq!(ColorTemp::Warm.color(), Vec3::new(1.0, 0.85, 0.7));
    assert_eq!(ColorTemp::Neutral.color(), Vec3::ONE);
    assert_eq!(ColorTemp::Cool.color(), Vec3::new(0.8, 0.9, 1.0));

    let spec = compute_light_spec(&unit_square(), None, LightKind::Point, ColorTemp::Warm, 75.0, 0.1).unwrap();
    let light = spec.to_light();
    assert_eq!(light.color, ColorTemp::Warm.color());
    assert!(approx(light.intensity, 75.0));
    assert_eq!(light.kind(), LightKind::Point);
}
