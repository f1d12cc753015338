//! Settings Tests
//!
//! Tests for:
//! - BuildupSettings defaults and parameter extraction
//! - Range clamping
//! - JSON presets

use buildup::animation::EffectKind;
use buildup::errors::BuildupError;
use buildup::lighting::ColorTemp;
use buildup::settings::BuildupSettings;

#[test]
fn defaults() {
    let s = BuildupSettings::default();
    assert_eq!(s.effect_type, EffectKind::None);
    assert!(!s.enabled);
    assert_eq!(s.start_frame, 0);
    assert_eq!(s.duration, 15);
    assert!((s.floor_offset - -0.05).abs() < f32::EPSILON);
    assert!((s.fall_height - 0.5).abs() < f32::EPSILON);
    assert!((s.overshoot_amount - 0.15).abs() < f32::EPSILON);
    assert!((s.overshoot_settle_ratio - 0.3).abs() < f32::EPSILON);
    assert!((s.light_offset - 0.1).abs() < f32::EPSILON);
    assert!((s.light_intensity - 50.0).abs() < f32::EPSILON);
    assert_eq!(s.light_color_temp, ColorTemp::Neutral);
}

#[test]
fn parameters_mirror_settings() {
    let s = BuildupSettings {
        start_frame: 12,
        duration: 30,
        fall_height: 3.0,
        ..Default::default()
    };
    let p = s.parameters();
    assert_eq!(p.start_frame, 12);
    assert_eq!(p.duration, 30);
    assert_eq!(p.end_frame(), 42);
    assert!((p.fall_height - 3.0).abs() < f32::EPSILON);
    assert!(p.validate().is_ok());
}

#[test]
fn sanitized_clamps_ranges() {
    let s = BuildupSettings {
        duration: 0,
        overshoot_settle_ratio: 0.9,
        overshoot_amount: -1.0,
        fall_height: -2.0,
        light_intensity: f32::NAN,
        ..Default::default()
    }
    .sanitized();

    assert_eq!(s.duration, 1);
    assert!((s.overshoot_settle_ratio - 0.5).abs() < f32::EPSILON);
    assert!(s.overshoot_amount > 0.0);
    assert!(s.fall_height.abs() < f32::EPSILON);
    assert!((s.light_intensity - 50.0).abs() < f32::EPSILON);
    assert!(s.parameters().validate().is_ok());
}

#[test]
fn preset_fills_missing_fields() {
    let s = BuildupSettings::from_json(
        r#"{
            "effect_type": "FALL_DOWN",
            "enabled": true,
            "fall_height": 2.0,
            "light_color_temp": "COOL"
        }"#,
    )
    .unwrap();

    assert_eq!(s.effect_type, EffectKind::FallDown);
    assert!(s.enabled);
    assert!((s.fall_height - 2.0).abs() < f32::EPSILON);
    assert_eq!(s.light_color_temp, ColorTemp::Cool);
    assert_eq!(s.duration, 15);
}

#[test]
fn preset_is_clamped() {
    let s = BuildupSettings::from_json(r#"{ "overshoot_settle_ratio": 0.01 }"#).unwrap();
    assert!((s.overshoot_settle_ratio - 0.05).abs() < f32::EPSILON);
}

#[test]
fn malformed_preset_is_an_error() {
    let err = BuildupSettings::from_json(r#"{ "effect_type": "SPIN" }"#).unwrap_err();
    assert!(matches!(err, BuildupError::Json(_)));
    assert!(!err.is_warning());
}

#[test]
fn preset_written_and_read_back() {
    let s = BuildupSettings {
        effect_type: EffectKind::GrowOvershoot,
        enabled: true,
        start_frame: 40,
        light_color_temp: ColorTemp::Warm,
        ..Default::default()
    };
    let json = s.to_json().unwrap();
    assert!(json.contains("\"GROW_OVERSHOOT\""));
    assert_eq!(BuildupSettings::from_json(&json).unwrap(), s);
}
