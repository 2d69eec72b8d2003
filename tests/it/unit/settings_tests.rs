//! Settings persistence.

use pointer_interactions::settings::{DeltaSource, default_settings_path};
use pointer_interactions::{InteractionError, InteractionSettings, PointerType};
use std::fs;
use tempfile::TempDir;

fn custom() -> InteractionSettings {
    InteractionSettings {
        pointer_move_tolerance: 4.0,
        delta_source: DeltaSource::Client,
        resize_margin_mouse: 6.0,
        resize_margin_touch: 24.0,
        min_dt_secs: 0.002,
    }
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    custom().save(&path).unwrap();
    let loaded = InteractionSettings::load(&path).unwrap();

    assert_eq!(loaded, custom());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    assert_eq!(InteractionSettings::load_or_default(&path), InteractionSettings::default());
}

#[test]
fn test_broken_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(InteractionSettings::load_or_default(&path), InteractionSettings::default());
}

#[test]
fn test_load_reports_json_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = InteractionSettings::load(&path).unwrap_err();
    assert!(matches!(err, InteractionError::Json(_)));
}

#[test]
fn test_load_reports_io_errors() {
    let dir = TempDir::new().unwrap();
    let err = InteractionSettings::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, InteractionError::Io(_)));
}

#[test]
fn test_resize_margin_by_pointer_type() {
    let settings = custom();
    assert_eq!(settings.resize_margin(PointerType::Mouse), 6.0);
    assert_eq!(settings.resize_margin(PointerType::Pen), 6.0);
    assert_eq!(settings.resize_margin(PointerType::Touch), 24.0);
}

#[test]
fn test_default_path_file_name() {
    if let Some(path) = default_settings_path() {
        assert!(path.ends_with("pointer_interactions/settings.json"));
    }
}
