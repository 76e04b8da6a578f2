//! Demo configuration loaded from JSON.
//!
//! Every field is optional in the file; omitted fields take the defaults
//! below. Validation runs after parsing so that a bad file is rejected before
//! any window or GPU resource is acquired.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::fps::DEFAULT_FPS_INTERVAL_MS;

/// Largest accepted window dimension or speed. Positions are `i32`, so
/// keeping both below half the range means `x + dx` cannot overflow.
pub const MAX_COORDINATE: u32 = i32::MAX as u32 / 2;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub sprite_image_path: String,
    pub font_path: String,
    pub font_size: f32,
    pub sprite_count: usize,
    pub max_speed: i32,
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub frame_delay_ms: u64,
    pub fps_interval_ms: u64,
    /// Fixed RNG seed for a reproducible layout. A clock-derived seed is used
    /// (and logged) when absent.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sprite_image_path: "assets/icon.bmp".to_string(),
            font_path: "assets/fonts/DejaVuSans.ttf".to_string(),
            font_size: 20.0,
            sprite_count: 100,
            max_speed: 3,
            window_width: 800,
            window_height: 600,
            window_title: "Sprites and FPS Counter".to_string(),
            frame_delay_ms: 16,
            fps_interval_ms: DEFAULT_FPS_INTERVAL_MS,
            seed: None,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<DemoConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&raw).map_err(|e| format!("{} ({})", e, path.display()))
}

pub fn parse_config(raw: &str) -> Result<DemoConfig, String> {
    let config: DemoConfig =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &DemoConfig) -> Result<(), String> {
    if config.window_width == 0 || config.window_height == 0 {
        return Err("Config validation failed: window size must be non-zero".to_string());
    }
    if config.window_width > MAX_COORDINATE || config.window_height > MAX_COORDINATE {
        return Err(format!(
            "Config validation failed: window size must be <= {MAX_COORDINATE}"
        ));
    }
    if config.font_size.is_nan() || config.font_size <= 0.0 {
        return Err("Config validation failed: font_size must be > 0".to_string());
    }
    if config.fps_interval_ms == 0 {
        return Err("Config validation failed: fps_interval_ms must be > 0".to_string());
    }
    if config.max_speed < 0 {
        return Err("Config validation failed: max_speed must be >= 0".to_string());
    }
    if config.max_speed as u32 > MAX_COORDINATE {
        return Err(format!(
            "Config validation failed: max_speed must be <= {MAX_COORDINATE}"
        ));
    }
    if config.sprite_image_path.is_empty() || config.font_path.is_empty() {
        return Err("Config validation failed: asset paths must not be empty".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bnc_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = parse_config("{}").expect("defaults should validate");
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.sprite_count, 100);
        assert_eq!(config.max_speed, 3);
        assert_eq!((config.window_width, config.window_height), (800, 600));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(r#"{"sprite_count":0,"seed":99,"font_size":14.5}"#)
            .expect("valid config");
        assert_eq!(config.sprite_count, 0);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.font_size, 14.5);
        assert_eq!(config.frame_delay_ms, 16);
    }

    #[test]
    fn rejects_zero_window() {
        let err = parse_config(r#"{"window_width":0}"#).expect_err("zero width");
        assert!(err.contains("window size"));
    }

    #[test]
    fn rejects_bad_font_size_and_interval() {
        assert!(parse_config(r#"{"font_size":0.0}"#).is_err());
        assert!(parse_config(r#"{"fps_interval_ms":0}"#).is_err());
        assert!(parse_config(r#"{"max_speed":-1}"#).is_err());
    }

    #[test]
    fn rejects_values_that_overflow_positions() {
        let err = parse_config(r#"{"max_speed":2147483647}"#).expect_err("huge speed");
        assert!(err.contains("max_speed"));
        let err = parse_config(r#"{"window_width":4294967295}"#).expect_err("huge width");
        assert!(err.contains("window size"));
        assert!(parse_config(r#"{"window_height":3000000000}"#).is_err());

        let edge = format!(r#"{{"max_speed":{MAX_COORDINATE},"window_width":{MAX_COORDINATE}}}"#);
        assert!(parse_config(&edge).is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = parse_config(r#"{"sprite_cnt":5}"#).expect_err("typo in key");
        assert!(err.contains("parse"));
    }

    #[test]
    fn load_from_file_round_trips_paths() {
        let path = temp_file_path("load");
        fs::write(
            &path,
            r#"{"sprite_image_path":"data/icon.bmp","font_path":"data/arial.ttf"}"#,
        )
        .expect("write temp config");
        let config = load_config_from_path(&path).expect("load config");
        assert_eq!(config.sprite_image_path, "data/icon.bmp");
        assert_eq!(config.font_path, "data/arial.ttf");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_file_path("missing");
        let err = load_config_from_path(&path).expect_err("missing file");
        assert!(err.contains("Failed to read config"));
    }
}
