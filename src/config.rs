//! Runtime configuration.
//!
//! Defaults reproduce the classroom scene; a handful of environment variables
//! override them:
//!
//! | variable        | field                  |
//! |-----------------|------------------------|
//! | `CABIN_ASSETS`  | asset directory        |
//! | `CABIN_WIDTH`   | window width in px     |
//! | `CABIN_HEIGHT`  | window height in px    |
//! | `CABIN_LOG`     | `env_logger` filter    |

use std::path::PathBuf;

use anyhow::Context as _;

use crate::{camera::Camera, logging::LoggingConfig};

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cabin Scene".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Directory containing `textures/`.
    pub asset_dir: PathBuf,
    pub window: WindowConfig,
    pub clear_colour: wgpu::Color,
    pub camera: Camera,
    pub logging: LoggingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            window: WindowConfig::default(),
            clear_colour: wgpu::Color::BLACK,
            camera: Camera::driver_seat(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `var` on top of the defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Some(dir) = var("CABIN_ASSETS") {
            config.asset_dir = PathBuf::from(dir);
        }
        if let Some(width) = var("CABIN_WIDTH") {
            config.window.width = parse_extent("CABIN_WIDTH", &width)?;
        }
        if let Some(height) = var("CABIN_HEIGHT") {
            config.window.height = parse_extent("CABIN_HEIGHT", &height)?;
        }
        if let Some(filter) = var("CABIN_LOG") {
            config.logging.env_filter = Some(filter);
        }
        Ok(config)
    }
}

fn parse_extent(key: &str, value: &str) -> anyhow::Result<u32> {
    let extent: u32 = value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a positive integer, got '{value}'"))?;
    anyhow::ensure!(extent > 0, "{key} must be greater than zero");
    Ok(extent)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = SceneConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert_eq!((config.window.width, config.window.height), (1000, 800));
        assert!(config.logging.env_filter.is_none());
    }

    #[test]
    fn applies_overrides() {
        let config = SceneConfig::from_vars(vars(&[
            ("CABIN_ASSETS", "/tmp/cabin"),
            ("CABIN_WIDTH", "640"),
            ("CABIN_HEIGHT", " 480 "),
            ("CABIN_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/cabin"));
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert_eq!(config.logging.env_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_bad_extents() {
        assert!(SceneConfig::from_vars(vars(&[("CABIN_WIDTH", "wide")])).is_err());
        assert!(SceneConfig::from_vars(vars(&[("CABIN_HEIGHT", "0")])).is_err());
    }
}
