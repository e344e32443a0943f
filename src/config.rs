/*
 *  config.rs
 *
 *  AmiMon - bus activity at a glance
 *  (c) 2024-26 the AmiMon authors
 *
 *  Overlay preferences: YAML file merged with CLI overrides
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::overlay::animation::DEFAULT_FADE_SECS;
use crate::overlay::layout::LayoutMode;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Overlay preferences. All fields are Options so YAML, CLI, and defaults
/// can be layered; use the accessor methods for effective values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    /// e.g., "info" | "debug"
    pub log_level: Option<String>,
    /// One of the six arrangements, by name in YAML ("top_and_bottom", ...)
    pub layout: Option<LayoutMode>,
    /// Full fade-in/fade-out time in milliseconds
    pub fade_ms: Option<u64>,
    /// Frame-loop target
    pub target_fps: Option<u32>,
    /// Fade all monitors in right after build
    pub autoshow: Option<bool>,
}

impl OverlayConfig {
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.unwrap_or(LayoutMode::TopAndBottom)
    }

    pub fn fade_secs(&self) -> f32 {
        match self.fade_ms {
            Some(ms) => ms as f32 / 1000.0,
            None => DEFAULT_FADE_SECS,
        }
    }

    pub fn fps(&self) -> u32 {
        self.target_fps.unwrap_or(60)
    }

    pub fn autoshow(&self) -> bool {
        self.autoshow.unwrap_or(true)
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "overlay-sim", about = "AmiMon overlay simulator")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Layout arrangement, 0-5
    #[arg(long)]
    pub layout_mode: Option<u8>,
    #[arg(long)]
    pub fade_ms: Option<u64>,
    #[arg(long)]
    pub target_fps: Option<u32>,
    /// Number of simulated frames to run
    #[arg(long)]
    pub frames: Option<u64>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(OverlayConfig, Cli), ConfigError> {
    let cli = Cli::parse();

    // 1) defaults (from `Default` impl)
    let mut cfg = OverlayConfig::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli)?;

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok((cfg, cli))
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/amimon/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/amimon.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    for candidate in &["amimon.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<OverlayConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: OverlayConfig = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut OverlayConfig, src: OverlayConfig) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.layout.is_some() {
        dst.layout = src.layout;
    }
    if src.fade_ms.is_some() {
        dst.fade_ms = src.fade_ms;
    }
    if src.target_fps.is_some() {
        dst.target_fps = src.target_fps;
    }
    if src.autoshow.is_some() {
        dst.autoshow = src.autoshow;
    }
}

fn apply_cli_overrides(cfg: &mut OverlayConfig, cli: &Cli) -> Result<(), ConfigError> {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if let Some(n) = cli.layout_mode {
        // reject a bad selector here, before it reaches the engine
        let mode = LayoutMode::try_from(n)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        cfg.layout = Some(mode);
    }
    if cli.fade_ms.is_some() {
        cfg.fade_ms = cli.fade_ms;
    }
    if cli.target_fps.is_some() {
        cfg.target_fps = cli.target_fps;
    }
    Ok(())
}

fn validate(cfg: &OverlayConfig) -> Result<(), ConfigError> {
    if let Some(ms) = cfg.fade_ms {
        if ms == 0 || ms > 10_000 {
            return Err(ConfigError::Validation(format!(
                "fade_ms out of range: {ms} (expected 1-10000)"
            )));
        }
    }
    if let Some(fps) = cfg.target_fps {
        if fps == 0 || fps > 240 {
            return Err(ConfigError::Validation(format!(
                "target_fps out of range: {fps} (expected 1-240)"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = OverlayConfig::default();
        assert_eq!(cfg.layout_mode(), LayoutMode::TopAndBottom);
        assert_eq!(cfg.fps(), 60);
        assert!(cfg.autoshow());
        assert!((cfg.fade_secs() - DEFAULT_FADE_SECS).abs() < 1e-6);
    }

    #[test]
    fn yaml_layout_by_name() {
        let cfg: OverlayConfig =
            serde_yaml::from_str("layout: left_and_right\nfade_ms: 250\n").unwrap();
        assert_eq!(cfg.layout_mode(), LayoutMode::LeftAndRight);
        assert!((cfg.fade_secs() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn merge_prefers_incoming_options() {
        let mut base = OverlayConfig {
            fade_ms: Some(500),
            ..OverlayConfig::default()
        };
        let incoming: OverlayConfig =
            serde_yaml::from_str("target_fps: 30\nfade_ms: 100\n").unwrap();
        merge(&mut base, incoming);
        assert_eq!(base.fade_ms, Some(100));
        assert_eq!(base.target_fps, Some(30));
    }

    #[test]
    fn validation_rejects_out_of_range() {
        let mut cfg = OverlayConfig::default();
        cfg.fade_ms = Some(0);
        assert!(validate(&cfg).is_err());

        cfg.fade_ms = Some(500);
        cfg.target_fps = Some(1000);
        assert!(validate(&cfg).is_err());

        cfg.target_fps = Some(60);
        assert!(validate(&cfg).is_ok());
    }
}
