//! Axe configuration resource.
//!
//! Holds the axe tuning, the recall poll interval and the audio clip ids,
//! loaded from an INI file. Defaults are safe to run with; keys missing from
//! the file keep their current values.
//!
//! # Configuration File Format
//!
//! ```ini
//! [axe]
//! cooldown = 1.0
//! throw_threshold = 12.0
//! arc_height = 10.0
//! drop_spin_threshold = 350.0
//! throw_boost = 2.0
//!
//! [spin]
//! travel = -720.0
//! recall = 360.0
//!
//! [gravity]
//! normal = -9.81
//! low = -2.81
//!
//! [recall]
//! poll_interval = 0.5
//!
//! [clips]
//! spin = axe_spin
//! grab = axe_grab
//! returning = axe_return
//! collision = axe_embed
//! wrong_collision = axe_clank
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec3;
use log::info;
use std::path::PathBuf;

use crate::components::axe::{AxeTuning, ClipKind};
use crate::components::recallsignal::DEFAULT_POLL_INTERVAL;
use crate::error::AxeError;

const DEFAULT_CONFIG_PATH: &str = "./axe.ini";

/// Clip ids handed to the audio consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipIds {
    pub spin: String,
    pub grab: String,
    pub returning: String,
    pub collision: String,
    pub wrong_collision: String,
}

impl Default for ClipIds {
    fn default() -> Self {
        Self {
            spin: "axe_spin".to_string(),
            grab: "axe_grab".to_string(),
            returning: "axe_return".to_string(),
            collision: "axe_embed".to_string(),
            wrong_collision: "axe_clank".to_string(),
        }
    }
}

impl ClipIds {
    pub fn id(&self, kind: ClipKind) -> &str {
        match kind {
            ClipKind::Spin => &self.spin,
            ClipKind::Grab => &self.grab,
            ClipKind::Returning => &self.returning,
            ClipKind::Collision => &self.collision,
            ClipKind::WrongCollision => &self.wrong_collision,
        }
    }
}

/// Axe configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct AxeConfig {
    /// Seconds after a drop or throw before recall is allowed.
    pub cooldown: f32,
    /// Recall distances below this take the straight path.
    pub throw_threshold: f32,
    /// Sideways offset of the arched recall path.
    pub arc_height: f32,
    /// Spin around X separating drops from throws.
    pub drop_spin_threshold: f32,
    /// Release velocity multiplier for throws.
    pub throw_boost: f32,
    /// Mesh spin while thrown, degrees per second.
    pub travel_spin: f32,
    /// Mesh spin while recalling, degrees per second.
    pub recall_spin: f32,
    /// Vertical gravity while not thrown.
    pub normal_gravity: f32,
    /// Vertical gravity while thrown.
    pub low_gravity: f32,
    /// Seconds between two recall gesture checks.
    pub poll_interval: f32,
    pub clips: ClipIds,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for AxeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AxeConfig {
    /// Create a new configuration with the default tuning.
    pub fn new() -> Self {
        let tuning = AxeTuning::default();
        Self {
            cooldown: tuning.cooldown,
            throw_threshold: tuning.throw_threshold,
            arc_height: tuning.arc_height,
            drop_spin_threshold: tuning.drop_spin_threshold,
            throw_boost: tuning.throw_boost,
            travel_spin: tuning.travel_spin_rate,
            recall_spin: tuning.recall_spin_rate,
            normal_gravity: tuning.normal_gravity.y,
            low_gravity: tuning.low_gravity.y,
            poll_interval: DEFAULT_POLL_INTERVAL,
            clips: ClipIds::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), AxeError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| AxeError::Config(format!("failed to load config file: {}", e)))?;
        self.apply(&ini);
        info!("Loaded axe config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), AxeError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| AxeError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&ini);
        Ok(())
    }

    fn apply(&mut self, ini: &Ini) {
        let float = |section: &str, key: &str| {
            ini.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };

        // [axe] section
        if let Some(v) = float("axe", "cooldown") {
            self.cooldown = v;
        }
        if let Some(v) = float("axe", "throw_threshold") {
            self.throw_threshold = v;
        }
        if let Some(v) = float("axe", "arc_height") {
            self.arc_height = v;
        }
        if let Some(v) = float("axe", "drop_spin_threshold") {
            self.drop_spin_threshold = v;
        }
        if let Some(v) = float("axe", "throw_boost") {
            self.throw_boost = v;
        }

        // [spin] section
        if let Some(v) = float("spin", "travel") {
            self.travel_spin = v;
        }
        if let Some(v) = float("spin", "recall") {
            self.recall_spin = v;
        }

        // [gravity] section
        if let Some(v) = float("gravity", "normal") {
            self.normal_gravity = v;
        }
        if let Some(v) = float("gravity", "low") {
            self.low_gravity = v;
        }

        // [recall] section
        if let Some(v) = float("recall", "poll_interval") {
            self.poll_interval = v;
        }

        // [clips] section
        let clips = [
            ("spin", &mut self.clips.spin),
            ("grab", &mut self.clips.grab),
            ("returning", &mut self.clips.returning),
            ("collision", &mut self.clips.collision),
            ("wrong_collision", &mut self.clips.wrong_collision),
        ];
        for (key, slot) in clips {
            if let Some(id) = ini.get("clips", key).filter(|id| !id.is_empty()) {
                *slot = id;
            }
        }
    }

    /// Save configuration to the INI file at `config_path`.
    pub fn save_to_file(&self) -> Result<(), AxeError> {
        let mut ini = Ini::new();

        ini.set("axe", "cooldown", Some(self.cooldown.to_string()));
        ini.set("axe", "throw_threshold", Some(self.throw_threshold.to_string()));
        ini.set("axe", "arc_height", Some(self.arc_height.to_string()));
        ini.set(
            "axe",
            "drop_spin_threshold",
            Some(self.drop_spin_threshold.to_string()),
        );
        ini.set("axe", "throw_boost", Some(self.throw_boost.to_string()));

        ini.set("spin", "travel", Some(self.travel_spin.to_string()));
        ini.set("spin", "recall", Some(self.recall_spin.to_string()));

        ini.set("gravity", "normal", Some(self.normal_gravity.to_string()));
        ini.set("gravity", "low", Some(self.low_gravity.to_string()));

        ini.set("recall", "poll_interval", Some(self.poll_interval.to_string()));

        ini.set("clips", "spin", Some(self.clips.spin.clone()));
        ini.set("clips", "grab", Some(self.clips.grab.clone()));
        ini.set("clips", "returning", Some(self.clips.returning.clone()));
        ini.set("clips", "collision", Some(self.clips.collision.clone()));
        ini.set(
            "clips",
            "wrong_collision",
            Some(self.clips.wrong_collision.clone()),
        );

        ini.write(&self.config_path)
            .map_err(|e| AxeError::Config(format!("failed to save config file: {}", e)))?;

        info!("Saved axe config to {:?}", self.config_path);

        Ok(())
    }

    /// Tuning snapshot handed to each new axe.
    pub fn tuning(&self) -> AxeTuning {
        AxeTuning {
            cooldown: self.cooldown,
            throw_threshold: self.throw_threshold,
            arc_height: self.arc_height,
            drop_spin_threshold: self.drop_spin_threshold,
            throw_boost: self.throw_boost,
            travel_spin_rate: self.travel_spin,
            recall_spin_rate: self.recall_spin,
            normal_gravity: Vec3::new(0.0, self.normal_gravity, 0.0),
            low_gravity: Vec3::new(0.0, self.low_gravity, 0.0),
        }
    }

    pub fn clip_id(&self, kind: ClipKind) -> &str {
        self.clips.id(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_defaults_match_tuning_defaults() {
        let config = AxeConfig::new();
        assert_eq!(config.tuning(), AxeTuning::default());
        assert!(approx_eq(config.poll_interval, 0.5));
        assert_eq!(config.config_path, PathBuf::from("./axe.ini"));
    }

    #[test]
    fn test_with_path() {
        let config = AxeConfig::with_path("/tmp/other.ini");
        assert_eq!(config.config_path, PathBuf::from("/tmp/other.ini"));
        assert!(approx_eq(config.cooldown, 1.0));
    }

    #[test]
    fn test_load_from_str_partial_keeps_defaults() {
        let mut config = AxeConfig::new();
        config
            .load_from_str("[axe]\ncooldown = 2.5\n\n[gravity]\nlow = -1.5\n")
            .unwrap();
        assert!(approx_eq(config.cooldown, 2.5));
        assert!(approx_eq(config.low_gravity, -1.5));
        assert!(approx_eq(config.throw_threshold, 12.0));
        assert!(approx_eq(config.normal_gravity, -9.81));
        let tuning = config.tuning();
        assert!(approx_eq(tuning.low_gravity.y, -1.5));
        assert!(approx_eq(tuning.cooldown, 2.5));
    }

    #[test]
    fn test_load_from_str_ignores_bad_values() {
        let mut config = AxeConfig::new();
        config
            .load_from_str("[spin]\ntravel = fast\nrecall = 180\n")
            .unwrap();
        assert!(approx_eq(config.travel_spin, -720.0));
        assert!(approx_eq(config.recall_spin, 180.0));
    }

    #[test]
    fn test_load_clips() {
        let mut config = AxeConfig::new();
        config
            .load_from_str("[clips]\ngrab = thunk\nspin =\n")
            .unwrap();
        assert_eq!(config.clip_id(ClipKind::Grab), "thunk");
        assert_eq!(config.clip_id(ClipKind::Spin), "axe_spin");
        assert_eq!(config.clip_id(ClipKind::WrongCollision), "axe_clank");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let mut config = AxeConfig::with_path("/nonexistent/dir/axe.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(matches!(err, AxeError::Config(_)));
        assert!(approx_eq(config.cooldown, 1.0));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("axe_config_{}.ini", std::process::id()));
        let mut saved = AxeConfig::with_path(&path);
        saved.arc_height = 4.0;
        saved.poll_interval = 0.25;
        saved.clips.returning = "whirr".to_string();
        saved.save_to_file().unwrap();

        let mut loaded = AxeConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(approx_eq(loaded.arc_height, 4.0));
        assert!(approx_eq(loaded.poll_interval, 0.25));
        assert_eq!(loaded.clips.returning, "whirr");
        assert_eq!(loaded.tuning(), saved.tuning());
    }
}
