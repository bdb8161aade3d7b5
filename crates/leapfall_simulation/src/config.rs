//! Gameplay config (jumps, camera shake, menu, input actions)
//!
//! Загружается из RON (`res://config/gameplay.ron` в Godot layer).
//! Каждая секция `#[serde(default)]` — partial файл валиден, отсутствующие
//! поля берутся из `Default`.

use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::hud::Tint;
use crate::logger;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub jumps: JumpConfig,
    pub camera: CameraShakeConfig,
    pub menu: MenuConfig,
    pub input: InputConfig,
}

/// Jump budget + indicator palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub max_jumps: u8,

    /// Сколько держится replenish tint до начала blend (секунды)
    pub replenish_delay: f32,

    /// Длительность blend replenish → active (секунды)
    pub replenish_fade: f32,

    pub active_tint: Tint,
    pub inactive_tint: Tint,
    pub replenish_tint: Tint,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            max_jumps: 3,
            replenish_delay: 0.5,
            replenish_fade: 0.5,
            active_tint: Tint::from_rgb8(180, 0, 70),
            inactive_tint: Tint::GRAY,
            replenish_tint: Tint::from_rgb8(255, 120, 170),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraShakeConfig {
    /// Скорость фазы walk bob (радианы в секунду)
    pub walk_shake_speed: f32,

    /// Амплитуда walk bob (метры)
    pub walk_shake_amount: f32,

    /// Линейный decay landing impulse (units/sec)
    pub landing_decay_rate: f32,

    /// Множитель частоты wobble: offset = impulse * sin(impulse * frequency)
    pub landing_frequency: f32,

    /// Impulse при автоматическом детекте приземления (0 = выключено)
    pub auto_landing_impulse: f32,
}

impl Default for CameraShakeConfig {
    fn default() -> Self {
        Self {
            walk_shake_speed: 14.0,
            walk_shake_amount: 0.05,
            landing_decay_rate: 4.0,
            landing_frequency: 20.0,
            auto_landing_impulse: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub initial_level: String,
    pub settings_scene: String,
    pub save_path: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            initial_level: "res://scenes/Levels/Level_1.tscn".to_string(),
            settings_scene: "res://scenes/SupportScenes/settings.tscn".to_string(),
            save_path: "user://savegame.ron".to_string(),
        }
    }
}

/// Имена input actions (биндинги живут в Godot Input Map)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub cancel_action: String,
    pub interact_action: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cancel_action: "ui_cancel".to_string(),
            interact_action: "ui_interaction".to_string(),
        }
    }
}

impl GameplayConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&source)
    }

    /// Config из файла, либо `Default` с warning (отсутствие config не фатально)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                logger::log_warning(&format!(
                    "⚠️ Gameplay config {:?} not loaded ({}), using defaults",
                    path.as_ref(),
                    e
                ));
                Self::default()
            }
        }
    }
}
