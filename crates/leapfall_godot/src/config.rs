//! GameplayConfig из `res://config/gameplay.ron` (через Godot FileAccess — работает и в export .pck)

use std::path::PathBuf;

use godot::classes::file_access::ModeFlags;
use godot::classes::{FileAccess, ProjectSettings};
use godot::obj::Singleton;
use leapfall_simulation::{logger, GameplayConfig};

const CONFIG_PATH: &str = "res://config/gameplay.ron";

pub fn load_gameplay_config() -> GameplayConfig {
    if !FileAccess::file_exists(CONFIG_PATH) {
        logger::log(&format!("No {} - using default gameplay config", CONFIG_PATH));
        return GameplayConfig::default();
    }

    let Some(file) = FileAccess::open(CONFIG_PATH, ModeFlags::READ) else {
        logger::log_warning(&format!("⚠️ Cannot open {} - using defaults", CONFIG_PATH));
        return GameplayConfig::default();
    };

    let source = file.get_as_text().to_string();
    match GameplayConfig::from_ron_str(&source) {
        Ok(config) => config,
        Err(e) => {
            logger::log_error(&format!("❌ Invalid {}: {} - using defaults", CONFIG_PATH, e));
            GameplayConfig::default()
        }
    }
}

/// `user://` / `res://` → абсолютный путь файловой системы
pub fn globalize(path: &str) -> PathBuf {
    PathBuf::from(ProjectSettings::singleton().globalize_path(path).to_string())
}
