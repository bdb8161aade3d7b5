//! GodotLogger implementation
//!
//! Bridges Rust logging to Godot's godot_print!/godot_error! + user://logs/game.log file.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use leapfall_simulation::{LogLevel, LogPrinter};

use crate::config::globalize;

const LOG_FILE: &str = "user://logs/game.log";

static INSTALL: Once = Once::new();
static FILE_ERROR_LOGGED: AtomicBool = AtomicBool::new(false);

pub struct GodotLogger {
    log_path: PathBuf,
}

/// Подключить GodotLogger (первый вызов очищает log file, остальные — no-op)
///
/// Вызывается из `SimulationBridge::ready()` (autoload, раньше любой сцены).
pub fn install() {
    INSTALL.call_once(|| {
        let logger = GodotLogger::new();
        logger.clear_log_file();
        leapfall_simulation::set_logger(Box::new(logger));
        leapfall_simulation::set_log_level(LogLevel::Debug);
        leapfall_simulation::log(&format!(
            "Leapfall session started {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
    });
}

impl LogPrinter for GodotLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::Error {
            godot::prelude::godot_error!("[{}] {}", level.as_str(), message);
        } else {
            godot::prelude::godot_print!("[{}] {}", level.as_str(), message);
        }

        self.append_to_file(level, message);
    }
}

impl GodotLogger {
    fn new() -> Self {
        Self {
            log_path: globalize(LOG_FILE),
        }
    }

    fn clear_log_file(&self) {
        let _ = std::fs::remove_file(&self.log_path);
    }

    fn append_to_file(&self, level: LogLevel, message: &str) {
        if let Some(parent) = self.log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
        {
            Ok(mut file) => {
                let _ = writeln!(file, "[{}] {}", level.as_str(), message);
            }
            Err(e) => {
                // Ошибку файла логируем только один раз
                if !FILE_ERROR_LOGGED.swap(true, Ordering::Relaxed) {
                    godot::prelude::godot_error!(
                        "❌ Failed to open log file {:?}: {}",
                        self.log_path,
                        e
                    );
                }
            }
        }
    }
}
