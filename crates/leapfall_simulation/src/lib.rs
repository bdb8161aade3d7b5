//! Leapfall Simulation Core
//!
//! Engine-independent gameplay/UI логика 3D платформера:
//! - `hud`: jump budget (0..3) + indicators + teleport prompt
//! - `camera`: first-person walk/landing shake
//! - `menu`: main menu flow + save seam
//!
//! HYBRID ARCHITECTURE:
//! - Rust core = state machines + ECS wiring (тестируется headless)
//! - Godot = presentation (TextureRect, Label, Camera3D, dialogs, scene tree)

use bevy::prelude::*;

pub mod camera;
pub mod config;
pub mod hud;
pub mod logger;
pub mod menu;

pub use camera::{CameraShake, CameraShakePlugin, LandingImpact, Locomotion};
pub use config::{
    CameraShakeConfig, ConfigError, GameplayConfig, InputConfig, JumpConfig, MenuConfig,
};
pub use hud::{
    HudPlugin, IndicatorState, InteractPressed, JumpBudget, JumpBudgetChanged, JumpCommand,
    TeleportEligibilityChanged, TeleportPrompt, TeleportRequested, Tint,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use menu::{
    CurrentSession, InMemorySaveService, MenuCapabilities, MenuCommand, MenuFlow, MenuInput,
    MenuPlugin, MenuState, RonSaveService, SaveError, SaveService, SaveServiceRes, SessionState,
};

/// Главный plugin (HUD + camera shake + menu)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameplayConfig>() {
            app.insert_resource(GameplayConfig::default());
        }

        app.add_plugins((HudPlugin, CameraShakePlugin, MenuPlugin));
    }
}

/// Создаёт minimal Bevy App для headless запуска (demo binary, тесты)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    app
}
