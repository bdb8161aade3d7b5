//! Main menu flow (start / load / settings / exit + new game confirmation)
//!
//! `MenuFlow` не трогает engine: каждый handler возвращает `MenuCommand`,
//! который presentation layer исполняет (показать dialog, сменить сцену,
//! открыть settings overlay, выйти). Persistence — только через `SaveService`.
//!
//! # New game
//! ```text
//! Start ─┬─ save нет ───────────────────────────▶ start_new_game → ChangeLevel
//!        └─ save есть → ShowConfirmation ─┬─ Confirm → start_new_game → ChangeLevel
//!                                         └─ Cancel  → Stay
//! ```

use bevy::prelude::{Event, Resource};

use super::save::{SaveService, SessionState};
use crate::config::MenuConfig;
use crate::logger;

/// Что должен сделать presentation layer после handler'а
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Остаться в меню без изменений
    Stay,
    ShowConfirmation,
    /// Сменить сцену на уровень (scene path)
    ChangeLevel(String),
    /// Инстанцировать settings view (scene path) как child overlay
    OpenSettings(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Idle,
    AwaitingConfirmation,
}

/// Какие optional UI элементы найдены при init
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCapabilities {
    pub confirmation_dialog: bool,
    pub settings: bool,
    pub load: bool,
}

impl Default for MenuCapabilities {
    fn default() -> Self {
        Self {
            confirmation_dialog: true,
            settings: true,
            load: true,
        }
    }
}

impl MenuCapabilities {
    /// Один раз при init: залогировать отсутствующие элементы
    pub fn report_missing(&self) {
        if !self.confirmation_dialog {
            logger::log_error(
                "❌ NewGameConfirmationDialog not found. Starting over an existing save is disabled.",
            );
        }
        if !self.settings {
            logger::log_error("❌ Settings button not found. Settings are unavailable.");
        }
        if !self.load {
            logger::log_warning("⚠️ Load button not found. Loading is unavailable.");
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct MenuFlow {
    state: MenuState,
    capabilities: MenuCapabilities,
    initial_level: String,
    settings_scene: String,
}

impl Default for MenuFlow {
    fn default() -> Self {
        Self::new(&MenuConfig::default(), MenuCapabilities::default())
    }
}

impl MenuFlow {
    pub fn new(config: &MenuConfig, capabilities: MenuCapabilities) -> Self {
        Self {
            state: MenuState::Idle,
            capabilities,
            initial_level: config.initial_level.clone(),
            settings_scene: config.settings_scene.clone(),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn capabilities(&self) -> MenuCapabilities {
        self.capabilities
    }

    /// Новый экземпляр меню: что реально найдено в сцене
    pub fn set_capabilities(&mut self, capabilities: MenuCapabilities) {
        self.capabilities = capabilities;
        self.state = MenuState::Idle;
    }

    pub fn on_start_new_game_pressed(
        &mut self,
        saves: &mut dyn SaveService,
        session: &mut SessionState,
    ) -> MenuCommand {
        if !saves.save_file_exists() {
            return self.start_new_game(saves, session);
        }

        // Без dialog нельзя подтвердить перезапись save — остаёмся в меню
        if !self.capabilities.confirmation_dialog {
            logger::log_error("❌ Cannot start new game: save exists and confirmation dialog is missing");
            return MenuCommand::Stay;
        }

        self.state = MenuState::AwaitingConfirmation;
        MenuCommand::ShowConfirmation
    }

    pub fn on_confirm_new_game(
        &mut self,
        saves: &mut dyn SaveService,
        session: &mut SessionState,
    ) -> MenuCommand {
        if self.state != MenuState::AwaitingConfirmation {
            logger::log_warning("⚠️ New game confirmation without pending dialog - ignored");
            return MenuCommand::Stay;
        }

        logger::log("Confirm new game");
        self.state = MenuState::Idle;
        self.start_new_game(saves, session)
    }

    pub fn on_cancel_new_game(&mut self) -> MenuCommand {
        logger::log("Cancel new game");
        self.state = MenuState::Idle;
        MenuCommand::Stay
    }

    /// Load: session меняется только если load полностью успешен
    pub fn on_load_game_pressed(
        &mut self,
        saves: &dyn SaveService,
        session: &mut SessionState,
    ) -> MenuCommand {
        if !self.capabilities.load {
            logger::log_warning(
                "⚠️ Load pressed, but Load button was not found at init - check the node path",
            );
            return MenuCommand::Stay;
        }

        if !saves.save_file_exists() {
            logger::log_info("No save file found.");
            return MenuCommand::Stay;
        }

        match saves.load_game() {
            Ok(loaded) => {
                *session = loaded;
                logger::log_info(&format!("🎮 Loading level {}", session.level_name()));
                MenuCommand::ChangeLevel(session.current_level.clone())
            }
            Err(e) => {
                logger::log_error(&format!("❌ Failed to load game: {}", e));
                MenuCommand::Stay
            }
        }
    }

    pub fn on_settings_pressed(&self) -> MenuCommand {
        if !self.capabilities.settings {
            logger::log_warning(
                "⚠️ Settings pressed, but Settings button was not found at init - check the node path",
            );
            return MenuCommand::Stay;
        }

        MenuCommand::OpenSettings(self.settings_scene.clone())
    }

    pub fn on_exit_pressed(&self) -> MenuCommand {
        logger::log_info("👋 Exit pressed");
        MenuCommand::Quit
    }

    /// Удалить старый save → initial level → сохранить → ChangeLevel
    ///
    /// Ошибки persistence логируются, но не блокируют переход на уровень.
    fn start_new_game(
        &mut self,
        saves: &mut dyn SaveService,
        session: &mut SessionState,
    ) -> MenuCommand {
        if let Err(e) = saves.delete_save_file() {
            logger::log_warning(&format!("⚠️ Failed to delete old save: {}", e));
        }

        *session = SessionState::new(self.initial_level.clone());

        if let Err(e) = saves.save_current_level(session) {
            logger::log_error(&format!("❌ Failed to save new session: {}", e));
        }

        logger::log_info(&format!("🎮 Starting new game at {}", session.level_name()));
        MenuCommand::ChangeLevel(session.current_level.clone())
    }
}
