//! Main menu domain — new game / load / settings / exit
//!
//! # Архитектура
//!
//! ```text
//! Button / dialog signal
//!     ↓
//! MenuInput (ECS event)  ─or─  MainMenu node вызывает MenuFlow напрямую
//!     ↓
//! MenuFlow (state machine) ←→ SaveService (persistence)
//!     ↓
//! MenuCommand → presentation layer (dialog, scene change, overlay, quit)
//! ```

pub mod flow;
pub mod save;

pub use flow::{MenuCapabilities, MenuCommand, MenuFlow, MenuState};
pub use save::{
    InMemorySaveService, RonSaveService, SaveError, SaveService, SessionState,
    SAVE_FORMAT_VERSION,
};

use bevy::prelude::*;

use crate::config::GameplayConfig;

/// Нажатия в меню (buttons + confirmation dialog outcome)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    StartNewGame,
    LoadGame,
    Settings,
    Exit,
    ConfirmNewGame,
    CancelNewGame,
}

/// Текущая сессия (level) как ECS resource
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentSession(pub SessionState);

/// Persistence backend
#[derive(Resource)]
pub struct SaveServiceRes(pub Box<dyn SaveService>);

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameplayConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<SaveServiceRes>() {
            app.insert_resource(SaveServiceRes(Box::new(InMemorySaveService::default())));
        }

        app.insert_resource(MenuFlow::new(&config.menu, MenuCapabilities::default()))
            .init_resource::<CurrentSession>()
            .add_event::<MenuInput>()
            .add_event::<MenuCommand>()
            .add_systems(Update, route_menu_input);
    }
}

/// Система: MenuInput → MenuFlow → MenuCommand
pub fn route_menu_input(
    mut inputs: EventReader<MenuInput>,
    mut flow: ResMut<MenuFlow>,
    mut saves: ResMut<SaveServiceRes>,
    mut session: ResMut<CurrentSession>,
    mut commands: EventWriter<MenuCommand>,
) {
    for input in inputs.read() {
        let service = &mut *saves.0;
        let state = &mut session.0;

        let command = match input {
            MenuInput::StartNewGame => flow.on_start_new_game_pressed(service, state),
            MenuInput::LoadGame => flow.on_load_game_pressed(service, state),
            MenuInput::Settings => flow.on_settings_pressed(),
            MenuInput::Exit => flow.on_exit_pressed(),
            MenuInput::ConfirmNewGame => flow.on_confirm_new_game(service, state),
            MenuInput::CancelNewGame => flow.on_cancel_new_game(),
        };

        commands.write(command);
    }
}
