//! Main menu integration test
//!
//! MenuInput → MenuFlow → MenuCommand с file-backed RonSaveService.

use bevy::prelude::*;
use leapfall_simulation::*;

const LEVEL_1: &str = "res://scenes/Levels/Level_1.tscn";

fn create_menu_app(save_path: &std::path::Path) -> App {
    let mut app = create_headless_app();
    app.insert_resource(SaveServiceRes(Box::new(RonSaveService::new(save_path))));
    app.add_plugins(SimulationPlugin);
    app
}

fn press(app: &mut App, input: MenuInput) -> Vec<MenuCommand> {
    app.world_mut().send_event(input);
    app.update();
    app.world_mut()
        .resource_mut::<Events<MenuCommand>>()
        .drain()
        .collect()
}

#[test]
fn test_new_game_without_save_skips_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("savegame.ron");
    let mut app = create_menu_app(&save_path);

    let commands = press(&mut app, MenuInput::StartNewGame);

    assert_eq!(commands, vec![MenuCommand::ChangeLevel(LEVEL_1.to_string())]);
    assert!(save_path.is_file());
    assert_eq!(
        app.world().resource::<CurrentSession>().0.level_name(),
        "Level_1"
    );
}

#[test]
fn test_new_game_over_existing_save_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("savegame.ron");
    RonSaveService::new(&save_path)
        .save_current_level(&SessionState::new("res://scenes/Levels/Level_5.tscn"))
        .unwrap();

    let mut app = create_menu_app(&save_path);

    assert_eq!(
        press(&mut app, MenuInput::StartNewGame),
        vec![MenuCommand::ShowConfirmation]
    );
    assert_eq!(app.world().resource::<MenuFlow>().state(), MenuState::AwaitingConfirmation);

    // Cancel — save не тронут
    assert_eq!(press(&mut app, MenuInput::CancelNewGame), vec![MenuCommand::Stay]);
    let kept = RonSaveService::new(&save_path).load_game().unwrap();
    assert_eq!(kept.level_name(), "Level_5");

    // Снова Start → Confirm — перезапись на Level_1
    press(&mut app, MenuInput::StartNewGame);
    assert_eq!(
        press(&mut app, MenuInput::ConfirmNewGame),
        vec![MenuCommand::ChangeLevel(LEVEL_1.to_string())]
    );
    let overwritten = RonSaveService::new(&save_path).load_game().unwrap();
    assert_eq!(overwritten.level_name(), "Level_1");
}

#[test]
fn test_load_game_flow() {
    let dir = tempfile::tempdir().unwrap();
    let save_path = dir.path().join("savegame.ron");
    let mut app = create_menu_app(&save_path);

    // Нет save
    assert_eq!(press(&mut app, MenuInput::LoadGame), vec![MenuCommand::Stay]);

    RonSaveService::new(&save_path)
        .save_current_level(&SessionState::new("res://scenes/Levels/Level_2.tscn"))
        .unwrap();
    assert_eq!(
        press(&mut app, MenuInput::LoadGame),
        vec![MenuCommand::ChangeLevel(
            "res://scenes/Levels/Level_2.tscn".to_string()
        )]
    );

    // Corrupted save → остаёмся, session без изменений
    std::fs::write(&save_path, "not ron at all").unwrap();
    assert_eq!(press(&mut app, MenuInput::LoadGame), vec![MenuCommand::Stay]);
    assert_eq!(
        app.world().resource::<CurrentSession>().0.level_name(),
        "Level_2"
    );
}

#[test]
fn test_settings_and_exit_commands() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_menu_app(&dir.path().join("savegame.ron"));

    assert_eq!(
        press(&mut app, MenuInput::Settings),
        vec![MenuCommand::OpenSettings(
            "res://scenes/SupportScenes/settings.tscn".to_string()
        )]
    );
    assert_eq!(press(&mut app, MenuInput::Exit), vec![MenuCommand::Quit]);
}
