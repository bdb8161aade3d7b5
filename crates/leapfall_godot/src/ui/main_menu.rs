//! MainMenu — start / load / settings / exit
//!
//! # Архитектура
//! - Buttons + ConfirmationDialog ищутся по NodePath в `ready()`
//! - Optional элементы (load, settings, dialog) могут отсутствовать:
//!   фича отключается через `MenuCapabilities`, ошибка логируется один раз
//! - Handlers (`#[func]`) шлют `MenuInput` в ECS (`MenuPlugin` + `MenuFlow`
//!   в SimulationBridge), `process()` забирает `MenuCommand` и исполняет
//! - Persistence: `RonSaveService` в SimulationBridge (`user://savegame.ron`)
//!
//! Signals уже подключённые в редакторе не дублируются.

use godot::classes::{
    Button, ConfirmationDialog, Control, IControl, InputEvent, PackedScene, ResourceLoader,
};
use godot::global::Error;
use godot::prelude::*;
use leapfall_simulation::{logger, MenuCapabilities, MenuCommand, MenuFlow, MenuInput};

use crate::simulation_bridge::{find_bridge, with_bridge, SimulationBridge, DEFAULT_BRIDGE_PATH};

#[derive(GodotClass)]
#[class(base=Control)]
pub struct MainMenu {
    base: Base<Control>,

    #[export]
    simulation_bridge_path: NodePath,

    #[export]
    start_button_path: NodePath,

    #[export]
    load_button_path: NodePath,

    #[export]
    settings_button_path: NodePath,

    #[export]
    exit_button_path: NodePath,

    #[export]
    confirmation_dialog_path: NodePath,

    bridge: Option<Gd<SimulationBridge>>,

    confirmation_dialog: Option<Gd<ConfirmationDialog>>,
    cancel_action: StringName,
}

#[godot_api]
impl IControl for MainMenu {
    fn init(base: Base<Control>) -> Self {
        Self {
            base,
            simulation_bridge_path: NodePath::from(DEFAULT_BRIDGE_PATH),
            start_button_path: NodePath::from("VBoxContainer/Start"),
            load_button_path: NodePath::from("VBoxContainer/Load"),
            settings_button_path: NodePath::from("VBoxContainer/Settings"),
            exit_button_path: NodePath::from("VBoxContainer/Exit"),
            confirmation_dialog_path: NodePath::from("NewGameConfirmationDialog"),
            bridge: None,
            confirmation_dialog: None,
            cancel_action: StringName::from("ui_cancel"),
        }
    }

    fn ready(&mut self) {
        let bridge = find_bridge(&self.base(), &self.simulation_bridge_path);
        self.bridge = bridge;

        let config = with_bridge(&mut self.bridge, |bridge| bridge.gameplay_config())
            .unwrap_or_default();
        self.cancel_action = StringName::from(config.input.cancel_action.as_str());

        let dialog = self
            .base()
            .try_get_node_as::<ConfirmationDialog>(&self.confirmation_dialog_path);
        self.confirmation_dialog = dialog;

        let start_button = self.find_button(&self.start_button_path);
        let load_button = self.find_button(&self.load_button_path);
        let settings_button = self.find_button(&self.settings_button_path);
        let exit_button = self.find_button(&self.exit_button_path);

        if start_button.is_none() {
            logger::log_warning("⚠️ Start button not found. Check the node path.");
        }

        let capabilities = MenuCapabilities {
            confirmation_dialog: self.confirmation_dialog.is_some(),
            settings: settings_button.is_some(),
            load: load_button.is_some(),
        };
        capabilities.report_missing();
        with_bridge(&mut self.bridge, |bridge| {
            if let Some(mut flow) = bridge
                .world_mut()
                .and_then(|world| world.get_resource_mut::<MenuFlow>())
            {
                flow.set_capabilities(capabilities);
            }
        });

        self.connect_button(start_button, "on_start_new_game_pressed");
        self.connect_button(load_button, "on_load_game_pressed");
        self.connect_button(settings_button, "on_settings_button_pressed");
        self.connect_button(exit_button, "on_exit_pressed");
        self.connect_dialog();

        self.base_mut().set_process_unhandled_input(true);

        logger::log("✅ MainMenu ready");
    }

    fn process(&mut self, _delta: f64) {
        let commands = with_bridge(&mut self.bridge, |bridge| {
            bridge.drain_events::<MenuCommand>()
        })
        .unwrap_or_default();

        for command in commands {
            self.execute(command);
        }
    }

    fn unhandled_input(&mut self, event: Gd<InputEvent>) {
        if !event.is_action_pressed(&self.cancel_action) {
            return;
        }

        if let Some(mut viewport) = self.base().get_viewport() {
            viewport.set_input_as_handled();
        }
        logger::log("ESC pressed in Main Menu");
    }
}

#[godot_api]
impl MainMenu {
    #[func]
    pub fn on_start_new_game_pressed(&mut self) {
        logger::log("🎮 Start pressed");
        self.send(MenuInput::StartNewGame);
    }

    #[func]
    pub fn on_load_game_pressed(&mut self) {
        logger::log("🎮 Load pressed");
        self.send(MenuInput::LoadGame);
    }

    #[func]
    pub fn on_settings_button_pressed(&mut self) {
        self.send(MenuInput::Settings);
    }

    #[func]
    pub fn on_exit_pressed(&mut self) {
        self.send(MenuInput::Exit);
    }

    #[func]
    pub fn on_confirm_new_game(&mut self) {
        self.send(MenuInput::ConfirmNewGame);
    }

    #[func]
    pub fn on_cancel_new_game(&mut self) {
        self.send(MenuInput::CancelNewGame);
    }

    fn send(&mut self, input: MenuInput) {
        with_bridge(&mut self.bridge, |bridge| bridge.send_event(input));
    }

    fn find_button(&self, path: &NodePath) -> Option<Gd<Button>> {
        if path.is_empty() {
            return None;
        }
        self.base().try_get_node_as::<Button>(path)
    }

    /// Подключить `pressed` → handler (если ещё не подключён в редакторе)
    fn connect_button(&self, button: Option<Gd<Button>>, handler: &str) {
        let Some(mut button) = button else {
            return;
        };

        let callable = self.base().callable(handler);
        if !button.is_connected("pressed", &callable) {
            button.connect("pressed", &callable);
        }
    }

    fn connect_dialog(&mut self) {
        let confirmed = self.base().callable("on_confirm_new_game");
        let canceled = self.base().callable("on_cancel_new_game");

        let Some(dialog) = self.confirmation_dialog.as_mut() else {
            return;
        };

        if !dialog.is_connected("confirmed", &confirmed) {
            dialog.connect("confirmed", &confirmed);
        }
        if !dialog.is_connected("canceled", &canceled) {
            dialog.connect("canceled", &canceled);
        }
    }

    /// MenuCommand → Godot API
    fn execute(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Stay => {}
            MenuCommand::ShowConfirmation => {
                if let Some(dialog) = self.confirmation_dialog.as_mut() {
                    dialog.popup_centered();
                }
            }
            MenuCommand::ChangeLevel(level) => self.change_level(&level),
            MenuCommand::OpenSettings(scene_path) => self.open_settings(&scene_path),
            MenuCommand::Quit => {
                if let Some(mut tree) = self.base().get_tree() {
                    tree.quit();
                }
            }
        }
    }

    fn change_level(&mut self, level: &str) {
        let Some(mut tree) = self.base().get_tree() else {
            logger::log_error("❌ MainMenu: SceneTree not available");
            return;
        };

        let result = tree.change_scene_to_file(level);
        if result != Error::OK {
            logger::log_error(&format!(
                "❌ Failed to change scene to {}: {:?}",
                level, result
            ));
        }
    }

    /// Settings view как child overlay; отсутствие scene — не фатально
    fn open_settings(&mut self, scene_path: &str) {
        let Some(scene) = load_packed_scene(scene_path) else {
            logger::log_error("❌ Failed to load settings scene.");
            return;
        };

        let Some(settings) = scene.instantiate() else {
            logger::log_error(&format!("❌ Failed to instantiate settings scene: {}", scene_path));
            return;
        };

        self.base_mut().add_child(&settings);
        logger::log("⚙️ Settings opened");
    }
}

/// Load PackedScene from Godot resource path (None если ресурса нет)
fn load_packed_scene(path: &str) -> Option<Gd<PackedScene>> {
    let mut resource_loader = ResourceLoader::singleton();

    if !resource_loader.exists(path) {
        return None;
    }

    resource_loader
        .load(path)
        .and_then(|resource| resource.try_cast::<PackedScene>().ok())
}
