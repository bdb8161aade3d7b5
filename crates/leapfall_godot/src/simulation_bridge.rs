//! SimulationBridge — мост Godot ↔ ECS (leapfall_simulation)
//!
//! # Архитектура
//! - Autoload node `/root/SimulationBridge`: Bevy App переживает смену сцен
//!   (jump budget, current session, menu flow)
//! - Каждый frame: Godot delta → `TimeUpdateStrategy` → `app.update()`
//! - `MainMenu` / `PlayerHud` / `ShakeCamera` шлют input events
//!   (`send_event`), забирают output events (`drain_events`) и читают
//!   resources/components через `world()`
//!
//! process_priority = -100: ECS тикает раньше UI nodes в том же frame,
//! поэтому команды от nodes применяются на ближайшем tick.

use std::time::Duration;

use bevy::app::App;
use bevy::ecs::event::{Event, Events};
use bevy::ecs::world::World;
use bevy::time::TimeUpdateStrategy;
use godot::classes::{INode, Node};
use godot::prelude::*;
use leapfall_simulation::{
    create_headless_app, logger, GameplayConfig, RonSaveService, SaveServiceRes, SimulationPlugin,
};

use crate::config::{globalize, load_gameplay_config};

/// Путь autoload по умолчанию (Project Settings → Autoload)
pub const DEFAULT_BRIDGE_PATH: &str = "/root/SimulationBridge";

#[derive(GodotClass)]
#[class(base=Node)]
pub struct SimulationBridge {
    base: Base<Node>,

    /// Bevy ECS App (HUD + camera shake + menu)
    simulation: Option<App>,
}

#[godot_api]
impl INode for SimulationBridge {
    fn init(base: Base<Node>) -> Self {
        Self {
            base,
            simulation: None,
        }
    }

    fn ready(&mut self) {
        crate::logger::install();

        let config = load_gameplay_config();
        let save_path = globalize(&config.menu.save_path);

        let mut app = create_headless_app();
        app.insert_resource(config);
        app.insert_resource(SaveServiceRes(Box::new(RonSaveService::new(&save_path))));
        app.add_plugins(SimulationPlugin);
        self.simulation = Some(app);

        self.base_mut().set_process_priority(-100);

        logger::log(&format!(
            "✅ SimulationBridge ready (save file: {})",
            save_path.display()
        ));
    }

    fn process(&mut self, delta: f64) {
        let Some(app) = &mut self.simulation else {
            return;
        };

        // Godot delta → Bevy Time (replenish blends, camera shake)
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            delta.max(0.0),
        )));
        app.update();
    }
}

#[godot_api]
impl SimulationBridge {
    #[func]
    pub fn is_running(&self) -> bool {
        self.simulation.is_some()
    }
}

impl SimulationBridge {
    pub fn world(&self) -> Option<&World> {
        self.simulation.as_ref().map(|app| app.world())
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.simulation.as_mut().map(|app| app.world_mut())
    }

    /// Config, с которым собрана симуляция (default если App ещё нет)
    pub fn gameplay_config(&self) -> GameplayConfig {
        self.world()
            .and_then(|world| world.get_resource::<GameplayConfig>())
            .cloned()
            .unwrap_or_default()
    }

    /// Input event в ECS (обработается на ближайшем `app.update()`)
    pub fn send_event<E: Event>(&mut self, event: E) {
        let Some(app) = &mut self.simulation else {
            logger::log_error("❌ SimulationBridge: simulation not initialized");
            return;
        };

        app.world_mut().send_event(event);
    }

    /// Забрать output events (у каждого типа ровно один Godot consumer)
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        let Some(world) = self.world_mut() else {
            return Vec::new();
        };
        let Some(mut events) = world.get_resource_mut::<Events<E>>() else {
            return Vec::new();
        };

        let drained: Vec<E> = events.drain().collect();
        drained
    }
}

/// Найти SimulationBridge по пути (ошибка в лог, если autoload не настроен)
pub fn find_bridge(node: &Node, path: &NodePath) -> Option<Gd<SimulationBridge>> {
    let bridge = node.try_get_node_as::<SimulationBridge>(path);
    if bridge.is_none() {
        logger::log_error(&format!(
            "❌ SimulationBridge not found at '{}' - add it as autoload in Project Settings",
            path
        ));
    }
    bridge
}

/// `f(&mut bridge)` если bridge найден
pub fn with_bridge<R>(
    bridge: &mut Option<Gd<SimulationBridge>>,
    f: impl FnOnce(&mut SimulationBridge) -> R,
) -> Option<R> {
    let bridge = bridge.as_mut()?;
    let mut guard = bridge.bind_mut();
    Some(f(&mut guard))
}
