//! HUD domain — jump budget indicators + teleport prompt
//!
//! # Архитектура
//!
//! - `jump_budget`: ограниченный счётчик прыжков (0..max) + indicator states
//! - `teleport`: eligibility flag для teleport label / interact action
//! - `tint`: engine-independent RGBA (Godot layer → `Color`)
//! - `events` / `systems`: ECS wiring (HudPlugin)
//!
//! Godot `PlayerHud` node владеет теми же `JumpBudget` / `TeleportPrompt`
//! напрямую и только применяет результат к TextureRect/Label.

pub mod events;
pub mod jump_budget;
pub mod systems;
pub mod teleport;
pub mod tint;

pub use events::*;
pub use jump_budget::{IndicatorState, JumpBudget};
pub use systems::*;
pub use teleport::TeleportPrompt;
pub use tint::Tint;

use bevy::prelude::*;

use crate::config::GameplayConfig;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameplayConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(JumpBudget::new(&config.jumps))
            .init_resource::<TeleportPrompt>()
            .add_event::<JumpCommand>()
            .add_event::<JumpBudgetChanged>()
            .add_event::<TeleportEligibilityChanged>()
            .add_event::<InteractPressed>()
            .add_event::<TeleportRequested>()
            .add_systems(
                Update,
                (
                    tick_indicator_blends,
                    apply_jump_commands,
                    apply_teleport_eligibility,
                    forward_interact_presses,
                )
                    .chain(),
            );
    }
}
