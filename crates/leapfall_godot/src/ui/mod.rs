//! UI domain — main menu + in-game HUD.
//!
//! # Architecture
//!
//! - **main_menu**: MainMenu node (start/load/settings/exit + new game confirmation)
//! - **player_hud**: PlayerHud node (jump indicators, restart prompt, teleport prompt)
//!
//! State machines (`MenuFlow`, `JumpBudget`, `TeleportPrompt`) живут в ECS
//! внутри SimulationBridge. Nodes шлют input events и применяют результат
//! (output events + resources) к Godot nodes.

pub mod main_menu;
pub mod player_hud;

pub use main_menu::MainMenu;
pub use player_hud::PlayerHud;

use godot::builtin::Color;
use leapfall_simulation::Tint;

pub(crate) fn tint_to_color(tint: Tint) -> Color {
    Color::from_rgba(tint.r, tint.g, tint.b, tint.a)
}
