//! HUD events (jump budget commands, teleport prompt)
//!
//! # Flow
//! ```text
//! Gameplay logic ──JumpCommand──▶ apply_jump_commands ──JumpBudgetChanged──▶ HUD visuals
//! Proximity detector ──TeleportEligibilityChanged──▶ TeleportPrompt
//! Input layer ──InteractPressed──▶ forward_interact_presses ──TeleportRequested──▶ listeners
//! ```

use bevy::prelude::Event;

/// Команда на изменение jump budget (от gameplay / level logic)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpCommand {
    Use,
    Replenish,
    /// Level start / respawn
    Reset,
}

/// Budget реально изменился (или был reset)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpBudgetChanged {
    pub remaining: u8,
    pub restart_prompt_visible: bool,
}

/// Proximity detector: игрок вошёл/вышел из зоны телепорта
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeleportEligibilityChanged {
    pub eligible: bool,
}

/// Interact action нажат (just_pressed, один event на нажатие)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct InteractPressed;

/// One-shot уведомление: игрок запросил телепорт
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TeleportRequested;
