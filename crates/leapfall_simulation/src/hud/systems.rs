//! HUD systems (Update schedule)

use bevy::prelude::*;

use super::events::{
    InteractPressed, JumpBudgetChanged, JumpCommand, TeleportEligibilityChanged,
    TeleportRequested,
};
use super::jump_budget::JumpBudget;
use super::teleport::TeleportPrompt;
use crate::logger;

/// Система: применить JumpCommand к budget
///
/// JumpBudgetChanged пишется только если счётчик изменился (Reset — всегда).
pub fn apply_jump_commands(
    mut commands: EventReader<JumpCommand>,
    mut budget: ResMut<JumpBudget>,
    mut changed: EventWriter<JumpBudgetChanged>,
) {
    for command in commands.read() {
        let applied = match command {
            JumpCommand::Use => budget.use_jump(),
            JumpCommand::Replenish => budget.replenish_one_jump(),
            JumpCommand::Reset => {
                budget.reset_jumps();
                true
            }
        };

        if !applied {
            continue;
        }

        changed.write(JumpBudgetChanged {
            remaining: budget.remaining(),
            restart_prompt_visible: budget.restart_prompt_visible(),
        });

        if budget.restart_prompt_visible() {
            logger::log("🦘 Out of jumps - restart prompt shown");
        }
    }
}

/// Система: продвинуть replenish blends
///
/// Запускается до `apply_jump_commands`: indicator, восстановленный в этом
/// frame, начинает отсчёт hold с 0 только со следующего frame.
///
/// `bypass_change_detection` пока ничего не анимируется — иначе budget
/// помечался бы Changed каждый frame.
pub fn tick_indicator_blends(time: Res<Time>, mut budget: ResMut<JumpBudget>) {
    if !budget.bypass_change_detection().is_animating() {
        return;
    }

    budget.tick(time.delta_secs());
}

/// Система: proximity detector → TeleportPrompt
pub fn apply_teleport_eligibility(
    mut events: EventReader<TeleportEligibilityChanged>,
    mut prompt: ResMut<TeleportPrompt>,
) {
    for event in events.read() {
        if prompt.set_eligible(event.eligible) {
            logger::log(&format!("🌀 Teleport prompt eligible: {}", event.eligible));
        }
    }
}

/// Система: InteractPressed → TeleportRequested (один на нажатие, если eligible)
pub fn forward_interact_presses(
    mut presses: EventReader<InteractPressed>,
    prompt: Res<TeleportPrompt>,
    mut requests: EventWriter<TeleportRequested>,
) {
    for _press in presses.read() {
        if prompt.on_interact_pressed() {
            requests.write(TeleportRequested);
        }
    }
}
