//! Teleport prompt — eligibility flag от внешнего proximity detector
//!
//! Флаг только presentational: показывает label и разрешает interact action.
//! Каждое нажатие interact при eligible = один TeleportRequested (без latch).

use bevy::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeleportPrompt {
    eligible: bool,
}

impl TeleportPrompt {
    pub fn eligible(&self) -> bool {
        self.eligible
    }

    /// Label visibility = eligibility (всегда вместе)
    pub fn label_visible(&self) -> bool {
        self.eligible
    }

    /// Возвращает `true` если флаг изменился
    pub fn set_eligible(&mut self, eligible: bool) -> bool {
        let changed = self.eligible != eligible;
        self.eligible = eligible;
        changed
    }

    /// Interact нажат: `true` = нужно emit teleport request
    pub fn on_interact_pressed(&self) -> bool {
        self.eligible
    }
}
