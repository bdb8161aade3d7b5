//! PlayerHud — jump indicators, restart prompt, teleport prompt
//!
//! # Scene structure
//! ```text
//! PlayerHud (Control)
//! ├── Jump1..JumpN (TextureRect)   — indicators (modulate = tint)
//! └── teleportLabel (Label)        — teleport prompt
//! ```
//! Restart label создаётся в `ready()` (bottom-center).
//!
//! # Flow
//! ```text
//! #[func] use_jump / replenish / reset ──JumpCommand──▶ ECS (HudPlugin)
//! show_teleport_label ──TeleportEligibilityChanged──▶ ECS
//! interact action ──InteractPressed──▶ ECS ──TeleportRequested──▶ signal `teleport_requested`
//! ECS JumpBudget / TeleportPrompt ──process()──▶ modulate + label visibility
//! ```
//! Команды применяются на ближайшем tick `SimulationBridge` (следующий frame,
//! если вызваны после него), `can_jump()` читает уже применённый budget.

use godot::classes::control::GrowDirection;
use godot::classes::{Control, IControl, InputEvent, Label, TextureRect};
use godot::builtin::Side;
use godot::global::{HorizontalAlignment, VerticalAlignment};
use godot::prelude::*;
use leapfall_simulation::{
    logger, InteractPressed, JumpBudget, JumpBudgetChanged, JumpCommand,
    TeleportEligibilityChanged, TeleportPrompt, TeleportRequested,
};

use super::tint_to_color;
use crate::simulation_bridge::{find_bridge, with_bridge, SimulationBridge, DEFAULT_BRIDGE_PATH};

/// Состояние HUD из ECS за один frame
struct HudFrame {
    budget: JumpBudget,
    budget_changed: bool,
    teleport: TeleportPrompt,
    teleport_requests: usize,
}

#[derive(GodotClass)]
#[class(base=Control)]
pub struct PlayerHud {
    base: Base<Control>,

    #[export]
    simulation_bridge_path: NodePath,

    /// Indicators ищутся как `{prefix}1`, `{prefix}2`, ...
    #[export]
    indicator_prefix: GString,

    #[export]
    teleport_label_path: NodePath,

    #[export]
    restart_text: GString,

    bridge: Option<Gd<SimulationBridge>>,

    /// None = indicator не найден в сцене (просто не рисуем)
    indicators: Vec<Option<Gd<TextureRect>>>,
    restart_label: Option<Gd<Label>>,
    teleport_label: Option<Gd<Label>>,

    /// Blend шёл на прошлом frame (последний tick переводит в Active)
    was_animating: bool,
    force_refresh: bool,
    teleport_visible: bool,

    interact_action: StringName,
}

#[godot_api]
impl IControl for PlayerHud {
    fn init(base: Base<Control>) -> Self {
        Self {
            base,
            simulation_bridge_path: NodePath::from(DEFAULT_BRIDGE_PATH),
            indicator_prefix: GString::from("Jump"),
            teleport_label_path: NodePath::from("teleportLabel"),
            restart_text: GString::from("Press 'G' to restart the level"),
            bridge: None,
            indicators: Vec::new(),
            restart_label: None,
            teleport_label: None,
            was_animating: false,
            force_refresh: true,
            teleport_visible: false,
            interact_action: StringName::from("ui_interaction"),
        }
    }

    fn ready(&mut self) {
        let bridge = find_bridge(&self.base(), &self.simulation_bridge_path);
        self.bridge = bridge;

        let config = with_bridge(&mut self.bridge, |bridge| bridge.gameplay_config())
            .unwrap_or_default();
        self.interact_action = StringName::from(config.input.interact_action.as_str());

        self.find_indicators(config.jumps.max_jumps as usize);
        self.create_restart_label();

        let teleport_label = self
            .base()
            .try_get_node_as::<Label>(&self.teleport_label_path);
        self.teleport_label = teleport_label;
        match self.teleport_label.as_mut() {
            Some(label) => label.set_visible(false),
            None => logger::log_error(&format!(
                "❌ PlayerHud: teleport label not found at '{}' - teleport prompt disabled",
                self.teleport_label_path
            )),
        }

        // Level start: полный budget, prompt скрыт
        self.send(JumpCommand::Reset);
        self.send(TeleportEligibilityChanged { eligible: false });

        logger::log(&format!(
            "✅ PlayerHud ready ({} jump indicators)",
            self.indicators.len()
        ));
    }

    fn process(&mut self, _delta: f64) {
        let Some(frame) = self.read_frame() else {
            return;
        };

        let animating = frame.budget.is_animating();
        if frame.budget_changed || animating || self.was_animating || self.force_refresh {
            self.apply_indicators(&frame.budget);
            self.force_refresh = false;
        }
        self.was_animating = animating;

        let teleport_visible = frame.teleport.label_visible();
        if teleport_visible != self.teleport_visible {
            self.teleport_visible = teleport_visible;
            if let Some(label) = self.teleport_label.as_mut() {
                label.set_visible(teleport_visible);
            }
        }

        for _ in 0..frame.teleport_requests {
            logger::log("🌀 Teleport requested");
            self.base_mut().emit_signal("teleport_requested", &[]);
        }
    }

    fn input(&mut self, event: Gd<InputEvent>) {
        // Eligibility проверяет ECS (forward_interact_presses)
        if event.is_action_pressed(&self.interact_action) {
            self.send(InteractPressed);
        }
    }
}

#[godot_api]
impl PlayerHud {
    #[signal]
    fn teleport_requested();

    #[func]
    pub fn can_jump(&mut self) -> bool {
        self.read_budget(|budget| budget.can_jump())
            .unwrap_or(false)
    }

    #[func]
    pub fn remaining_jumps(&mut self) -> i64 {
        self.read_budget(|budget| budget.remaining() as i64)
            .unwrap_or(0)
    }

    #[func]
    pub fn use_jump(&mut self) {
        self.send(JumpCommand::Use);
    }

    #[func]
    pub fn replenish_one_jump(&mut self) {
        self.send(JumpCommand::Replenish);
    }

    /// Level start / respawn
    #[func]
    pub fn reset_jumps(&mut self) {
        self.send(JumpCommand::Reset);
    }

    #[func]
    pub fn update_ui(&mut self) {
        self.force_refresh = true;
    }

    #[func]
    pub fn show_teleport_label(&mut self, show: bool) {
        self.send(TeleportEligibilityChanged { eligible: show });
    }

    fn send<E: bevy::ecs::event::Event>(&mut self, event: E) {
        with_bridge(&mut self.bridge, |bridge| bridge.send_event(event));
    }

    fn read_budget<R>(&mut self, f: impl FnOnce(&JumpBudget) -> R) -> Option<R> {
        with_bridge(&mut self.bridge, |bridge| {
            bridge
                .world()
                .and_then(|world| world.get_resource::<JumpBudget>())
                .map(f)
        })
        .flatten()
    }

    /// Output events + snapshot resources (events забираем только здесь)
    fn read_frame(&mut self) -> Option<HudFrame> {
        with_bridge(&mut self.bridge, |bridge| {
            let budget_changed = !bridge.drain_events::<JumpBudgetChanged>().is_empty();
            let teleport_requests = bridge.drain_events::<TeleportRequested>().len();

            let world = bridge.world()?;
            Some(HudFrame {
                budget: world.get_resource::<JumpBudget>()?.clone(),
                budget_changed,
                teleport: *world.get_resource::<TeleportPrompt>()?,
                teleport_requests,
            })
        })
        .flatten()
    }

    fn find_indicators(&mut self, count: usize) {
        let prefix = self.indicator_prefix.to_string();
        let mut missing = Vec::new();

        let indicators = (1..=count)
            .map(|number| {
                let path = format!("{}{}", prefix, number);
                let indicator = self.base().try_get_node_as::<TextureRect>(path.as_str());
                if indicator.is_none() {
                    missing.push(path);
                }
                indicator
            })
            .collect();
        self.indicators = indicators;

        if !missing.is_empty() {
            logger::log_error(&format!(
                "❌ PlayerHud: jump indicators not found: {}",
                missing.join(", ")
            ));
        }
    }

    fn create_restart_label(&mut self) {
        let mut label = Label::new_alloc();
        label.set_text(&self.restart_text);
        label.set_visible(false);
        label.set_anchor(Side::TOP, 1.0);
        label.set_anchor(Side::BOTTOM, 1.0);
        label.set_anchor(Side::LEFT, 0.5);
        label.set_anchor(Side::RIGHT, 0.5);
        label.set_h_grow_direction(GrowDirection::BOTH);
        label.set_vertical_alignment(VerticalAlignment::BOTTOM);
        label.set_horizontal_alignment(HorizontalAlignment::CENTER);

        self.base_mut().add_child(&label.clone().upcast::<Node>());
        self.restart_label = Some(label);
    }

    /// JumpBudget → modulate indicators + restart label
    fn apply_indicators(&mut self, budget: &JumpBudget) {
        for (index, indicator) in self.indicators.iter_mut().enumerate() {
            let (Some(indicator), Some(tint)) = (indicator.as_mut(), budget.tint_at(index)) else {
                continue;
            };
            indicator.set_modulate(tint_to_color(tint));
        }

        if let Some(label) = self.restart_label.as_mut() {
            label.set_visible(budget.restart_prompt_visible());
        }
    }
}
