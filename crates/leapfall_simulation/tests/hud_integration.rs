//! HUD integration test
//!
//! Headless App + SimulationPlugin: JumpCommand / teleport events через ECS.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use leapfall_simulation::*;

fn create_hud_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app
}

/// Забрать все events типа E (оба буфера)
fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

#[test]
fn test_jump_commands_keep_budget_in_bounds() {
    let mut app = create_hud_app();

    for _ in 0..4 {
        app.world_mut().send_event(JumpCommand::Use);
    }
    app.update();

    let budget = app.world().resource::<JumpBudget>();
    assert_eq!(budget.remaining(), 0);
    assert!(budget.restart_prompt_visible());

    // 4-й Use — no-op, changed events только на 3 реальных изменения
    let changed = drain::<JumpBudgetChanged>(&mut app);
    assert_eq!(changed.len(), 3);
    assert_eq!(
        changed.last(),
        Some(&JumpBudgetChanged {
            remaining: 0,
            restart_prompt_visible: true
        })
    );

    for _ in 0..5 {
        app.world_mut().send_event(JumpCommand::Replenish);
    }
    app.update();

    assert_eq!(app.world().resource::<JumpBudget>().remaining(), 3);
    assert_eq!(drain::<JumpBudgetChanged>(&mut app).len(), 3);
}

#[test]
fn test_reset_restores_full_budget() {
    let mut app = create_hud_app();

    app.world_mut().send_event(JumpCommand::Use);
    app.world_mut().send_event(JumpCommand::Use);
    app.update();

    app.world_mut().send_event(JumpCommand::Reset);
    app.update();

    let budget = app.world().resource::<JumpBudget>();
    assert_eq!(budget.remaining(), 3);
    assert!(!budget.restart_prompt_visible());
    assert!(budget
        .indicators()
        .iter()
        .all(|state| *state == IndicatorState::Active));
}

#[test]
fn test_replenish_blend_settles_over_time() {
    let mut app = create_hud_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));

    app.world_mut().send_event(JumpCommand::Use);
    app.update();
    app.world_mut().send_event(JumpCommand::Replenish);
    app.update();

    assert!(app.world().resource::<JumpBudget>().is_animating());

    // Hold начинается с 0 в frame восстановления, отсчёт со следующего frame
    assert_eq!(
        app.world().resource::<JumpBudget>().indicator(2),
        Some(IndicatorState::Replenishing { elapsed: 0.0 })
    );
    app.update();
    let Some(IndicatorState::Replenishing { elapsed }) =
        app.world().resource::<JumpBudget>().indicator(2)
    else {
        panic!("indicator 2 should still be replenishing");
    };
    assert!((elapsed - 0.1).abs() < 1e-4);

    // delay 0.5s + fade 0.5s = 1s → 15 тиков по 100ms с запасом
    for _ in 0..15 {
        app.update();
    }

    let budget = app.world().resource::<JumpBudget>();
    assert!(!budget.is_animating());
    assert_eq!(budget.indicator(2), Some(IndicatorState::Active));
}

#[test]
fn test_teleport_request_once_per_press() {
    let mut app = create_hud_app();

    // Не eligible — нажатие игнорируется
    app.world_mut().send_event(InteractPressed);
    app.update();
    assert_eq!(drain::<TeleportRequested>(&mut app).len(), 0);

    app.world_mut()
        .send_event(TeleportEligibilityChanged { eligible: true });
    app.world_mut().send_event(InteractPressed);
    app.update();
    assert!(app.world().resource::<TeleportPrompt>().label_visible());
    assert_eq!(drain::<TeleportRequested>(&mut app).len(), 1);

    // Второе нажатие без re-arm — ещё один request (без latch)
    app.world_mut().send_event(InteractPressed);
    app.update();
    assert_eq!(drain::<TeleportRequested>(&mut app).len(), 1);

    // Кадр без нажатия — ничего
    app.update();
    assert_eq!(drain::<TeleportRequested>(&mut app).len(), 0);

    app.world_mut()
        .send_event(TeleportEligibilityChanged { eligible: false });
    app.world_mut().send_event(InteractPressed);
    app.update();
    assert_eq!(drain::<TeleportRequested>(&mut app).len(), 0);
    assert!(!app.world().resource::<TeleportPrompt>().label_visible());
}

#[test]
fn test_custom_max_jumps_from_config() {
    let mut app = create_headless_app();
    let mut config = GameplayConfig::default();
    config.jumps.max_jumps = 5;
    app.insert_resource(config);
    app.add_plugins(SimulationPlugin);

    let budget = app.world().resource::<JumpBudget>();
    assert_eq!(budget.max(), 5);
    assert_eq!(budget.indicators().len(), 5);
}
