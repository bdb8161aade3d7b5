//! First-person camera shake (walk bob + landing wobble)
//!
//! # Порядок за frame
//! 1. Walk shake (только grounded): `phase += dt * speed` (wrap в [0, TAU)),
//!    offset = `amount * sin(phase)`
//! 2. Landing shake: impulse линейно decay к 0 (`landing_decay_rate`/sec),
//!    пока > 0 → offset = `impulse * sin(impulse * frequency)`.
//!    Impulse == 0 + grounded + стоим на месте → snap ровно в base.
//!
//! Landing перезаписывает walk (не суммируется). Позиция всегда
//! `base + offset` — никакого накопления между frames.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::config::CameraShakeConfig;

/// Состояние передвижения body, к которому прикреплена камера
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Locomotion {
    pub grounded: bool,
    pub velocity: Vec3,
}

impl Locomotion {
    pub fn new(grounded: bool, velocity: Vec3) -> Self {
        Self { grounded, velocity }
    }

    /// Горизонтальная скорость ровно 0 (вертикаль не учитываем)
    pub fn is_horizontally_stationary(&self) -> bool {
        self.velocity.x == 0.0 && self.velocity.z == 0.0
    }
}

#[derive(Component, Debug, Clone)]
pub struct CameraShake {
    /// Anchor позиция камеры (local space), offset всегда от неё
    pub base_position: Vec3,
    phase: f32,
    landing_impulse: f32,
    /// Grounded на прошлом observe (для детекта приземления)
    was_grounded: bool,
    config: CameraShakeConfig,
}

impl CameraShake {
    pub fn new(base_position: Vec3, config: CameraShakeConfig) -> Self {
        Self {
            base_position,
            phase: 0.0,
            landing_impulse: 0.0,
            was_grounded: true,
            config,
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn landing_impulse(&self) -> f32 {
        self.landing_impulse
    }

    pub fn is_landing_active(&self) -> bool {
        self.landing_impulse > 0.0
    }

    pub fn config(&self) -> &CameraShakeConfig {
        &self.config
    }

    /// Запустить landing wobble (отрицательные значения игнорируются)
    pub fn trigger_landing(&mut self, magnitude: f32) {
        self.landing_impulse = magnitude.max(0.0);
    }

    /// Переход airborne → grounded: `Some(auto_landing_impulse)`.
    /// `None` если перехода не было или auto landing выключен (impulse 0).
    pub fn observe_ground_contact(&mut self, grounded: bool) -> Option<f32> {
        let landed = grounded && !self.was_grounded;
        self.was_grounded = grounded;

        let magnitude = self.config.auto_landing_impulse;
        (landed && magnitude > 0.0).then_some(magnitude)
    }

    /// Один frame shake. `Some(position)` — записать в камеру,
    /// `None` — камеру не трогать (в воздухе без landing impulse).
    pub fn update(&mut self, delta: f32, locomotion: &Locomotion) -> Option<Vec3> {
        let mut position = None;

        if locomotion.grounded {
            self.phase = (self.phase + delta * self.config.walk_shake_speed).rem_euclid(TAU);
            let offset = self.phase.sin() * self.config.walk_shake_amount;
            position = Some(self.base_position + Vec3::new(0.0, offset, 0.0));
        }

        if self.landing_impulse > 0.0 {
            self.landing_impulse = move_toward(
                self.landing_impulse,
                0.0,
                delta * self.config.landing_decay_rate,
            );
            let offset =
                (self.landing_impulse * self.config.landing_frequency).sin() * self.landing_impulse;
            position = Some(self.base_position + Vec3::new(0.0, offset, 0.0));
        } else if locomotion.grounded && locomotion.is_horizontally_stationary() {
            position = Some(self.base_position);
        }

        position
    }
}

/// Сдвинуть `from` к `to` не больше чем на `max_delta` (без overshoot)
pub fn move_toward(from: f32, to: f32, max_delta: f32) -> f32 {
    if (to - from).abs() <= max_delta {
        to
    } else {
        from + (to - from).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Vec3 = Vec3::new(0.0, 1.6, 0.0);

    fn shake() -> CameraShake {
        CameraShake::new(BASE, CameraShakeConfig::default())
    }

    #[test]
    fn test_move_toward() {
        assert_eq!(move_toward(1.0, 0.0, 0.25), 0.75);
        assert_eq!(move_toward(0.1, 0.0, 0.25), 0.0);
        assert_eq!(move_toward(-1.0, 0.0, 0.5), -0.5);
    }

    #[test]
    fn test_walk_shake_at_phase_zero_is_base() {
        let mut shake = shake();
        let moving = Locomotion::new(true, Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(shake.update(0.0, &moving), Some(BASE));
        assert_eq!(shake.phase(), 0.0);
    }

    #[test]
    fn test_walk_shake_bobs_from_base_without_compounding() {
        let mut shake = shake();
        let config = shake.config().clone();
        let moving = Locomotion::new(true, Vec3::new(0.0, 0.0, -3.0));

        let mut expected_phase = 0.0_f32;
        for _ in 0..50 {
            let position = shake.update(0.016, &moving).unwrap();
            expected_phase += 0.016 * config.walk_shake_speed;

            let expected_y = BASE.y + expected_phase.sin() * config.walk_shake_amount;
            assert!((position.y - expected_y).abs() < 1e-5);
            assert_eq!(position.x, BASE.x);
            assert_eq!(position.z, BASE.z);
            assert!((position.y - BASE.y).abs() <= config.walk_shake_amount + 1e-6);
        }
    }

    #[test]
    fn test_airborne_without_impulse_leaves_camera_untouched() {
        let mut shake = shake();
        let falling = Locomotion::new(false, Vec3::new(0.0, -5.0, 0.0));

        assert_eq!(shake.update(0.016, &falling), None);
        assert_eq!(shake.phase(), 0.0);
    }

    #[test]
    fn test_landing_shake_overrides_walk() {
        let mut shake = shake();
        let config = shake.config().clone();
        let moving = Locomotion::new(true, Vec3::new(2.0, 0.0, 0.0));

        shake.trigger_landing(0.5);
        let position = shake.update(0.05, &moving).unwrap();

        let impulse = 0.5 - 0.05 * config.landing_decay_rate;
        let expected_y = BASE.y + (impulse * config.landing_frequency).sin() * impulse;
        assert!((shake.landing_impulse() - impulse).abs() < 1e-6);
        assert!((position.y - expected_y).abs() < 1e-5);

        // Walk phase продолжает идти под landing shake
        assert!(shake.phase() > 0.0);
    }

    #[test]
    fn test_landing_shake_decays_to_exact_base() {
        let mut shake = shake();
        let standing = Locomotion::new(true, Vec3::ZERO);

        shake.trigger_landing(0.3);

        let mut last = None;
        for _ in 0..200 {
            last = shake.update(0.016, &standing);
        }

        assert!(!shake.is_landing_active());
        assert_eq!(shake.landing_impulse(), 0.0);
        assert_eq!(last, Some(BASE));
    }

    #[test]
    fn test_impulse_magnitude_strictly_decreases() {
        let mut shake = shake();
        let standing = Locomotion::new(true, Vec3::ZERO);
        shake.trigger_landing(1.0);

        let mut previous = shake.landing_impulse();
        while shake.is_landing_active() {
            shake.update(0.02, &standing);
            assert!(shake.landing_impulse() < previous);
            previous = shake.landing_impulse();
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_walk_phase_keeps_advancing_after_long_walk() {
        let mut shake = shake();
        let config = shake.config().clone();
        let moving = Locomotion::new(true, Vec3::new(0.0, 0.0, -3.0));

        // ~83 часа ходьбы: без wrap шаг 0.23 теряется в точности f32
        shake.phase = 4_194_304.0;
        let first = shake.update(1.0 / 60.0, &moving).unwrap();
        let phase = shake.phase();
        let second = shake.update(1.0 / 60.0, &moving).unwrap();

        assert!((0.0..TAU).contains(&phase));
        assert!((0.0..TAU).contains(&shake.phase()));
        assert_ne!(phase, shake.phase());
        assert_ne!(first, second);
        assert!((second.y - BASE.y).abs() <= config.walk_shake_amount + 1e-6);
    }

    #[test]
    fn test_observe_ground_contact_detects_landing_once() {
        let mut shake = shake();
        let impulse = shake.config().auto_landing_impulse;

        // Стартуем grounded — не landing
        assert_eq!(shake.observe_ground_contact(true), None);
        assert_eq!(shake.observe_ground_contact(false), None);
        assert_eq!(shake.observe_ground_contact(false), None);
        assert_eq!(shake.observe_ground_contact(true), Some(impulse));
        assert_eq!(shake.observe_ground_contact(true), None);
    }

    #[test]
    fn test_auto_landing_disabled_by_zero_impulse() {
        let config = CameraShakeConfig {
            auto_landing_impulse: 0.0,
            ..Default::default()
        };
        let mut shake = CameraShake::new(BASE, config);

        shake.observe_ground_contact(false);
        assert_eq!(shake.observe_ground_contact(true), None);
    }

    #[test]
    fn test_negative_trigger_is_ignored() {
        let mut shake = shake();
        shake.trigger_landing(-2.0);
        assert!(!shake.is_landing_active());
    }

    #[test]
    fn test_vertical_velocity_does_not_block_snap() {
        let mut shake = shake();
        let standing = Locomotion::new(true, Vec3::new(0.0, -0.1, 0.0));
        assert!(standing.is_horizontally_stationary());
        assert_eq!(shake.update(0.016, &standing), Some(BASE));
    }
}
