//! Jump budget — ограниченный счётчик прыжков + состояние indicators
//!
//! # Инварианты
//! - `remaining` всегда в [0, max]
//! - use при 0 и replenish при max — тихий no-op (не ошибка)
//! - restart prompt виден ровно когда `remaining == 0`
//!
//! # Replenish cue
//! Только что восстановленный indicator держит `replenish_tint` в течение
//! `replenish_delay`, затем за `replenish_fade` плавно уходит в `active_tint`.

use bevy::prelude::Resource;

use super::tint::Tint;
use crate::config::JumpConfig;

/// Визуальное состояние одного indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorState {
    Active,
    Inactive,
    /// Только что восстановлен; `elapsed` секунд с момента replenish
    Replenishing { elapsed: f32 },
}

#[derive(Resource, Debug, Clone)]
pub struct JumpBudget {
    remaining: u8,
    max: u8,
    indicators: Vec<IndicatorState>,
    active_tint: Tint,
    inactive_tint: Tint,
    replenish_tint: Tint,
    replenish_delay: f32,
    replenish_fade: f32,
}

impl Default for JumpBudget {
    fn default() -> Self {
        Self::new(&JumpConfig::default())
    }
}

impl JumpBudget {
    pub fn new(config: &JumpConfig) -> Self {
        let max = config.max_jumps;
        Self {
            remaining: max,
            max,
            indicators: vec![IndicatorState::Active; max as usize],
            active_tint: config.active_tint,
            inactive_tint: config.inactive_tint,
            replenish_tint: config.replenish_tint,
            replenish_delay: config.replenish_delay.max(0.0),
            replenish_fade: config.replenish_fade.max(0.0),
        }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn can_jump(&self) -> bool {
        self.remaining > 0
    }

    pub fn restart_prompt_visible(&self) -> bool {
        self.remaining == 0
    }

    /// Потратить один прыжок. `false` если прыжков нет (no-op)
    pub fn use_jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }

        self.remaining -= 1;
        self.refresh(None);
        true
    }

    /// Восстановить один прыжок. `false` если уже max (no-op)
    pub fn replenish_one_jump(&mut self) -> bool {
        if self.remaining >= self.max {
            return false;
        }

        self.remaining += 1;
        self.refresh(Some(self.remaining as usize - 1));
        true
    }

    /// Level start / respawn: полный budget, все indicators active
    pub fn reset_jumps(&mut self) {
        self.remaining = self.max;
        self.refresh(None);
    }

    /// Перерисовать indicators из счётчика (index < remaining → active)
    pub fn refresh(&mut self, replenished: Option<usize>) {
        let remaining = self.remaining as usize;

        for (index, state) in self.indicators.iter_mut().enumerate() {
            *state = if index >= remaining {
                IndicatorState::Inactive
            } else if replenished == Some(index) {
                IndicatorState::Replenishing { elapsed: 0.0 }
            } else {
                IndicatorState::Active
            };
        }
    }

    /// Продвинуть replenish blends на `delta` секунд
    pub fn tick(&mut self, delta: f32) {
        let settle_time = self.replenish_delay + self.replenish_fade;

        for state in self.indicators.iter_mut() {
            if let IndicatorState::Replenishing { elapsed } = state {
                *elapsed += delta;
                if *elapsed >= settle_time {
                    *state = IndicatorState::Active;
                }
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.indicators
            .iter()
            .any(|state| matches!(state, IndicatorState::Replenishing { .. }))
    }

    pub fn indicators(&self) -> &[IndicatorState] {
        &self.indicators
    }

    pub fn indicator(&self, index: usize) -> Option<IndicatorState> {
        self.indicators.get(index).copied()
    }

    /// Текущий tint indicator'а (None если index вне range)
    pub fn tint_at(&self, index: usize) -> Option<Tint> {
        let tint = match self.indicator(index)? {
            IndicatorState::Active => self.active_tint,
            IndicatorState::Inactive => self.inactive_tint,
            IndicatorState::Replenishing { elapsed } => {
                if elapsed < self.replenish_delay {
                    self.replenish_tint
                } else if self.replenish_fade <= 0.0 {
                    self.active_tint
                } else {
                    let t = (elapsed - self.replenish_delay) / self.replenish_fade;
                    self.replenish_tint.lerp(self.active_tint, t)
                }
            }
        };

        Some(tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_active(budget: &JumpBudget) -> bool {
        budget
            .indicators()
            .iter()
            .all(|state| *state == IndicatorState::Active)
    }

    #[test]
    fn test_fresh_budget_is_full() {
        let budget = JumpBudget::default();
        assert_eq!(budget.remaining(), 3);
        assert!(budget.can_jump());
        assert!(all_active(&budget));
        assert!(!budget.restart_prompt_visible());
    }

    #[test]
    fn test_three_jumps_exhaust_budget() {
        let mut budget = JumpBudget::default();

        assert!(budget.use_jump());
        assert!(budget.use_jump());
        assert!(budget.use_jump());
        assert_eq!(budget.remaining(), 0);
        assert!(budget.restart_prompt_visible());

        // 4-й — no-op
        assert!(!budget.use_jump());
        assert_eq!(budget.remaining(), 0);
        assert!(budget
            .indicators()
            .iter()
            .all(|state| *state == IndicatorState::Inactive));
    }

    #[test]
    fn test_use_jump_refreshes_indicators() {
        let mut budget = JumpBudget::default();
        budget.use_jump();

        assert_eq!(
            budget.indicators(),
            &[
                IndicatorState::Active,
                IndicatorState::Active,
                IndicatorState::Inactive
            ]
        );
    }

    #[test]
    fn test_replenish_at_max_is_noop() {
        let mut budget = JumpBudget::default();
        assert!(!budget.replenish_one_jump());
        assert_eq!(budget.remaining(), 3);
        assert!(!budget.is_animating());
    }

    #[test]
    fn test_replenish_marks_restored_index() {
        let mut budget = JumpBudget::default();
        budget.use_jump();
        budget.use_jump();

        assert!(budget.replenish_one_jump());
        assert_eq!(budget.remaining(), 2);
        assert_eq!(budget.indicator(0), Some(IndicatorState::Active));
        assert_eq!(
            budget.indicator(1),
            Some(IndicatorState::Replenishing { elapsed: 0.0 })
        );
        assert_eq!(budget.indicator(2), Some(IndicatorState::Inactive));
    }

    #[test]
    fn test_replenish_tint_holds_then_blends_to_active() {
        let config = JumpConfig::default();
        let mut budget = JumpBudget::new(&config);
        budget.use_jump();
        budget.replenish_one_jump();

        assert_eq!(budget.tint_at(2), Some(config.replenish_tint));

        // Внутри delay — всё ещё replenish tint
        budget.tick(0.25);
        assert_eq!(budget.tint_at(2), Some(config.replenish_tint));

        // Середина fade
        budget.tick(0.5);
        let mid = budget.tint_at(2).unwrap();
        assert!(mid.r > config.active_tint.r && mid.r < config.replenish_tint.r);

        // После delay + fade — Active
        budget.tick(0.5);
        assert_eq!(budget.indicator(2), Some(IndicatorState::Active));
        assert_eq!(budget.tint_at(2), Some(config.active_tint));
        assert!(!budget.is_animating());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut budget = JumpBudget::default();
        budget.use_jump();
        budget.use_jump();
        budget.use_jump();
        budget.replenish_one_jump();

        budget.reset_jumps();

        assert_eq!(budget.remaining(), 3);
        assert!(all_active(&budget));
        assert!(!budget.restart_prompt_visible());
    }

    #[test]
    fn test_counter_stays_in_bounds_for_mixed_sequence() {
        let mut budget = JumpBudget::default();

        // Детерминированная "случайная" последовательность use/replenish
        let pattern = [true, true, false, true, true, true, true, false, false, false, false, true];
        for step in 0..120 {
            if pattern[step % pattern.len()] {
                budget.use_jump();
            } else {
                budget.replenish_one_jump();
            }
            assert!(budget.remaining() <= budget.max());
            assert_eq!(budget.restart_prompt_visible(), budget.remaining() == 0);
        }
    }

    #[test]
    fn test_tint_out_of_range() {
        let budget = JumpBudget::default();
        assert_eq!(budget.tint_at(3), None);
    }
}
