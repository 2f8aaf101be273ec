//! Enemy hit points.
//!
//! Death is the one external event that disables an enemy's perception
//! machine. [`EnemyHealth::take_damage`] reports it exactly once; the host
//! reacts by stopping the machine and scheduling the despawn.

use bevy::prelude::Component;

use crate::DEFAULT_ENEMY_HEALTH;

/// What a hit did to the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The enemy was already dead; nothing changed.
    Ignored,
    /// The enemy survived with `remaining` hit points.
    Hurt {
        /// Hit points left after the hit.
        remaining: i32,
    },
    /// This hit killed the enemy.
    Killed,
}

/// Hit points of an enemy.
///
/// # Examples
///
/// ```
/// use lurker::health::{DamageOutcome, EnemyHealth};
///
/// let mut health = EnemyHealth::new(30);
/// assert_eq!(health.take_damage(20), DamageOutcome::Hurt { remaining: 10 });
/// assert_eq!(health.take_damage(20), DamageOutcome::Killed);
/// assert_eq!(health.take_damage(20), DamageOutcome::Ignored);
/// ```
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyHealth {
    max: i32,
    current: i32,
    dead: bool,
}

impl EnemyHealth {
    /// Full health at `max` hit points.
    #[must_use]
    pub const fn new(max: i32) -> Self {
        Self {
            max,
            current: max,
            dead: max <= 0,
        }
    }

    /// Applies `amount` points of damage.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount);
        if self.current <= 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }

    /// Hit points left.
    #[must_use]
    pub const fn current(&self) -> i32 {
        self.current
    }

    /// Starting hit points.
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Whether a killing blow has landed.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }
}

impl Default for EnemyHealth {
    fn default() -> Self {
        Self::new(DEFAULT_ENEMY_HEALTH)
    }
}
