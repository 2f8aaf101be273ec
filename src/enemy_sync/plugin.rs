//! Bevy plugin wiring enemy perception into the schedule.

use std::collections::VecDeque;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, info};

use super::damage_inbox::DamageInbox;
use super::systems::{
    advance_player_routes, apply_enemy_damage, despawn_fallen_enemies, drive_enemy_brains,
    start_enemy_brains, steer_nav_agents,
};
use crate::perception::Diagnostic;

/// Event raised whenever an enemy's machine reports a diagnostic.
///
/// Observers log these events so faults and chase transitions remain visible
/// even when `bevy_log` is disabled.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PerceptionDiagnostic {
    /// Enemy whose machine raised the diagnostic.
    pub enemy: Entity,
    /// What happened.
    pub diagnostic: Diagnostic,
}

/// Default number of diagnostics [`DiagnosticHistory`] keeps.
pub const DIAGNOSTIC_HISTORY_CAPACITY: usize = 256;

/// The most recent diagnostics, oldest first.
///
/// Once full, each new entry evicts the oldest one.
#[derive(Resource, Debug)]
pub struct DiagnosticHistory {
    entries: VecDeque<PerceptionDiagnostic>,
    capacity: usize,
}

impl Default for DiagnosticHistory {
    fn default() -> Self {
        Self::with_capacity(DIAGNOSTIC_HISTORY_CAPACITY)
    }
}

impl DiagnosticHistory {
    /// An empty history holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `entry`, dropping the oldest entry when full.
    pub fn record(&mut self, entry: PerceptionDiagnostic) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &PerceptionDiagnostic> + '_ {
        self.entries.iter()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained diagnostics raised by `enemy`, oldest first.
    pub fn for_enemy(&self, enemy: Entity) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.enemy == enemy)
            .map(|entry| &entry.diagnostic)
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn record_perception_diagnostic(
    event: On<PerceptionDiagnostic>,
    mut history: ResMut<DiagnosticHistory>,
) {
    let raised = *event.event();
    let PerceptionDiagnostic { enemy, diagnostic } = raised;
    if diagnostic.is_error() {
        error!("enemy {enemy:?}: {diagnostic}");
    } else {
        info!("enemy {enemy:?}: {diagnostic}");
    }
    history.record(raised);
}

/// Bevy plugin installing the perception, steering, and damage systems.
#[derive(Default)]
pub struct EnemyAiPlugin;

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DamageInbox>();
        app.init_resource::<DiagnosticHistory>();
        app.add_observer(record_perception_diagnostic);
        app.add_systems(
            Update,
            (
                advance_player_routes,
                start_enemy_brains,
                drive_enemy_brains,
                steer_nav_agents,
                apply_enemy_damage,
                despawn_fallen_enemies,
            )
                .chain(),
        );
    }
}
