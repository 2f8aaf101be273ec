//! Buffered hits awaiting application to enemies.

use bevy::prelude::{Entity, Resource};

/// One hit against an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDamage {
    /// Entity that was hit.
    pub enemy: Entity,
    /// Hit points removed.
    pub amount: i32,
}

/// Hits queued by weapons or scripts, applied once per frame.
#[derive(Resource, Default)]
pub struct DamageInbox {
    hits: Vec<EnemyDamage>,
}

impl DamageInbox {
    /// Queues a hit.
    pub fn push(&mut self, damage: EnemyDamage) {
        self.hits.push(damage);
    }

    /// Queues several hits in order.
    pub fn extend<I>(&mut self, hits: I)
    where
        I: IntoIterator<Item = EnemyDamage>,
    {
        self.hits.extend(hits);
    }

    /// Removes and yields every queued hit, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, EnemyDamage> {
        self.hits.drain(..)
    }

    /// Whether no hits are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::World;
    use rstest::rstest;

    #[rstest]
    fn drain_preserves_order_and_empties() {
        let mut world = World::new();
        let mut inbox = DamageInbox::default();
        assert!(inbox.is_empty());
        let first = EnemyDamage {
            enemy: world.spawn_empty().id(),
            amount: 10,
        };
        let second = EnemyDamage {
            enemy: world.spawn_empty().id(),
            amount: 25,
        };
        inbox.push(first);
        inbox.extend([second]);
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(drained, vec![first, second]);
        assert!(inbox.is_empty());
    }
}
