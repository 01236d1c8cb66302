//! The ocean: the ordered registry of live creatures.
//!
//! This is the only shared mutable resource in the simulation. Creatures
//! are addressed by [`CreatureId`] handles; a handle stays valid exactly as
//! long as its creature is in the ocean, and removal by any handle is
//! idempotent. Iteration order carries no semantics beyond the periodic
//! presentation sort and deciding which creature acts first within a tick.

use crate::creature::Creature;
use cellworld_core::CreatureId;

#[derive(Debug, Default)]
pub struct Ocean {
    creatures: Vec<Creature>,
}

impl Ocean {
    pub fn new() -> Self {
        Self {
            creatures: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Total live-cell count across all creatures.
    pub fn census(&self) -> usize {
        self.creatures.iter().map(|c| c.cell_count()).sum()
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    pub fn push(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    /// Remove a creature by handle. Returns `None` if the handle is no
    /// longer live; callers treat that as an expected skip, not an error.
    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.creatures.iter().position(|c| c.id == id)?;
        Some(self.creatures.remove(index))
    }

    /// Snapshot of live handles, in current registry order. The tick
    /// driver iterates this while the registry itself mutates underneath.
    pub fn ids(&self) -> Vec<CreatureId> {
        self.creatures.iter().map(|c| c.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    /// Presentation-only ordering: biggest colonies first.
    pub fn sort_by_cells_desc(&mut self) {
        self.creatures
            .sort_by(|a, b| b.cell_count().cmp(&a.cell_count()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellworld_core::{Cell, Rgba, WorldConfig};

    fn creature_with_n_cells(n: usize) -> Creature {
        let config = WorldConfig::default();
        let color = Rgba::opaque(255, 0, 0);
        let mut creature = Creature::new(0, 0, color, &config);
        creature.cells = (0..n as i32).map(|i| Cell::new(i, 0, color)).collect();
        creature.normalize(config.unit);
        creature
    }

    #[test]
    fn test_lookup_and_census() {
        let mut ocean = Ocean::new();
        let a = creature_with_n_cells(3);
        let a_id = a.id;
        ocean.push(a);
        ocean.push(creature_with_n_cells(5));

        assert_eq!(ocean.len(), 2);
        assert_eq!(ocean.census(), 8);
        assert!(ocean.contains(a_id));
        assert_eq!(ocean.get(a_id).map(|c| c.cell_count()), Some(3));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ocean = Ocean::new();
        let creature = creature_with_n_cells(2);
        let id = creature.id;
        ocean.push(creature);

        assert!(ocean.remove(id).is_some());
        assert!(ocean.remove(id).is_none());
        assert!(!ocean.contains(id));
        assert!(ocean.is_empty());
    }

    #[test]
    fn test_ids_snapshot_survives_mutation() {
        let mut ocean = Ocean::new();
        ocean.push(creature_with_n_cells(1));
        ocean.push(creature_with_n_cells(2));
        let ids = ocean.ids();
        ocean.remove(ids[0]);

        // The snapshot still names the removed creature; liveness checks
        // are the caller's job.
        assert_eq!(ids.len(), 2);
        assert!(!ocean.contains(ids[0]));
        assert!(ocean.contains(ids[1]));
    }

    #[test]
    fn test_sort_by_descending_cell_count() {
        let mut ocean = Ocean::new();
        ocean.push(creature_with_n_cells(1));
        ocean.push(creature_with_n_cells(4));
        ocean.push(creature_with_n_cells(2));
        ocean.sort_by_cells_desc();

        let counts: Vec<usize> = ocean.iter().map(|c| c.cell_count()).collect();
        assert_eq!(counts, vec![4, 2, 1]);
    }
}
