//! Simulation engine: the per-tick creature lifecycle driver.

use crate::creature::{Creature, CreatureSnapshot};
use crate::ocean::Ocean;
use cellworld_core::{Cell, CreatureId, Result, Rgba, WorldConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Attempts Generate makes before giving up on placing a creature this
/// tick. A crowded world simply spawns nothing until space opens up.
const MAX_SPAWN_ATTEMPTS: usize = 100;

/// Per-tick counts reported for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u64,
    pub creatures: usize,
    pub cells: usize,
}

/// The simulation owns the ocean, the validated configuration, and the
/// seeded RNG; ticks mutate the ocean on this thread only, and a renderer
/// only ever observes state between calls to [`Simulation::advance`].
pub struct Simulation {
    ocean: Ocean,
    config: WorldConfig,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulation {
    /// Build a simulation from a validated configuration and a seed. The
    /// same seed and call sequence reproduce the same world.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        info!(
            width = config.width,
            height = config.height,
            unit = config.unit,
            max_census = config.max_census,
            seed,
            "simulation created"
        );
        Ok(Self {
            ocean: Ocean::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        })
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn creature_count(&self) -> usize {
        self.ocean.len()
    }

    /// Advance the world by one tick: for every creature live at tick
    /// start, Hunt, Grow, Split, Death, in that order; then, if the caller
    /// asks for it, top up the population. Rate-limiting spawn is the
    /// caller's job.
    pub fn advance(&mut self, spawn: bool) {
        // Presentation order only; biggest colonies first.
        self.ocean.sort_by_cells_desc();

        // Snapshot of handles: Hunt, Split, and Death restructure the
        // ocean mid-iteration, so each step re-checks liveness itself.
        let ids = self.ocean.ids();
        for id in ids {
            self.hunt(id);
            self.grow(id);
            self.split(id);
            self.death_check(id);
        }

        if spawn {
            self.born();
        }

        self.tick += 1;

        if self.tick % 100 == 0 {
            let summary = self.summary();
            info!(
                tick = summary.tick,
                creatures = summary.creatures,
                cells = summary.cells,
                "population snapshot"
            );
        }
    }

    /// Read-only view of every live creature, for rendering.
    pub fn snapshot(&self) -> Vec<CreatureSnapshot> {
        self.ocean.iter().map(CreatureSnapshot::from).collect()
    }

    pub fn summary(&self) -> TickSummary {
        TickSummary {
            tick: self.tick,
            creatures: self.ocean.len(),
            cells: self.ocean.census(),
        }
    }

    /// Inject a creature directly, for embedders and tests. The cell set
    /// is normalized before insertion.
    pub fn seed_creature(&mut self, x: i32, y: i32, color: Rgba, cells: Vec<Cell>) -> CreatureId {
        let mut creature = Creature::new(x, y, color, &self.config);
        creature.cells = cells;
        creature.normalize(self.config.unit);
        let id = creature.id;
        self.ocean.push(creature);
        id
    }

    /// Hunt phase for one creature: eat every overlapping creature, but
    /// only if none of them is strictly bigger (all-or-nothing).
    fn hunt(&mut self, id: CreatureId) {
        let (bounds, size) = match self.ocean.get(id) {
            Some(c) => (c.bounds(), c.cell_count()),
            None => return,
        };

        let prey: Vec<(CreatureId, usize)> = self
            .ocean
            .iter()
            .filter(|t| t.id != id && t.bounds().intersects(&bounds))
            .map(|t| (t.id, t.cell_count()))
            .collect();
        if prey.is_empty() {
            return;
        }
        if prey.iter().any(|&(_, prey_size)| prey_size > size) {
            return;
        }

        let unit = self.config.unit;
        for (prey_id, _) in prey {
            // The prey may already have been consumed earlier this tick;
            // a dead handle is a legitimate skip.
            let eaten = match self.ocean.remove(prey_id) {
                Some(c) => c,
                None => continue,
            };
            if let Some(hunter) = self.ocean.get_mut(id) {
                hunter.absorb(&eaten, unit);
                debug!(
                    hunter = %id,
                    prey = %prey_id,
                    prey_cells = eaten.cell_count(),
                    tick = self.tick,
                    "creature eaten"
                );
            }
        }

        if let Some(hunter) = self.ocean.get_mut(id) {
            hunter.normalize(unit);
        }
    }

    /// Grow phase: one cellular-automaton generation.
    fn grow(&mut self, id: CreatureId) {
        if let Some(creature) = self.ocean.get_mut(id) {
            creature.grow(&self.config, &mut self.rng);
        }
    }

    /// Split phase: at most one split per tick, columns before rows.
    fn split(&mut self, id: CreatureId) {
        // Columns take priority; the row scan only runs when no column
        // gap exists, so a creature splits at most once per tick.
        let (by_column, gap) = match self.ocean.get(id) {
            Some(c) => match c.column_gap() {
                Some(gap) => (true, gap),
                None => match c.row_gap() {
                    Some(gap) => (false, gap),
                    None => return,
                },
            },
            None => return,
        };

        let unit = self.config.unit;
        let parent = match self.ocean.remove(id) {
            Some(c) => c,
            None => return,
        };

        let (mut first, mut second) = if by_column {
            parent.split_at_column(gap, unit, &self.config)
        } else {
            parent.split_at_row(gap, unit, &self.config)
        };

        debug!(
            parent = %id,
            axis = if by_column { "column" } else { "row" },
            tick = self.tick,
            "creature split"
        );

        if !first.cells.is_empty() {
            first.normalize(unit);
            self.ocean.push(first);
        }
        if !second.cells.is_empty() {
            second.normalize(unit);
            self.ocean.push(second);
        }
    }

    /// Death phase: remove the creature if it has no cells left or its
    /// bounding box has left the world. A handle that already died this
    /// tick is a no-op.
    fn death_check(&mut self, id: CreatureId) {
        let dead = match self.ocean.get(id) {
            Some(c) => {
                c.cells.is_empty() || !c.bounds().contained_in(self.config.width, self.config.height)
            }
            None => return,
        };
        if dead {
            self.ocean.remove(id);
            debug!(creature = %id, tick = self.tick, "creature died");
        }
    }

    /// Population controller: census-driven replenishment. At or above the
    /// census ceiling nothing spawns; above half the ceiling one creature
    /// spawns; below that, three.
    fn born(&mut self) {
        let census = self.ocean.census();
        if census >= self.config.max_census {
            return;
        }
        let spawns = if census > self.config.max_census / 2 {
            1
        } else {
            3
        };
        for _ in 0..spawns {
            let _ = self.generate();
        }
    }

    /// Spawner: draw random shapes until one has at least one cell and
    /// overlaps nothing, then add it. Gives up after a bounded number of
    /// attempts so a packed world cannot stall the tick.
    fn generate(&mut self) -> Option<CreatureId> {
        let unit = self.config.unit;
        let max_lines = self.config.creature_max_lines;

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let rows = self.rng.gen_range(0..max_lines);
            let cols = self.rng.gen_range(0..max_lines);
            let x = self.rng.gen_range(0..=self.config.width - cols * unit);
            let y = self.rng.gen_range(0..=self.config.height - rows * unit);
            let color = self.config.palette[self.rng.gen_range(0..self.config.palette.len())];

            let mut candidate = Creature::new(x, y, color, &self.config);
            candidate.cols = cols;
            candidate.rows = rows;
            candidate.width = cols * unit;
            candidate.height = rows * unit;
            for col in 0..cols {
                for row in 0..rows {
                    if self.rng.gen_bool(0.5) {
                        candidate.cells.push(Cell::new(col, row, color));
                    }
                }
            }

            if candidate.cells.is_empty() {
                continue;
            }
            if self.ocean.iter().any(|c| c.overlaps(&candidate)) {
                continue;
            }

            candidate.normalize(unit);
            let id = candidate.id;
            trace!(
                creature = %id,
                x = candidate.x,
                y = candidate.y,
                cells = candidate.cell_count(),
                tick = self.tick,
                "creature spawned"
            );
            self.ocean.push(candidate);
            return Some(id);
        }

        debug!(tick = self.tick, "no room to spawn this tick");
        None
    }
}
