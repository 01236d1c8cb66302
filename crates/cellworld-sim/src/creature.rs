//! Creature state and per-creature operations.

use cellworld_core::{cell_to_world, world_delta_to_cells, Aabb, Cell, CreatureId, Rgba, WorldConfig};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A creature: an independent cellular-automaton colony with a world-pixel
/// origin and a local grid of cells.
///
/// Two invariants hold whenever a creature is at rest between operations:
/// `width == cols * unit` and `height == rows * unit`, and every cell sits
/// at `0 <= col < cols`, `0 <= row < rows`. Both are restored by
/// [`Creature::normalize`], which every mutating operation ends with. An
/// empty cell set is a transient state that the next death check collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub x: i32,
    pub y: i32,
    pub cols: i32,
    pub rows: i32,
    pub width: i32,
    pub height: i32,
    pub color: Rgba,
    pub age: u32,
    pub aging_age: u32,
    pub aging_cells: usize,
    pub cells: Vec<Cell>,
}

impl Creature {
    /// A blank creature at the given origin. Dimensions stay zero until
    /// the first normalize after cells are filled in.
    pub fn new(x: i32, y: i32, color: Rgba, config: &WorldConfig) -> Self {
        Self {
            id: CreatureId::new(),
            x,
            y,
            cols: 0,
            rows: 0,
            width: 0,
            height: 0,
            color,
            age: 0,
            aging_age: config.aging_age,
            aging_cells: config.aging_cells,
            cells: Vec::new(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn overlaps(&self, other: &Creature) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// One generation of the automaton rule, scanning one ring beyond the
    /// current bounding box so the colony can expand outward.
    ///
    /// Birth on exactly 3 Moore neighbors, survival on exactly 2; anything
    /// else dies. A generation that exceeds the census cap is discarded
    /// wholesale and the creature is left empty for the death check. An old
    /// or overgrown colony sheds a tenth of its cells (at least one),
    /// drawn uniformly without replacement.
    pub fn grow(&mut self, config: &WorldConfig, rng: &mut ChaCha8Rng) {
        let occupied: HashMap<(i32, i32), Rgba> = self
            .cells
            .iter()
            .map(|cell| ((cell.col, cell.row), cell.color))
            .collect();

        let mut next = Vec::new();
        for col in -1..=self.cols {
            for row in -1..=self.rows {
                let mut neighbors = 0;
                for dc in -1..=1 {
                    for dr in -1..=1 {
                        if dc == 0 && dr == 0 {
                            continue;
                        }
                        if occupied.contains_key(&(col + dc, row + dr)) {
                            neighbors += 1;
                        }
                    }
                }
                if neighbors == 3 {
                    next.push(Cell::new(col, row, self.color));
                } else if neighbors == 2 {
                    // Survivors keep their prior color.
                    if let Some(color) = occupied.get(&(col, row)) {
                        next.push(Cell::new(col, row, *color));
                    }
                }
            }
        }

        if next.len() > config.max_census {
            // Runaway colony: wipe the whole generation. No aging, no
            // normalize; the death check removes the empty husk.
            self.cells.clear();
            return;
        }

        if !next.is_empty() && (self.age > self.aging_age || next.len() > self.aging_cells) {
            let shed = ((next.len() + 9) / 10).max(1);
            for _ in 0..shed {
                let index = rng.gen_range(0..next.len());
                next.remove(index);
            }
        }

        self.cells = next;
        self.age += 1;
        self.normalize(config.unit);
    }

    /// Recompute the bounding box from the cell extents and rebase the
    /// cells so the minimum occupied column and row are zero. No-op on an
    /// empty cell set. Idempotent.
    pub fn normalize(&mut self, unit: i32) {
        if self.cells.is_empty() {
            return;
        }

        let mut min_col = i32::MAX;
        let mut min_row = i32::MAX;
        let mut max_col = i32::MIN;
        let mut max_row = i32::MIN;
        for cell in &self.cells {
            min_col = min_col.min(cell.col);
            min_row = min_row.min(cell.row);
            max_col = max_col.max(cell.col);
            max_row = max_row.max(cell.row);
        }

        // The new origin is the world position of the minimum occupied cell.
        self.x = cell_to_world(self.x, min_col, unit);
        self.y = cell_to_world(self.y, min_row, unit);
        self.cols = max_col - min_col + 1;
        self.rows = max_row - min_row + 1;
        self.width = self.cols * unit;
        self.height = self.rows * unit;

        for cell in &mut self.cells {
            cell.col -= min_col;
            cell.row -= min_row;
        }
    }

    /// Smallest column `c` such that columns `c` and `c+1` are both empty,
    /// if any. On a normalized creature the outermost columns are always
    /// occupied, so a hit is strictly interior.
    pub fn column_gap(&self) -> Option<i32> {
        let used: Vec<i32> = self.cells.iter().map(|cell| cell.col).collect();
        (0..self.cols - 1).find(|c| !used.contains(c) && !used.contains(&(c + 1)))
    }

    /// Row analogue of [`Creature::column_gap`].
    pub fn row_gap(&self) -> Option<i32> {
        let used: Vec<i32> = self.cells.iter().map(|cell| cell.row).collect();
        (0..self.rows - 1).find(|r| !used.contains(r) && !used.contains(&(r + 1)))
    }

    /// Partition across a column gap into left/right children. Children
    /// keep parent-local cell coordinates and are not yet normalized; the
    /// caller normalizes whichever children end up non-empty.
    pub fn split_at_column(&self, gap: i32, unit: i32, config: &WorldConfig) -> (Creature, Creature) {
        let mut left = Creature::new(self.x, self.y, self.color, config);
        let mut right = Creature::new(cell_to_world(self.x, gap + 1, unit), self.y, self.color, config);
        for cell in &self.cells {
            if cell.col <= gap {
                left.cells.push(*cell);
            } else {
                right.cells.push(*cell);
            }
        }
        (left, right)
    }

    /// Partition across a row gap into top/bottom children.
    pub fn split_at_row(&self, gap: i32, unit: i32, config: &WorldConfig) -> (Creature, Creature) {
        let mut top = Creature::new(self.x, self.y, self.color, config);
        let mut bottom = Creature::new(self.x, cell_to_world(self.y, gap + 1, unit), self.color, config);
        for cell in &self.cells {
            if cell.row <= gap {
                top.cells.push(*cell);
            } else {
                bottom.cells.push(*cell);
            }
        }
        (top, bottom)
    }

    /// Absorb a prey creature's cells, translated into this creature's
    /// local frame and recolored. The offset division truncates toward
    /// zero; origins are assumed to stay unit-aligned (spawning and
    /// normalization only ever move origins by whole units).
    pub fn absorb(&mut self, prey: &Creature, unit: i32) {
        let offset_col = world_delta_to_cells(prey.x, self.x, unit);
        let offset_row = world_delta_to_cells(prey.y, self.y, unit);
        for cell in &prey.cells {
            self.cells.push(Cell::new(
                cell.col + offset_col,
                cell.row + offset_row,
                self.color,
            ));
        }
    }
}

/// Read-only per-creature view handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub x: i32,
    pub y: i32,
    pub cols: i32,
    pub rows: i32,
    pub color: Rgba,
    pub age: u32,
    pub cells: Vec<Cell>,
}

impl From<&Creature> for CreatureSnapshot {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            x: creature.x,
            y: creature.y,
            cols: creature.cols,
            rows: creature.rows,
            color: creature.color,
            age: creature.age,
            cells: creature.cells.clone(),
        }
    }
}
