//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Rgba;
use serde::{Deserialize, Serialize};

/// World configuration parameters. Produced by an external loader (file
/// parsing and color-string translation live there); the core only
/// validates and consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Width of the world in pixels
    pub width: i32,
    /// Height of the world in pixels
    pub height: i32,
    /// Pixel edge length of one grid cell
    pub unit: i32,
    /// Census ceiling: total live cells across the ocean, and also the
    /// per-creature cap past which a generation is wiped
    pub max_census: usize,
    /// Exclusive upper bound on spawned creature rows/cols
    pub creature_max_lines: i32,
    /// Age in ticks past which a creature starts shedding cells
    pub aging_age: u32,
    /// Cell count past which a creature starts shedding cells
    pub aging_cells: usize,
    /// Colors assigned to spawned creatures
    pub palette: Vec<Rgba>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            unit: 10,
            max_census: 300,
            creature_max_lines: 6,
            aging_age: 25,
            aging_cells: 100,
            palette: vec![
                Rgba::opaque(255, 0, 0),
                Rgba::opaque(0, 255, 0),
                Rgba::opaque(0, 0, 255),
            ],
        }
    }
}

impl WorldConfig {
    /// Validate construction invariants. Everything past this point is
    /// infallible: a validated config can drive ticks forever.
    pub fn validate(&self) -> Result<()> {
        if self.unit <= 0 {
            return Err(Error::InvalidUnit(self.unit));
        }
        if self.palette.is_empty() {
            return Err(Error::EmptyPalette);
        }
        if self.creature_max_lines < 1 {
            return Err(Error::InvalidSpawnLines(self.creature_max_lines));
        }
        // Largest shape Generate can draw is (max_lines - 1) cells per axis.
        let span = (self.creature_max_lines - 1) * self.unit;
        if span > self.width || span > self.height {
            return Err(Error::WorldTooSmall {
                width: self.width,
                height: self.height,
                span,
            });
        }
        Ok(())
    }
}
