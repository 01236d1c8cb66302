//! Creature lifecycle engine.
//!
//! This crate implements the per-tick simulation over a shared registry of
//! cellular-automaton creatures: growth, hunting, splitting, death, and
//! census-driven spawning.

pub mod creature;
pub mod ocean;
pub mod simulation;

pub use creature::{Creature, CreatureSnapshot};
pub use ocean::Ocean;
pub use simulation::{Simulation, TickSummary};
