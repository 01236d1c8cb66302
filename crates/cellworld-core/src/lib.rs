//! Core types and utilities for the Cell World creature simulation.

pub mod config;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
