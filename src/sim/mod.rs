//! Wave simulation module
//!
//! Pure and deterministic given a seed:
//! - Integer board geometry only
//! - Seeded RNG only
//! - Waves kept in insertion order
//! - No platform dependencies (drawing goes through the `Surface` trait)

pub mod board;
pub mod color;
pub mod error;
pub mod wave;

pub use board::{ColorWave, SpawnPolicy, WaveBoard};
pub use color::{Gradient, Hsla};
pub use error::WaveError;
pub use wave::{Board, Wave, for_each_front_cell, front_cells, last_phase};
