//! Simulation errors

use glam::IVec2;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    /// Wave sources must lie on the board; clamping would corrupt `last_phase`
    #[error("wave source {cell} is outside the {width}x{height} board")]
    SourceOutOfBounds {
        cell: IVec2,
        width: i32,
        height: i32,
    },
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
}
