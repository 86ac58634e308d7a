//! Diagonal Waves - expanding color diamonds on a 2D canvas
//!
//! Core modules:
//! - `sim`: Wave simulation (diamond fronts, gradients, board)
//! - `frame`: Cancellable frame requests and the animation loop
//! - `renderer`: Drawing surface contract, grid transform, resize-aware stage
//! - `platform`: Browser/manual frame sources
//! - `settings`: Tunable visual parameters

pub mod fps;
pub mod frame;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use fps::FpsCounter;
pub use settings::Settings;

use glam::{DVec2, IVec2};

/// Simulation configuration constants
pub mod consts {
    /// Chance per frame that a new wave spawns
    pub const SPAWN_PROBABILITY: f64 = 0.01;
    /// Hue degrees per millisecond of timestamp
    pub const HUE_RATE: f64 = 0.36;
    /// Time offset (ms) between the start and end hue of a gradient
    pub const HUE_SPAN_MS: f64 = 1000.0;

    /// Default board dimensions (cells)
    pub const BOARD_WIDTH: i32 = 400;
    pub const BOARD_HEIGHT: i32 = 400;

    /// Fraction of the window the canvas occupies on each axis
    pub const VIEWPORT_SCALE: f64 = 0.8;

    /// FPS report interval (ms)
    pub const FPS_INTERVAL_MS: f64 = 1000.0;
}

/// Map a board cell to the top-left corner of its unit square in [-1, 1] space
#[inline]
pub fn board_to_surface(cell: IVec2, board: IVec2) -> DVec2 {
    DVec2::new(
        2.0 * cell.x as f64 / board.x as f64 - 1.0,
        2.0 * cell.y as f64 / board.y as f64 - 1.0,
    )
}

/// Size of one board cell in [-1, 1] space
#[inline]
pub fn cell_size(board: IVec2) -> DVec2 {
    DVec2::new(2.0 / board.x as f64, 2.0 / board.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_to_surface_corners() {
        let board = IVec2::new(4, 2);
        assert_eq!(board_to_surface(IVec2::new(0, 0), board), DVec2::new(-1.0, -1.0));
        assert_eq!(board_to_surface(IVec2::new(2, 1), board), DVec2::new(0.0, 0.0));
        // Last cell's far edge reaches +1
        let last = board_to_surface(IVec2::new(3, 1), board) + cell_size(board);
        assert_eq!(last, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_cell_size() {
        assert_eq!(cell_size(IVec2::new(400, 200)), DVec2::new(0.005, 0.01));
    }
}
