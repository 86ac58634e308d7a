//! Diamond wave geometry on a discrete board
//!
//! A wave expands from a source cell. At a given phase its front is every
//! board cell with `|x - sx| + |y - sy| == phase`. The front is walked as four
//! diagonal half-edges, each clipped to the board independently:
//! - left-to-top: left tip through top tip (both tips included)
//! - left-to-bottom: after the left tip, through the bottom tip
//! - right-to-top: right tip, stopping before the top tip
//! - right-to-bottom: strictly between the right and bottom tips

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::error::WaveError;

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, WaveError> {
        if width < 1 || height < 1 {
            return Err(WaveError::EmptyBoard { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bottom-right cell (not the board size)
    #[inline]
    pub fn bottom_right(&self) -> IVec2 {
        IVec2::new(self.width - 1, self.height - 1)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An expanding diamond anchored at a source cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    board: Board,
    source: IVec2,
    /// Current expansion radius
    pub phase: i32,
    /// Phase after which no front cell is on the board anymore
    pub last_phase: i32,
}

impl Wave {
    pub fn new(board: Board, source: IVec2) -> Result<Self, WaveError> {
        if !board.contains(source) {
            return Err(WaveError::SourceOutOfBounds {
                cell: source,
                width: board.width,
                height: board.height,
            });
        }
        Ok(Self {
            board,
            source,
            phase: 0,
            last_phase: last_phase(board, source),
        })
    }

    pub fn source(&self) -> IVec2 {
        self.source
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn advance(&mut self) {
        self.phase += 1;
    }

    pub fn is_expired(&self) -> bool {
        self.phase > self.last_phase
    }

    /// Expansion progress in [0, 1] while live
    pub fn progress(&self) -> f64 {
        if self.last_phase == 0 {
            return 0.0;
        }
        self.phase as f64 / self.last_phase as f64
    }

    /// Invoke `f` for each cell on the current front
    pub fn for_each_cell(&self, f: impl FnMut(IVec2)) {
        for_each_front_cell(self.board, self.source, self.phase, f);
    }
}

/// Phase at which the diamond front has left every edge of the board
pub fn last_phase(board: Board, source: IVec2) -> i32 {
    let br = board.bottom_right();
    source.x.max(br.x - source.x) + source.y.max(br.y - source.y)
}

/// Range of `k` keeping `origin + step * k` inside `[0, max]` (step is ±1)
fn axis_interval(origin: i32, step: i32, max: i32) -> (i32, i32) {
    if step > 0 {
        (-origin, max - origin)
    } else {
        (origin - max, origin)
    }
}

/// Walk `start + step * k` for `k` in `[k_lo, k_hi]`, clipped to the board
fn walk_edge(board: Board, start: IVec2, step: IVec2, k_lo: i32, k_hi: i32, f: &mut impl FnMut(IVec2)) {
    let br = board.bottom_right();
    let (x_lo, x_hi) = axis_interval(start.x, step.x, br.x);
    let (y_lo, y_hi) = axis_interval(start.y, step.y, br.y);
    let lo = k_lo.max(x_lo).max(y_lo);
    let hi = k_hi.min(x_hi).min(y_hi);
    for k in lo..=hi {
        f(start + step * k);
    }
}

/// Invoke `f` once for every in-bounds cell at diamond distance `phase` from `source`
pub fn for_each_front_cell(board: Board, source: IVec2, phase: i32, mut f: impl FnMut(IVec2)) {
    if phase < 0 || phase > last_phase(board, source) {
        return;
    }
    let left = IVec2::new(source.x - phase, source.y);
    let right = IVec2::new(source.x + phase, source.y);

    // Left to top
    walk_edge(board, left, IVec2::new(1, -1), 0, phase, &mut f);
    // Left to bottom
    walk_edge(board, left, IVec2::new(1, 1), 1, phase, &mut f);
    // Right to top
    walk_edge(board, right, IVec2::new(-1, -1), 0, phase - 1, &mut f);
    // Right to bottom
    walk_edge(board, right, IVec2::new(-1, 1), 1, phase - 1, &mut f);
}

/// Collect the front cells into a vector
pub fn front_cells(board: Board, source: IVec2, phase: i32) -> Vec<IVec2> {
    let perimeter = 2 * (board.width as usize + board.height as usize);
    let mut cells = Vec::with_capacity((phase.max(1) as usize).saturating_mul(4).min(perimeter));
    for_each_front_cell(board, source, phase, |cell| cells.push(cell));
    cells
}
