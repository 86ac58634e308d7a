//! Wave board: the collection of live color waves and the per-frame update

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::{Gradient, Hsla};
use super::error::WaveError;
use super::wave::{Board, Wave};
use crate::consts::*;
use crate::renderer::Surface;
use crate::{board_to_surface, cell_size};

/// A wave plus the gradient it is painted with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorWave {
    pub wave: Wave,
    pub gradient: Gradient,
}

impl ColorWave {
    pub fn new(board: Board, source: IVec2, gradient: Gradient) -> Result<Self, WaveError> {
        Ok(Self {
            wave: Wave::new(board, source)?,
            gradient,
        })
    }

    /// Color for the current phase
    pub fn color(&self) -> Hsla {
        self.gradient.color_at(self.wave.progress())
    }
}

/// How randomly spawned waves are placed and colored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Chance per frame in [0, 1]
    pub probability: f64,
    /// Hue degrees per millisecond
    pub hue_rate: f64,
    /// Time offset (ms) of the end stop's hue
    pub hue_span_ms: f64,
    /// Saturation/lightness/alpha of the start stop (hue is filled in per spawn)
    pub start: Hsla,
    /// Saturation/lightness/alpha of the end stop
    pub end: Hsla,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            probability: SPAWN_PROBABILITY,
            hue_rate: HUE_RATE,
            hue_span_ms: HUE_SPAN_MS,
            start: Hsla::new(0.0, 100.0, 60.0, 0.8),
            end: Hsla::new(0.0, 100.0, 40.0, 0.6),
        }
    }
}

impl SpawnPolicy {
    /// Gradient for a wave spawned at `timestamp`
    pub fn gradient_at(&self, timestamp: f64) -> Gradient {
        Gradient {
            start: Hsla {
                h: self.hue_rate * timestamp,
                ..self.start
            },
            end: Hsla {
                h: self.hue_rate * (timestamp + self.hue_span_ms),
                ..self.end
            },
        }
    }
}

/// Board of expanding color waves, advanced once per frame
#[derive(Debug)]
pub struct WaveBoard {
    board: Board,
    waves: Vec<ColorWave>,
    policy: SpawnPolicy,
    rng: Pcg32,
}

impl WaveBoard {
    pub fn new(board: Board, policy: SpawnPolicy, seed: u64) -> Self {
        Self {
            board,
            waves: Vec::new(),
            policy,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// Live waves in insertion order
    pub fn waves(&self) -> &[ColorWave] {
        &self.waves
    }

    pub fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }

    /// Append a new wave at phase 0
    pub fn add_wave_at(&mut self, source: IVec2, gradient: Gradient) -> Result<(), WaveError> {
        self.waves.push(ColorWave::new(self.board, source, gradient)?);
        Ok(())
    }

    /// Roll the spawn chance and add a wave at a uniformly random cell
    pub fn maybe_spawn(&mut self, timestamp: f64) -> bool {
        let p = self.policy.probability;
        // NaN never spawns
        if p.is_nan() || p <= 0.0 {
            return false;
        }
        if !self.rng.random_bool(p.min(1.0)) {
            return false;
        }
        let source = IVec2::new(
            self.rng.random_range(0..self.board.width),
            self.rng.random_range(0..self.board.height),
        );
        let gradient = self.policy.gradient_at(timestamp);
        match self.add_wave_at(source, gradient) {
            Ok(()) => {
                log::debug!("Spawned wave at {} ({} live)", source, self.waves.len());
                true
            }
            Err(e) => {
                log::warn!("Skipped spawn: {e}");
                false
            }
        }
    }

    /// Paint every front cell of every live wave
    pub fn draw_waves<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = self.board.size();
        let cell = cell_size(size);
        for color_wave in &self.waves {
            let color = color_wave.color();
            color_wave.wave.for_each_cell(|pos| {
                let origin = board_to_surface(pos, size);
                surface.fill_rect(origin.x, origin.y, cell.x, cell.y, &color);
            });
        }
    }

    pub fn advance_all(&mut self) {
        for color_wave in &mut self.waves {
            color_wave.wave.advance();
        }
    }

    /// Drop waves whose front has left the board, keeping order
    pub fn prune_expired(&mut self) {
        self.waves.retain(|color_wave| !color_wave.wave.is_expired());
    }

    /// Draw one frame of the animation; the board never ends the loop itself
    pub fn draw_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, timestamp: f64) -> anyhow::Result<bool> {
        self.maybe_spawn(timestamp);
        self.draw_waves(surface);
        self.advance_all();
        self.prune_expired();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;

    fn gray() -> Gradient {
        Gradient::new(Hsla::new(0.0, 0.0, 0.0, 1.0), Hsla::new(0.0, 0.0, 100.0, 1.0))
    }

    fn quiet_board(w: i32, h: i32) -> WaveBoard {
        let policy = SpawnPolicy {
            probability: 0.0,
            ..Default::default()
        };
        WaveBoard::new(Board::new(w, h).unwrap(), policy, 7)
    }

    #[test]
    fn test_add_wave_at_computes_last_phase() {
        let mut board = quiet_board(4, 4);
        board.add_wave_at(IVec2::new(0, 0), gray()).unwrap();
        board.add_wave_at(IVec2::new(1, 2), gray()).unwrap();
        assert_eq!(board.waves().len(), 2);
        assert_eq!(board.waves()[0].wave.last_phase, 6);
        assert_eq!(board.waves()[1].wave.last_phase, 2 + 2);
        assert!(board.waves().iter().all(|w| w.wave.phase == 0));
    }

    #[test]
    fn test_add_wave_out_of_bounds_fails_fast() {
        let mut board = quiet_board(4, 4);
        let err = board.add_wave_at(IVec2::new(-1, 2), gray()).unwrap_err();
        assert!(matches!(err, WaveError::SourceOutOfBounds { .. }));
        assert!(board.waves().is_empty());
    }

    #[test]
    fn test_prune_boundary() {
        let mut board = quiet_board(4, 4);
        board.add_wave_at(IVec2::ZERO, gray()).unwrap();
        let last = board.waves()[0].wave.last_phase;
        for _ in 0..last {
            board.advance_all();
            board.prune_expired();
        }
        assert_eq!(board.waves().len(), 1);
        board.advance_all();
        board.prune_expired();
        assert!(board.waves().is_empty());
    }

    #[test]
    fn test_prune_keeps_insertion_order() {
        let mut board = quiet_board(5, 5);
        board.add_wave_at(IVec2::new(2, 2), gray()).unwrap(); // last_phase 4
        board.add_wave_at(IVec2::new(0, 0), gray()).unwrap(); // last_phase 8
        board.add_wave_at(IVec2::new(4, 0), gray()).unwrap(); // last_phase 8
        for _ in 0..5 {
            board.advance_all();
        }
        board.prune_expired();
        let sources: Vec<_> = board.waves().iter().map(|w| w.wave.source()).collect();
        assert_eq!(sources, vec![IVec2::new(0, 0), IVec2::new(4, 0)]);
    }

    #[test]
    fn test_draw_frame_paints_front_with_progress_color() {
        let mut board = quiet_board(4, 4);
        board.add_wave_at(IVec2::ZERO, gray()).unwrap();
        let mut surface = RecordingSurface::new(100, 100);

        // Phase 0: the source cell only, at the start color
        assert!(board.draw_frame(&mut surface, 0.0).unwrap());
        assert_eq!(surface.fills.len(), 1);
        let fill = &surface.fills[0];
        assert_eq!((fill.x, fill.y, fill.width, fill.height), (-1.0, -1.0, 0.5, 0.5));
        assert_eq!(fill.color.l, 0.0);

        // Phase 3 of 6: half way along the gradient
        surface.fills.clear();
        board.draw_frame(&mut surface, 16.0).unwrap();
        board.draw_frame(&mut surface, 32.0).unwrap();
        surface.fills.clear();
        board.draw_frame(&mut surface, 48.0).unwrap();
        assert_eq!(surface.fills.len(), 4);
        assert!(surface.fills.iter().all(|f| f.color.l == 50.0));
        assert_eq!(board.waves()[0].wave.phase, 4);
    }

    #[test]
    fn test_draw_frame_runs_wave_to_completion() {
        let mut board = quiet_board(3, 3);
        board.add_wave_at(IVec2::new(1, 1), gray()).unwrap();
        let mut surface = RecordingSurface::new(30, 30);
        for frame in 0..3 {
            assert!(board.draw_frame(&mut surface, frame as f64 * 16.0).unwrap());
        }
        // 1 + 4 + 4 cells, then gone
        assert_eq!(surface.fills.len(), 9);
        assert!(board.waves().is_empty());
    }

    #[test]
    fn test_spawn_always_and_in_bounds() {
        let policy = SpawnPolicy {
            probability: 1.0,
            ..Default::default()
        };
        let mut board = WaveBoard::new(Board::new(3, 2).unwrap(), policy, 42);
        for i in 0..200 {
            assert!(board.maybe_spawn(i as f64));
        }
        assert_eq!(board.waves().len(), 200);
        assert!(board.waves().iter().all(|w| board.board().contains(w.wave.source())));
    }

    #[test]
    fn test_spawn_never_with_zero_probability() {
        let mut board = quiet_board(8, 8);
        let mut surface = RecordingSurface::new(8, 8);
        for i in 0..500 {
            board.draw_frame(&mut surface, i as f64).unwrap();
        }
        assert!(board.waves().is_empty());
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn test_spawn_with_nan_probability_is_skipped() {
        let policy = SpawnPolicy {
            probability: f64::NAN,
            ..Default::default()
        };
        let mut board = WaveBoard::new(Board::new(4, 4).unwrap(), policy, 3);
        let mut surface = RecordingSurface::new(4, 4);
        for i in 0..20 {
            assert!(!board.maybe_spawn(i as f64));
            assert!(board.draw_frame(&mut surface, i as f64).unwrap());
        }
        assert!(board.waves().is_empty());
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let policy = SpawnPolicy {
            probability: 0.5,
            ..Default::default()
        };
        let run = |seed| {
            let mut board = WaveBoard::new(Board::new(16, 16).unwrap(), policy, seed);
            for i in 0..50 {
                board.maybe_spawn(i as f64);
            }
            board.waves().iter().map(|w| w.wave.source()).collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_gradient_hue_follows_timestamp() {
        let policy = SpawnPolicy {
            hue_rate: 0.5,
            ..Default::default()
        };
        let grad = policy.gradient_at(1000.0);
        assert_eq!(grad.start, Hsla::new(500.0, 100.0, 60.0, 0.8));
        assert_eq!(grad.end, Hsla::new(1000.0, 100.0, 40.0, 0.6));
    }
}
