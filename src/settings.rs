//! Animation settings
//!
//! Visual tuning for the wave board. Read from LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Board, Hsla, SpawnPolicy, WaveError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Board width in cells
    pub board_width: i32,
    /// Board height in cells
    pub board_height: i32,
    /// RNG seed (random per session when unset)
    pub seed: Option<u64>,

    // === Spawning ===
    /// Chance per frame that a wave spawns
    pub spawn_probability: f64,
    /// Hue degrees per millisecond of frame timestamp
    pub hue_rate: f64,
    /// Time offset (ms) between start and end hue
    pub hue_span_ms: f64,
    /// Saturation of both stops (%)
    pub saturation: f64,
    /// Lightness of the start/end stop (%)
    pub start_lightness: f64,
    pub end_lightness: f64,
    /// Alpha of the start/end stop
    pub start_alpha: f64,
    pub end_alpha: f64,

    // === Stage ===
    /// Fraction of the window the canvas fills
    pub viewport_scale: f64,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// FPS report interval (ms)
    pub fps_interval_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            seed: None,

            spawn_probability: SPAWN_PROBABILITY,
            hue_rate: HUE_RATE,
            hue_span_ms: HUE_SPAN_MS,
            saturation: 100.0,
            start_lightness: 60.0,
            end_lightness: 40.0,
            start_alpha: 0.8,
            end_alpha: 0.6,

            viewport_scale: VIEWPORT_SCALE,

            show_fps: true,
            fps_interval_ms: FPS_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn board(&self) -> Result<Board, WaveError> {
        Board::new(self.board_width, self.board_height)
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            probability: self.spawn_probability.clamp(0.0, 1.0),
            hue_rate: self.hue_rate,
            hue_span_ms: self.hue_span_ms,
            start: Hsla::new(0.0, self.saturation, self.start_lightness, self.start_alpha),
            end: Hsla::new(0.0, self.saturation, self.end_lightness, self.end_alpha),
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "diagonal_waves_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
