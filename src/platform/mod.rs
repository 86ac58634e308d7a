//! Platform abstraction layer
//!
//! Frame sources for the browser (`requestAnimationFrame`) and a manual,
//! deterministic source for headless runs and tests.

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualFrameSource;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserFrames;
