// festive-engine - Countdown page animation core
//
// One scheduler drives every animated entity once per frame; the
// fireworks renderer is the main one. Everything outside `web` is plain
// Rust and runs natively.

pub mod config;
pub mod error;
pub mod fx;
pub mod scheduler;
pub mod show;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{EngineConfig, FireworksConfig};
pub use error::{EngineError, EngineResult};
pub use fx::{Burst, Fireworks, Particle};
pub use scheduler::{Entity, Scheduler, Updatable};
pub use surface::{Composite, Paint, Recorder, Surface, Viewport};
