//! Boids flocking where every agent perceives its neighbors with a fixed
//! delay.
//!
//! Each tick freezes the flock into a snapshot, finds candidate neighbors
//! through a spatial hash built from *current* positions, and steers every
//! boid using what its neighbors looked like `delay` ticks ago. Per-boid
//! histories live in fixed-capacity ring buffers.
//!
//! ```no_run
//! use laggard::{Engine, SimConfig};
//!
//! let mut engine = Engine::new(SimConfig {
//!     delay: 5,
//!     agent_count: 200,
//!     ..SimConfig::default()
//! })?;
//! for _ in 0..60 {
//!     engine.step();
//! }
//! for boid in engine.snapshot() {
//!     println!("{} at {:?}, seen at {:?}", boid.id, boid.position, boid.delayed_position);
//! }
//! # Ok::<(), laggard::ConfigError>(())
//! ```

pub mod boid;
pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod history;
pub mod spatial;
pub mod timer;

pub use config::{FlockParams, PerceptionMode, SimConfig, SimParams, MAX_DELAY, MIN_DELAY};
pub use engine::{AgentSnapshot, Engine};
pub use error::{ConfigError, EngineError};
pub use history::HistoryBuffer;
pub use spatial::SpatialHash;
