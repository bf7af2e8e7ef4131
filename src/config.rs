use crate::error::ConfigError;

/// Smallest delay reachable through interactive adjustment.
pub const MIN_DELAY: u32 = 1;
/// Largest delay reachable through interactive adjustment.
pub const MAX_DELAY: u32 = 10;
/// Default retained trajectory length per boid.
pub const DEFAULT_TRAIL_LEN: usize = 100;

/// Force-tuning constants. Mutable between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockParams {
    /// Cohesion: fraction of the offset to the neighbor centre applied per tick.
    pub centering_factor: f32,
    /// Separation: scale on the summed push-away vector.
    pub avoid_factor: f32,
    /// Separation only considers neighbors closer than this.
    pub min_distance: f32,
    /// Alignment: fraction of the velocity mismatch applied per tick.
    pub matching_factor: f32,
    pub speed_limit: f32,
    /// Distance from each arena edge where boundary steering kicks in.
    pub boundary_margin: f32,
    pub turn_factor: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            centering_factor: 0.005,
            avoid_factor: 0.05,
            min_distance: 20.0,
            matching_factor: 0.05,
            speed_limit: 10.0,
            boundary_margin: 200.0,
            turn_factor: 1.0,
        }
    }
}

/// Which position an observer measures neighbor distance from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerceptionMode {
    /// Observer uses its current position; only neighbors are delayed.
    #[default]
    Asymmetric,
    /// Observer also uses its own delayed position for the range test.
    ObserverDelayed,
}

/// Static configuration for a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    /// Perception delay in ticks.
    pub delay: u32,
    /// Neighbor radius; also the spatial hash cell size.
    pub visual_range: f32,
    pub agent_count: usize,
    /// Seed for random initial placement. `None` draws a fresh seed.
    pub seed: Option<u64>,
    /// How many past positions each boid retains for trajectory output.
    pub trail_len: usize,
    pub perception: PerceptionMode,
    pub flock: FlockParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            delay: 1,
            visual_range: 75.0,
            agent_count: 100,
            seed: None,
            trail_len: DEFAULT_TRAIL_LEN,
            perception: PerceptionMode::default(),
            flock: FlockParams::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay < MIN_DELAY {
            return Err(ConfigError::ZeroDelay);
        }
        if !(self.visual_range.is_finite() && self.visual_range > 0.0) {
            return Err(ConfigError::InvalidVisualRange(self.visual_range));
        }
        let valid_side = |v: f32| v.is_finite() && v > 0.0;
        if !valid_side(self.width) || !valid_side(self.height) {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.trail_len == 0 {
            return Err(ConfigError::EmptyTrail);
        }
        Ok(())
    }

    /// Samples each history buffer must be able to reach back: enough for the
    /// configured delay and for any delay reachable interactively.
    pub fn history_depth(&self) -> usize {
        self.delay.max(MAX_DELAY) as usize + 1
    }
}

/// Runtime parameters owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub width: f32,
    pub height: f32,
    pub delay: u32,
    pub visual_range: f32,
    pub cell_size: f32,
    pub perception: PerceptionMode,
    pub flock: FlockParams,
}

impl SimParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            delay: config.delay,
            visual_range: config.visual_range,
            cell_size: config.visual_range,
            perception: config.perception,
            flock: config.flock,
        }
    }

    pub fn visual_range_sq(&self) -> f32 {
        self.visual_range * self.visual_range
    }
}
