use glam::Vec2;

use crate::boid::{self, HistoryLayout};
use crate::config::{FlockParams, SimConfig, SimParams, MAX_DELAY, MIN_DELAY};
use crate::ecs::components::{BoidId, Position, PositionHistory, Velocity};
use crate::ecs::systems::{self, TickBuffers};
use crate::error::{ConfigError, EngineError};
use crate::spatial::{BoidSnapshot, SpatialHash};
use crate::timer::{TickStats, TickTimers};

/// Minimum spatial hash table size (buckets).
const MIN_SPATIAL_TABLE_SIZE: usize = 1024;

/// Read-only view of one boid for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Where other boids currently perceive this one.
    pub delayed_position: Vec2,
}

/// Delayed-perception flocking simulation.
///
/// Owns every boid and all parameters. Ticks are strictly sequential; the
/// host decides the cadence by calling [`Engine::step`].
pub struct Engine {
    world: hecs::World,
    /// Entity per boid id; ids are dense from 0.
    entities: Vec<hecs::Entity>,
    spatial_grid: SpatialHash,
    snapshots: Vec<BoidSnapshot>,
    tick_bufs: TickBuffers,
    params: SimParams,
    layout: HistoryLayout,
    timers: TickTimers,
    tick_count: u64,
}

impl Engine {
    /// Build an engine with `config.agent_count` randomly placed boids.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let mut engine = Self::empty(&config, config.agent_count)?;
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        boid::spawn_boids(
            &mut engine.world,
            config.agent_count,
            config.width,
            config.height,
            engine.layout,
            &mut rng,
        );
        engine.collect_entities();
        engine.log_ready();
        Ok(engine)
    }

    /// Build an engine from explicit `(position, velocity)` pairs. Boid ids
    /// follow slice order; `config.agent_count` and `config.seed` are ignored.
    pub fn with_agents(config: SimConfig, agents: &[(Vec2, Vec2)]) -> Result<Self, ConfigError> {
        let mut engine = Self::empty(&config, agents.len())?;
        for (id, &(pos, vel)) in agents.iter().enumerate() {
            boid::spawn_boid(&mut engine.world, id as u32, pos, vel, engine.layout);
        }
        engine.collect_entities();
        engine.log_ready();
        Ok(engine)
    }

    fn empty(config: &SimConfig, capacity: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        let table_size = (capacity * 2).next_power_of_two().max(MIN_SPATIAL_TABLE_SIZE);
        let params = SimParams::from_config(config);
        Ok(Self {
            world: hecs::World::new(),
            entities: Vec::with_capacity(capacity),
            spatial_grid: SpatialHash::new(params.cell_size, table_size),
            snapshots: Vec::with_capacity(capacity),
            tick_bufs: TickBuffers::new(capacity),
            params,
            layout: HistoryLayout {
                depth: config.history_depth(),
                trail_len: config.trail_len,
            },
            timers: TickTimers::new(),
            tick_count: 0,
        })
    }

    fn collect_entities(&mut self) {
        let mut ids: Vec<(u32, hecs::Entity)> = self
            .world
            .query::<&BoidId>()
            .iter()
            .map(|(entity, id)| (id.0, entity))
            .collect();
        ids.sort_unstable_by_key(|&(id, _)| id);
        self.entities = ids.into_iter().map(|(_, entity)| entity).collect();
    }

    fn log_ready(&self) {
        log::info!(
            "Engine ready: {} boids | arena {}x{} | delay {} | visual range {}",
            self.entities.len(),
            self.params.width,
            self.params.height,
            self.params.delay,
            self.params.visual_range,
        );
    }

    /// Advance exactly one tick.
    pub fn step(&mut self) {
        systems::tick(
            &mut self.world,
            &mut self.spatial_grid,
            &mut self.snapshots,
            &mut self.tick_bufs,
            &self.params,
            &mut self.timers,
        );
        self.tick_count += 1;
        log::trace!("tick {} | {}", self.tick_count, self.timers.last());
    }

    /// Change the perception delay, clamped to `[MIN_DELAY, MAX_DELAY]`.
    /// Takes effect from the next [`Engine::step`]; history is kept as is.
    /// Returns the delay actually applied.
    pub fn set_delay(&mut self, value: u32) -> Result<u32, EngineError> {
        let requested = value.clamp(MIN_DELAY, MAX_DELAY);
        let max = (self.layout.depth - 1) as u32;
        if requested > max {
            return Err(EngineError::DelayOutOfRange { requested, max });
        }
        if requested != self.params.delay {
            log::debug!("Perception delay {} -> {}", self.params.delay, requested);
            self.params.delay = requested;
        }
        Ok(requested)
    }

    pub fn increase_delay(&mut self) -> Result<u32, EngineError> {
        self.set_delay(self.params.delay.saturating_add(1))
    }

    pub fn decrease_delay(&mut self) -> Result<u32, EngineError> {
        self.set_delay(self.params.delay.saturating_sub(1))
    }

    pub fn delay(&self) -> u32 {
        self.params.delay
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Force-tuning constants, adjustable between ticks.
    pub fn flock_params_mut(&mut self) -> &mut FlockParams {
        &mut self.params.flock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn agent_count(&self) -> usize {
        self.entities.len()
    }

    /// Smoothed per-phase tick timing.
    pub fn tick_stats(&self) -> TickStats {
        self.timers.smoothed()
    }

    /// Every boid's state, ordered by id.
    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        let mut out = Vec::with_capacity(self.entities.len());
        self.snapshot_into(&mut out);
        out
    }

    /// Like [`Engine::snapshot`], reusing `out`'s allocation.
    pub fn snapshot_into(&self, out: &mut Vec<AgentSnapshot>) {
        out.clear();
        let delay = self.params.delay as usize;
        for (id, &entity) in self.entities.iter().enumerate() {
            let Ok(mut query) = self
                .world
                .query_one::<(&Position, &Velocity, &PositionHistory)>(entity)
            else {
                continue;
            };
            let Some((pos, vel, history)) = query.get() else {
                continue;
            };
            let delayed_position = history
                .0
                .delayed(delay)
                .or_else(|| history.0.oldest())
                .unwrap_or(pos.0);
            out.push(AgentSnapshot {
                id: id as u32,
                position: pos.0,
                velocity: vel.0,
                delayed_position,
            });
        }
    }

    /// Retained positions of boid `id`, oldest first, ending with the current
    /// position. At most `trail_len` entries; `None` for unknown ids.
    pub fn trajectory(&self, id: u32) -> Option<Vec<Vec2>> {
        let entity = *self.entities.get(id as usize)?;
        let history = self.world.get::<&PositionHistory>(entity).ok()?;
        // The buffer may hold extra samples to serve the perception delay.
        let skip = history.0.len().saturating_sub(self.layout.trail_len);
        let trail = history.0.iter().skip(skip).copied().collect();
        Some(trail)
    }
}
