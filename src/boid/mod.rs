use glam::Vec2;

use crate::ecs::components::*;
use crate::history::HistoryBuffer;

/// Initial velocity components are drawn from [-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED).
const MAX_INITIAL_SPEED: f32 = 5.0;

/// History sizing shared by every boid in a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLayout {
    /// Samples needed to serve the deepest allowed delay (`max_delay + 1`).
    pub depth: usize,
    /// Positions retained for trajectory output.
    pub trail_len: usize,
}

impl HistoryLayout {
    pub fn position_capacity(&self) -> usize {
        self.trail_len.max(self.depth)
    }

    pub fn velocity_capacity(&self) -> usize {
        self.depth
    }
}

/// Spawn one boid with histories pre-seeded from its initial state, so
/// delayed reads are defined from the very first tick.
pub fn spawn_boid(
    world: &mut hecs::World,
    id: u32,
    pos: Vec2,
    vel: Vec2,
    layout: HistoryLayout,
) -> hecs::Entity {
    world.spawn((
        BoidId(id),
        Position(pos),
        Velocity(vel),
        PositionHistory(HistoryBuffer::seeded(
            layout.position_capacity(),
            pos,
            layout.depth,
        )),
        VelocityHistory(HistoryBuffer::seeded(
            layout.velocity_capacity(),
            vel,
            layout.depth,
        )),
    ))
}

/// Spawn a batch of boids uniformly over the arena with random velocities.
/// Ids run from 0 in spawn order.
pub fn spawn_boids(
    world: &mut hecs::World,
    count: usize,
    width: f32,
    height: f32,
    layout: HistoryLayout,
    rng: &mut fastrand::Rng,
) {
    for i in 0..count {
        let pos = Vec2::new(rng.f32() * width, rng.f32() * height);
        let vel = Vec2::new(
            rng.f32() * 2.0 * MAX_INITIAL_SPEED - MAX_INITIAL_SPEED,
            rng.f32() * 2.0 * MAX_INITIAL_SPEED - MAX_INITIAL_SPEED,
        );
        spawn_boid(world, i as u32, pos, vel, layout);
    }
}
