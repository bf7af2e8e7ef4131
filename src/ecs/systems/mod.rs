pub mod flocking;
pub mod movement;
pub mod neighbors;
pub mod spatial;
pub mod steering;

use glam::Vec2;
use rayon::prelude::*;

use crate::config::SimParams;
use crate::spatial::{BoidSnapshot, Perceived, SpatialHash};
use crate::timer::{TickPhase, TickTimers};

/// Per-tick scratch, pre-allocated and reused each tick.
pub struct TickBuffers {
    /// New velocity per snapshot index, filled by the compute phase.
    velocities: Vec<Vec2>,
}

impl TickBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            velocities: Vec::with_capacity(capacity),
        }
    }
}

/// Run one simulation tick.
///
/// Every boid reads the same frozen snapshot; no writes land in the world
/// until all new velocities have been computed.
pub fn tick(
    world: &mut hecs::World,
    grid: &mut SpatialHash,
    snapshots: &mut Vec<BoidSnapshot>,
    bufs: &mut TickBuffers,
    params: &SimParams,
    timers: &mut TickTimers,
) {
    // 1. Freeze pre-tick state: snapshots + spatial hash
    timers.begin();
    spatial::rebuild(world, grid, snapshots, params.delay);
    timers.end(TickPhase::Rebuild);

    // 2. Compute new velocities from the snapshot only
    timers.begin();
    compute(snapshots, grid, params, &mut bufs.velocities);
    timers.end(TickPhase::Compute);

    // 3. Integrate and record history
    timers.begin();
    movement::integrate(world, snapshots, &bufs.velocities);
    timers.end(TickPhase::Commit);
    timers.finish_tick();
}

/// Steering for every boid. Each boid's neighbor list is summed in candidate
/// order, so results do not depend on how rayon splits the work.
fn compute(snapshots: &[BoidSnapshot], grid: &SpatialHash, params: &SimParams, out: &mut Vec<Vec2>) {
    (0..snapshots.len())
        .into_par_iter()
        .map_init(
            || Vec::<Perceived>::with_capacity(32),
            |neighbor_buf, idx| {
                let me = &snapshots[idx];
                neighbors::gather(idx, snapshots, grid, params, neighbor_buf);

                let mut vel = me.vel;
                flocking::steer(&mut vel, me.pos, neighbor_buf.as_slice(), &params.flock);
                steering::keep_within_bounds(&mut vel, me.pos, params.width, params.height, &params.flock);
                steering::limit_speed(&mut vel, params.flock.speed_limit);
                vel
            },
        )
        .collect_into_vec(out);
}
