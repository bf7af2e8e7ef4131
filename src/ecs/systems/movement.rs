use glam::Vec2;

use crate::ecs::components::{Position, PositionHistory, Velocity, VelocityHistory};
use crate::spatial::BoidSnapshot;

/// Commit phase: adopt each boid's new velocity, integrate position, and
/// record both in history. `velocities` is indexed like `snapshots`.
pub fn integrate(world: &mut hecs::World, snapshots: &[BoidSnapshot], velocities: &[Vec2]) {
    for (snap, &new_vel) in snapshots.iter().zip(velocities) {
        let Ok((pos, vel, pos_hist, vel_hist)) = world.query_one_mut::<(
            &mut Position,
            &mut Velocity,
            &mut PositionHistory,
            &mut VelocityHistory,
        )>(snap.entity) else {
            continue;
        };

        vel.0 = new_vel;
        pos.0 += vel.0;

        pos_hist.0.push(pos.0);
        vel_hist.0.push(vel.0);
    }
}
