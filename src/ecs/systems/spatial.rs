use crate::ecs::components::{BoidId, Position, PositionHistory, Velocity, VelocityHistory};
use crate::spatial::{BoidSnapshot, Perceived, SpatialHash};

/// Rebuild the snapshot cache and spatial hash from pre-tick state.
///
/// Snapshots are sorted by id so neighbor iteration order, and therefore
/// float summation order, does not depend on ECS storage layout.
pub fn rebuild(
    world: &hecs::World,
    grid: &mut SpatialHash,
    snapshots: &mut Vec<BoidSnapshot>,
    delay: u32,
) {
    snapshots.clear();
    for (entity, (id, pos, vel, pos_hist, vel_hist)) in world
        .query::<(&BoidId, &Position, &Velocity, &PositionHistory, &VelocityHistory)>()
        .iter()
    {
        let perceived = match (
            pos_hist.0.delayed(delay as usize),
            vel_hist.0.delayed(delay as usize),
        ) {
            (Some(pos), Some(vel)) => Some(Perceived { pos, vel }),
            _ => None,
        };
        snapshots.push(BoidSnapshot {
            entity,
            id: id.0,
            pos: pos.0,
            vel: vel.0,
            perceived,
        });
    }
    snapshots.sort_unstable_by_key(|s| s.id);
    grid.build(snapshots.iter().map(|s| s.pos));
}
