use crate::config::{PerceptionMode, SimParams};
use crate::spatial::{BoidSnapshot, Perceived, SpatialHash};

/// Collect the delayed state of every boid `me` can see this tick.
///
/// Candidates come from the 3x3 block around `me`'s *current* cell; the range
/// test and everything returned use the candidates' delayed state. Candidates
/// whose history is too short for the delay are skipped. `out` is cleared
/// first and filled in candidate order.
pub fn gather(
    me_idx: usize,
    snapshots: &[BoidSnapshot],
    grid: &SpatialHash,
    params: &SimParams,
    out: &mut Vec<Perceived>,
) {
    out.clear();
    let me = &snapshots[me_idx];
    let observer = match params.perception {
        PerceptionMode::Asymmetric => me.pos,
        PerceptionMode::ObserverDelayed => me.perceived.map_or(me.pos, |p| p.pos),
    };
    let range_sq = params.visual_range_sq();
    let count = snapshots.len();

    grid.query_neighbors(me.pos, |neighbor_idx| {
        let ni = neighbor_idx as usize;
        if ni == me_idx || ni >= count {
            return;
        }
        let Some(seen) = snapshots[ni].perceived else {
            return;
        };
        if (observer - seen.pos).length_squared() < range_sq {
            out.push(seen);
        }
    });
}
