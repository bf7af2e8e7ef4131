use glam::Vec2;

use crate::config::FlockParams;
use crate::spatial::Perceived;

/// Apply cohesion, separation and alignment, in that order, to `vel`.
/// Alignment sees the velocity already adjusted by the first two rules.
pub fn steer(vel: &mut Vec2, pos: Vec2, neighbors: &[Perceived], params: &FlockParams) {
    cohesion(vel, pos, neighbors, params.centering_factor);
    separation(vel, pos, neighbors, params.min_distance, params.avoid_factor);
    alignment(vel, neighbors, params.matching_factor);
}

/// Steer toward the mean perceived position of neighbors.
pub fn cohesion(vel: &mut Vec2, pos: Vec2, neighbors: &[Perceived], centering_factor: f32) {
    if neighbors.is_empty() {
        return;
    }
    let mut sum = Vec2::ZERO;
    for n in neighbors {
        sum += n.pos;
    }
    let center = sum / neighbors.len() as f32;
    *vel += (center - pos) * centering_factor;
}

/// Push away from every neighbor perceived closer than `min_distance`.
/// Offsets are summed, not averaged.
pub fn separation(
    vel: &mut Vec2,
    pos: Vec2,
    neighbors: &[Perceived],
    min_distance: f32,
    avoid_factor: f32,
) {
    let min_distance_sq = min_distance * min_distance;
    let mut push = Vec2::ZERO;
    for n in neighbors {
        let away = pos - n.pos;
        if away.length_squared() < min_distance_sq {
            push += away;
        }
    }
    *vel += push * avoid_factor;
}

/// Nudge `vel` toward the mean perceived velocity of neighbors.
pub fn alignment(vel: &mut Vec2, neighbors: &[Perceived], matching_factor: f32) {
    if neighbors.is_empty() {
        return;
    }
    let mut sum = Vec2::ZERO;
    for n in neighbors {
        sum += n.vel;
    }
    let avg = sum / neighbors.len() as f32;
    *vel += (avg - *vel) * matching_factor;
}
