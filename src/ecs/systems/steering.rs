use glam::Vec2;

use crate::config::FlockParams;

/// Soft edge repulsion. Each axis is checked independently, so a boid in a
/// corner margin gets turned on both axes.
pub fn keep_within_bounds(vel: &mut Vec2, pos: Vec2, width: f32, height: f32, params: &FlockParams) {
    let margin = params.boundary_margin;
    let turn = params.turn_factor;

    if pos.x < margin {
        vel.x += turn;
    }
    if pos.x > width - margin {
        vel.x -= turn;
    }
    if pos.y < margin {
        vel.y += turn;
    }
    if pos.y > height - margin {
        vel.y -= turn;
    }
}

/// Rescale `vel` to exactly `speed_limit` when it is faster.
pub fn limit_speed(vel: &mut Vec2, speed_limit: f32) {
    let speed = vel.length();
    if speed > speed_limit {
        *vel = *vel / speed * speed_limit;
    }
}
