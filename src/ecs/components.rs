use glam::Vec2;

use crate::history::HistoryBuffer;

/// Stable boid identity, assigned in spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoidId(pub u32);

/// Current world position in arena units.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Velocity in arena units per tick.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Past positions, newest last. Sized for both the perception delay and
/// trajectory output.
#[derive(Debug, Clone)]
pub struct PositionHistory(pub HistoryBuffer<Vec2>);

/// Past velocities, newest last. Sized for the perception delay.
#[derive(Debug, Clone)]
pub struct VelocityHistory(pub HistoryBuffer<Vec2>);
