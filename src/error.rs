use thiserror::Error;

/// Errors raised when validating a simulation configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Perception delay below one tick.
    #[error("invalid configuration: perception delay must be at least 1")]
    ZeroDelay,
    /// Visual range that is not a positive finite number.
    #[error("invalid configuration: visual range must be positive (got {0})")]
    InvalidVisualRange(f32),
    /// Arena dimensions that are not positive finite numbers.
    #[error("invalid configuration: arena must be positive (got {width}x{height})")]
    InvalidArena { width: f32, height: f32 },
    /// Trajectory length of zero.
    #[error("invalid configuration: trajectory length must be at least 1")]
    EmptyTrail,
}

/// Errors raised while adjusting a running engine.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Requested delay reaches further back than the history buffers hold.
    #[error("perception delay {requested} is out of range (history covers up to {max})")]
    DelayOutOfRange { requested: u32, max: u32 },
}
