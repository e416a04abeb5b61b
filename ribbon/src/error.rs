use thiserror::Error;

/// Reasons an owned curve or rig refuses a topology.
///
/// The free evaluation functions never return these; they treat a bad
/// topology as a precondition violation instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("degree {degree} needs at least {} control points, got {count}", .degree + 1)]
    TooFewControlPoints { degree: usize, count: usize },

    #[error("expected {expected} control points, got {actual}")]
    ControlCountMismatch { expected: usize, actual: usize },

    #[error("output buffer holds {actual} offsets but the chain has {expected} bones")]
    OutputLengthMismatch { expected: usize, actual: usize },
}
