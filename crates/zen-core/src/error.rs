use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("particle buffer length mismatch: expected {expected}, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("landmark set must hold {expected} points, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("invalid color {0:?}: expected #RRGGBB or #RGB")]
    InvalidColor(String),
}
