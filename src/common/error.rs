//! Error types for drone_motion_planning

use std::fmt;

/// Main error type for planning operations
#[derive(Debug)]
pub enum PlannerError {
    /// Free-space sampling exhausted its attempt budget
    InsufficientFreeSpace(String),
    /// Graph search exhausted the open set without reaching the goal
    NoPathFound(String),
    /// Invalid parameter or input data
    InvalidParameter(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InsufficientFreeSpace(msg) => {
                write!(f, "Insufficient free space: {}", msg)
            }
            PlannerError::NoPathFound(msg) => write!(f, "No path found: {}", msg),
            PlannerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}

/// Result type alias for planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;
