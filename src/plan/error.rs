use std::fmt;

/// Error types for loading a plan document
#[derive(Debug)]
pub enum PlanError {
    /// Plan content is not valid JSON, or does not match the plan schema
    Parse(serde_json::Error),

    /// Plan is valid JSON but not a plan document
    InvalidFormat(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Parse(err) => {
                write!(f, "Failed to parse plan: {}", err)
            }
            PlanError::InvalidFormat(msg) => {
                write!(f, "Invalid plan format: {}", msg)
            }
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Parse(err) => Some(err),
            PlanError::InvalidFormat(_) => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Parse(err)
    }
}

/// Result type for plan operations
pub type PlanResult<T> = Result<T, PlanError>;
