use std::fmt;

/// Failures surfaced by the trainer and its configuration.
#[derive(Debug)]
pub enum TrainError {
    /// A matrix handed to the trainer has the wrong shape.
    Shape {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A weight update produced NaN or an infinity.
    NonFiniteWeights { iteration: usize, synapse: usize },
    InvalidConfig(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::Shape { what, expected, found } => write!(
                f,
                "{what} must be {}x{}, got {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            TrainError::NonFiniteWeights { iteration, synapse } => write!(
                f,
                "synapse {synapse} became non-finite after the update at iteration {iteration}"
            ),
            TrainError::InvalidConfig(msg) => write!(f, "invalid training config: {msg}"),
            TrainError::Io(e) => write!(f, "config file error: {e}"),
            TrainError::Json(e) => write!(f, "config JSON error: {e}"),
        }
    }
}

impl std::error::Error for TrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainError::Io(e) => Some(e),
            TrainError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrainError {
    fn from(e: std::io::Error) -> Self {
        TrainError::Io(e)
    }
}

impl From<serde_json::Error> for TrainError {
    fn from(e: serde_json::Error) -> Self {
        TrainError::Json(e)
    }
}
