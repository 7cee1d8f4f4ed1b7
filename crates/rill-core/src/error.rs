use thiserror::Error;

/// Top-level error type for rill pipelines.
#[derive(Debug, Error)]
pub enum RillError {
    #[error("Step error: {0}")]
    Step(#[from] StepError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("Transform failed: {0}")]
    Transform(String),

    #[error("Predicate failed: {0}")]
    Predicate(String),

    #[error("Comparator failed: {0}")]
    Comparator(String),

    #[error("Expansion failed: {0}")]
    Expand(String),

    #[error("Step '{step}' failed: {source}")]
    InStep {
        step: String,
        source: Box<RillError>,
    },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Malformed element: {0}")]
    Malformed(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl RillError {
    /// Tag this error with the name of the step it escaped from.
    ///
    /// An error that already carries a step name is returned unchanged, so
    /// the innermost step wins when steps are nested.
    pub fn in_step(self, step: impl Into<String>) -> Self {
        match self {
            err @ RillError::Step(StepError::InStep { .. }) => err,
            other => RillError::Step(StepError::InStep {
                step: step.into(),
                source: Box::new(other),
            }),
        }
    }

    /// Name of the step this error was tagged with, if any.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            RillError::Step(StepError::InStep { step, .. }) => Some(step.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RillError>;
