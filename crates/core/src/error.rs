use thiserror::Error;

pub type SemResult<T> = Result<T, SemError>;

#[derive(Error, Debug)]
pub enum SemError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid wizard transition: cannot {action} from {from}")]
    InvalidTransition { from: String, action: String },

    #[error("A plan generation is already in flight")]
    SubmissionPending,

    #[error("Plan generation failed: {0}")]
    Generation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for SemError {
    fn from(err: config::ConfigError) -> Self {
        SemError::Config(err.to_string())
    }
}
