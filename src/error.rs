use thiserror::Error;

#[derive(Debug, Error)]
pub enum PiError {
    #[error("invalid number of subdivisions: {0:?} (expected a positive integer)")]
    InvalidStepCount(String),

    #[error("invalid number of workers: {0:?} (expected a positive integer)")]
    InvalidWorkerCount(String),

    #[error("failed to start blocking pool: {0}")]
    Runtime(#[from] std::io::Error),
}

impl PiError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, PiError>;
