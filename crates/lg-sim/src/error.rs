use lg_core::{LgError, PointId};
use lg_package::PackageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] LgError),

    #[error("package error: {0}")]
    Package(#[from] PackageError),

    #[error("{what} length {got} does not match configured count {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{point} is outside a ring of {len} points")]
    PointOutOfRange { point: PointId, len: usize },

    #[error("{got} packages delivered but only {expected} exist")]
    Overdelivered { expected: usize, got: usize },

    #[error("actor thread {0} panicked")]
    ActorPanicked(String),

    #[error("failed to spawn actor thread: {0}")]
    Spawn(#[source] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
