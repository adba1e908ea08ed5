use confdist::core::io::matrix::MatrixIoError;
use confdist::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    MatrixIo(#[from] MatrixIoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
