use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Script error: {0}")]
    ScriptError(#[from] serde_json::Error),
}
