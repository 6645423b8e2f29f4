use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Invalid risk policy parameters: {0}")]
    InvalidParameters(String),
}
