use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid draw area: width={width}, height={height}")]
    InvalidArea { width: i32, height: i32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("line `{0}` is already registered")]
    DuplicateLine(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
