use thiserror::Error;

pub type TreemapResult<T> = Result<T, TreemapError>;

#[derive(Debug, Error)]
pub enum TreemapError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("chart backend error: {0}")]
    Backend(String),
}
