use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid statistics payload: {0}")]
    Payload(String),

    #[error("drawing backend failure: {0}")]
    Backend(String),
}

/// Failure of the one-shot statistics fetch, as reported by the host page.
///
/// The engine never retries: any of these moves the dashboard into its
/// page-level error state until the user reloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("unexpected response status: {0}")]
    Status(u16),

    #[error("failed to parse statistics payload: {0}")]
    Parse(String),
}
