use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The spatial query collaborator failed. Fatal to the frame that hit
    /// it; the failure is never cached, so the next frame retries.
    #[error("Spatial query failed: {0}")]
    SpatialQuery(#[source] anyhow::Error),

    #[error("Invalid render config: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
