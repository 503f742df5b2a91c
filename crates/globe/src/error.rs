use gpu::RenderError;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum GlobeError {
    Config(ConfigError),
    Markers(serde_json::Error),
    Render(RenderError),
    /// The globe was torn down and cannot be reused.
    TornDown,
}

impl std::fmt::Display for GlobeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlobeError::Config(err) => write!(f, "{err}"),
            GlobeError::Markers(err) => write!(f, "marker list parse error: {err}"),
            GlobeError::Render(err) => write!(f, "{err}"),
            GlobeError::TornDown => write!(f, "globe already torn down"),
        }
    }
}

impl std::error::Error for GlobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlobeError::Config(err) => Some(err),
            GlobeError::Markers(err) => Some(err),
            GlobeError::Render(err) => Some(err),
            GlobeError::TornDown => None,
        }
    }
}

impl From<ConfigError> for GlobeError {
    fn from(err: ConfigError) -> Self {
        GlobeError::Config(err)
    }
}

impl From<RenderError> for GlobeError {
    fn from(err: RenderError) -> Self {
        GlobeError::Render(err)
    }
}
