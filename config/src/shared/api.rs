use serde::{Deserialize, Serialize};

/// Configuration for the HTTP query surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Interface the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
}
