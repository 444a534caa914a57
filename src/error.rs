use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkillError>;

/// Everything that can go wrong while generating or invoking a skill.
#[derive(Debug, Error)]
pub enum SkillError {
    /// The persisted provider configuration is missing.
    #[error("configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The input file is neither `mcpServers`-nested nor a flat provider.
    #[error("unrecognized config format in {}", .0.display())]
    UnrecognizedConfigFormat(PathBuf),

    #[error("server '{name}' not found in config. Available servers: {available}")]
    ServerNotInMultiConfig { name: String, available: String },

    /// A single provider entry has the wrong shape.
    #[error("invalid provider '{name}': {reason}")]
    InvalidProvider { name: String, reason: String },

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The `--call` payload is not `{"tool": ..., "arguments": {...}}`.
    #[error("invalid tool call payload: {0}")]
    InvalidCall(String),

    /// The session could not even be set up (spawn failure, bad HTTP client settings).
    #[error("transport unavailable for {target}: {reason}")]
    TransportUnavailable { target: String, reason: String },

    /// Handshake or tool listing failed.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed { target: String, reason: String },

    #[error("tool call '{tool}' failed: {reason}")]
    ToolCall { tool: String, reason: String },

    #[error("failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode JSON output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl SkillError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SkillError::Io {
            path: path.into(),
            source,
        }
    }
}
