use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SkillError};

/// File name of the persisted provider configuration inside a generated package.
pub const CONFIG_FILE_NAME: &str = "mcp-config.json";

/// Transport labels served over streamable HTTP. Anything else spawns a command.
const HTTP_TRANSPORTS: &[&str] = &["http", "sse", "streamable-http"];

/// Which session flavour a provider is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stdio,
    Http,
}

impl TransportKind {
    /// Detect the transport of a raw provider entry.
    ///
    /// An explicit string `transport` always wins. Without it, a `url` key
    /// selects HTTP and everything else (including neither key) selects stdio.
    pub fn detect(raw: &Map<String, Value>) -> Self {
        let inferred = if raw.contains_key("url") { "http" } else { "stdio" };
        let label = raw
            .get("transport")
            .and_then(Value::as_str)
            .unwrap_or(inferred);
        Self::from_label(label)
    }

    pub fn from_label(label: &str) -> Self {
        if HTTP_TRANSPORTS.contains(&label) {
            TransportKind::Http
        } else {
            TransportKind::Stdio
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportKind::Stdio => "stdio",
            TransportKind::Http => "http",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider reached by spawning a command and speaking over its stdio.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StdioProvider {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra variables layered over the inherited environment.
    #[serde(default)]
    pub env: Option<BTreeMap<String, String>>,
}

/// A provider reached over streamable HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpProvider {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Stdio(StdioProvider),
    Http(HttpProvider),
}

/// Connection descriptor for one tool provider.
///
/// The typed view is resolved once from the raw JSON object; the raw object
/// is what gets persisted, so keys this crate does not understand survive
/// a save/load round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ProviderConfig {
    kind: ProviderKind,
    raw: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for ProviderConfig {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let value = Value::Object(raw.clone());
        let kind = match TransportKind::detect(&raw) {
            TransportKind::Http => serde_json::from_value(value)
                .map(ProviderKind::Http)
                .map_err(|e| format!("http transport: {e}"))?,
            TransportKind::Stdio => serde_json::from_value(value)
                .map(ProviderKind::Stdio)
                .map_err(|e| format!("stdio transport: {e}"))?,
        };
        Ok(Self { kind, raw })
    }
}

impl From<ProviderConfig> for Map<String, Value> {
    fn from(config: ProviderConfig) -> Self {
        config.raw
    }
}

impl ProviderConfig {
    pub fn kind(&self) -> &ProviderKind {
        &self.kind
    }

    pub fn transport(&self) -> TransportKind {
        match self.kind {
            ProviderKind::Stdio(_) => TransportKind::Stdio,
            ProviderKind::Http(_) => TransportKind::Http,
        }
    }

    /// The JSON object this config was built from.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Human-readable endpoint, used in logs and error messages.
    pub fn target(&self) -> &str {
        match &self.kind {
            ProviderKind::Stdio(p) => &p.command,
            ProviderKind::Http(p) => &p.url,
        }
    }

    /// Load a persisted provider configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SkillError::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(SkillError::io(path, e)),
        };
        tracing::debug!(path = %path.display(), "Loading provider config");
        serde_json::from_str(&contents).map_err(|source| SkillError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the configuration as pretty JSON, exactly as it was supplied.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let mut contents = serde_json::to_string_pretty(&self.raw)?;
        contents.push('\n');
        std::fs::write(path, contents).map_err(|e| SkillError::io(path, e))
    }
}

/// A provider together with the name it was declared under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProvider {
    pub name: String,
    pub config: ProviderConfig,
}

/// Parse a provider configuration file in any of the accepted shapes.
///
/// - `{"mcpServers": {"name": {...}, ...}}`
/// - `{"name": "foo", "command": ...}` / `{"name": "foo", "url": ...}`
/// - `{"command": ...}` / `{"url": ...}`, named after the file stem
pub fn load_providers(path: &Path) -> Result<Vec<NamedProvider>> {
    let contents = std::fs::read_to_string(path).map_err(|e| SkillError::io(path, e))?;
    let raw: Value = serde_json::from_str(&contents).map_err(|source| SkillError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_providers(raw, path)
}

/// Shape detection behind [`load_providers`]; `path` names the source file.
pub fn parse_providers(raw: Value, path: &Path) -> Result<Vec<NamedProvider>> {
    let unrecognized = || SkillError::UnrecognizedConfigFormat(path.to_path_buf());

    let Value::Object(mut root) = raw else {
        return Err(unrecognized());
    };

    if let Some(servers) = root.remove("mcpServers") {
        let Value::Object(servers) = servers else {
            return Err(unrecognized());
        };
        return servers
            .into_iter()
            .map(|(name, entry)| named_provider(name, entry))
            .collect();
    }

    if !(root.contains_key("command") || root.contains_key("url")) {
        return Err(unrecognized());
    }

    let name = match root.remove("name") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(SkillError::InvalidProvider {
                name: other.to_string(),
                reason: "`name` must be a string".into(),
            })
        }
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(unrecognized)?,
    };

    Ok(vec![named_provider(name, Value::Object(root))?])
}

fn named_provider(name: String, entry: Value) -> Result<NamedProvider> {
    let Value::Object(entry) = entry else {
        return Err(SkillError::InvalidProvider {
            name,
            reason: "provider entry must be a JSON object".into(),
        });
    };
    match ProviderConfig::try_from(entry) {
        Ok(config) => Ok(NamedProvider { name, config }),
        Err(reason) => Err(SkillError::InvalidProvider { name, reason }),
    }
}

/// Narrow a provider list down to the one named by `--server`, if any.
pub fn select_provider(
    providers: Vec<NamedProvider>,
    server: Option<&str>,
) -> Result<Vec<NamedProvider>> {
    let Some(server) = server else {
        return Ok(providers);
    };
    if providers.iter().any(|p| p.name == server) {
        return Ok(providers.into_iter().filter(|p| p.name == server).collect());
    }
    let available = providers
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Err(SkillError::ServerNotInMultiConfig {
        name: server.to_string(),
        available,
    })
}
