use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use rmcp::transport::streamable_http_client::StreamableHttpClientTransportConfig;
use rmcp::transport::{StreamableHttpClientTransport, TokioChildProcess};

use super::McpSession;
use crate::config::{HttpProvider, StdioProvider};
use crate::error::{Result, SkillError};

/// Budget for establishing the TCP/TLS connection to an HTTP provider.
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Budget for each read from an HTTP provider.
pub const HTTP_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Spawn a provider as a child process and handshake over its stdio.
pub async fn connect_stdio(provider: &StdioProvider) -> Result<McpSession> {
    let mut cmd = tokio::process::Command::new(&provider.command);
    cmd.args(&provider.args);
    if let Some(env) = &provider.env {
        cmd.envs(env);
    }

    let transport = TokioChildProcess::new(cmd).map_err(|e| SkillError::TransportUnavailable {
        target: provider.command.clone(),
        reason: format!("failed to spawn: {e}"),
    })?;

    McpSession::establish(provider.command.clone(), transport).await
}

/// Connect to a provider over streamable HTTP.
///
/// Configured headers ride along on every request, including the handshake.
pub async fn connect_http(provider: &HttpProvider) -> Result<McpSession> {
    let client = http_client(&provider.headers).map_err(|reason| SkillError::TransportUnavailable {
        target: provider.url.clone(),
        reason,
    })?;

    let transport = StreamableHttpClientTransport::with_client(
        client,
        StreamableHttpClientTransportConfig::with_uri(provider.url.clone()),
    );

    McpSession::establish(provider.url.clone(), transport).await
}

fn http_client(headers: &BTreeMap<String, String>) -> std::result::Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .default_headers(header_map(headers)?)
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .read_timeout(HTTP_READ_TIMEOUT)
        .build()
        .map_err(|e| format!("failed to build HTTP client: {e}"))
}

fn header_map(headers: &BTreeMap<String, String>) -> std::result::Result<HeaderMap, String> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| format!("invalid header name '{name}': {e}"))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| format!("invalid value for header '{name}': {e}"))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
