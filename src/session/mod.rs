pub mod transport;

use rmcp::model::CallToolRequestParams;
use rmcp::service::RunningService;
use rmcp::transport::IntoTransport;
use rmcp::RoleClient;

use crate::call::{CallRequest, CallResult};
use crate::catalog::Catalog;
use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{Result, SkillError};

/// One handshake-established connection to a provider.
///
/// A session serves exactly one operation. [`McpSession::close`] releases it
/// on the happy path; dropping it on an error path cancels the client service,
/// which also tears down a spawned child process.
pub struct McpSession {
    /// Command or URL the session was opened against
    target: String,
    client: RunningService<RoleClient, ()>,
}

impl McpSession {
    /// Open a session using the transport the config resolved to.
    pub async fn open(config: &ProviderConfig) -> Result<Self> {
        tracing::debug!(
            endpoint = %config.target(),
            transport = %config.transport(),
            "Opening MCP session"
        );
        match config.kind() {
            ProviderKind::Stdio(provider) => transport::connect_stdio(provider).await,
            ProviderKind::Http(provider) => transport::connect_http(provider).await,
        }
    }

    /// Run the initialize handshake over an already-built transport.
    pub async fn establish<T, E, A>(target: impl Into<String>, transport: T) -> Result<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let target = target.into();
        let client = rmcp::service::serve_client((), transport)
            .await
            .map_err(|e| SkillError::ConnectionFailed {
                target: target.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!(endpoint = %target, "MCP handshake complete");
        Ok(Self { target, client })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// List every tool the provider exposes, following pagination.
    pub async fn list_tools(&self) -> Result<Catalog> {
        let tools = self
            .client
            .peer()
            .list_all_tools()
            .await
            .map_err(|e| SkillError::ConnectionFailed {
                target: self.target.clone(),
                reason: format!("tools/list failed: {e}"),
            })?;
        Ok(Catalog::from_tools(&tools))
    }

    /// Forward one call. Arguments are passed through unvalidated.
    pub async fn call_tool(&self, request: &CallRequest) -> Result<CallResult> {
        let params = CallToolRequestParams {
            name: request.tool.clone().into(),
            arguments: Some(request.arguments.clone()),
            meta: None,
            task: None,
        };

        let result = self
            .client
            .peer()
            .call_tool(params)
            .await
            .map_err(|e| SkillError::ToolCall {
                tool: request.tool.clone(),
                reason: e.to_string(),
            })?;

        CallResult::try_from(result)
    }

    /// Shut the session down and wait for the client service to finish.
    pub async fn close(self) {
        match self.client.cancel().await {
            Ok(reason) => {
                tracing::debug!(endpoint = %self.target, reason = ?reason, "MCP session closed")
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.target, error = %e, "MCP session did not shut down cleanly")
            }
        }
    }
}
