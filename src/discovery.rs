use crate::catalog::Catalog;
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::session::McpSession;

/// Open a session, handshake, and list the provider's tools in order.
///
/// One attempt, no retries. The session is released before returning on
/// every path.
pub async fn try_discover(config: &ProviderConfig) -> Result<Catalog> {
    let session = McpSession::open(config).await?;
    let listed = session.list_tools().await;
    session.close().await;

    let catalog = listed?;
    tracing::info!(
        endpoint = %config.target(),
        transport = %config.transport(),
        tools = catalog.len(),
        "Found {} tools via {}",
        catalog.len(),
        config.transport()
    );
    Ok(catalog)
}

/// Discover a provider's catalog, degrading to the placeholder on failure.
///
/// Generation is a one-shot offline step, so a provider that is down or
/// misbehaving still yields a usable package.
pub async fn discover(config: &ProviderConfig) -> Catalog {
    match try_discover(config).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(
                endpoint = %config.target(),
                transport = %config.transport(),
                error = %e,
                "Could not introspect MCP server, using placeholder tool"
            );
            Catalog::placeholder()
        }
    }
}
