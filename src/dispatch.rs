use std::io::Write;
use std::path::Path;

use crate::call::CallRequest;
use crate::config::ProviderConfig;
use crate::error::{Result, SkillError};
use crate::session::McpSession;

/// What a single dispatcher invocation should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Print `{name, description}` for every tool.
    List,
    /// Print one tool's full descriptor.
    Describe(String),
    /// Forward a call and print its content items.
    Call(CallRequest),
}

/// Load the persisted config at `config_path`, open a fresh session and run
/// one operation, writing its output to `out`.
pub async fn dispatch<W: Write>(config_path: &Path, mode: &Mode, out: &mut W) -> Result<()> {
    let config = ProviderConfig::load(config_path)?;
    let session = McpSession::open(&config).await?;
    let outcome = run(&session, mode, out).await;
    session.close().await;
    outcome
}

/// Run one operation against an open session.
pub async fn run<W: Write>(session: &McpSession, mode: &Mode, out: &mut W) -> Result<()> {
    match mode {
        Mode::List => {
            let catalog = session.list_tools().await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&catalog.summaries())?)?;
        }
        Mode::Describe(name) => {
            let catalog = session.list_tools().await?;
            let tool = catalog
                .find(name)
                .ok_or_else(|| SkillError::ToolNotFound(name.clone()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(tool)?)?;
        }
        Mode::Call(request) => {
            tracing::info!(endpoint = %session.target(), tool = %request.tool, "Calling tool");
            let result = session.call_tool(request).await?;
            if result.is_error {
                tracing::warn!(tool = %request.tool, "Provider reported a tool error");
            }
            for item in &result.items {
                writeln!(out, "{}", item.render()?)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
