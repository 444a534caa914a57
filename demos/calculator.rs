//! Calculator MCP provider served over stdio.
//!
//! Point a stdio provider entry at this binary to try `mcp-skill` end to
//! end; the integration tests spawn it the same way.

#[path = "../tests/common/calculator.rs"]
mod calculator;

use anyhow::Result;
use rmcp::ServiceExt;

use calculator::Calculator;

#[tokio::main]
async fn main() -> Result<()> {
    let service = Calculator::reporting_launch()
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;
    Ok(())
}
