//! Calculator MCP provider shared by the in-process, HTTP and stdio tests.

use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use serde_json::{json, Value};

/// Env variable echoed back by `launch_info` so tests can check what the
/// child inherited.
pub const MARKER_ENV: &str = "MCP_SKILL_TEST_MARKER";

/// A small calculator provider: `add`, `echo` and `snapshot`, plus
/// `launch_info` when running as a spawned process.
#[derive(Clone, Default)]
pub struct Calculator {
    report_launch: bool,
}

fn schema(value: Value) -> Arc<JsonObject> {
    Arc::new(value.as_object().cloned().unwrap_or_default())
}

impl Calculator {
    /// Calculator that also exposes how its process was launched.
    pub fn reporting_launch() -> Self {
        Self { report_launch: true }
    }

    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = vec![
            Tool::new(
                "add",
                "Add two integers",
                schema(json!({
                    "type": "object",
                    "properties": {
                        "a": {"type": "integer"},
                        "b": {"type": "integer"}
                    },
                    "required": ["a", "b"]
                })),
            ),
            Tool::new(
                "echo",
                "Echo the arguments back",
                schema(json!({"type": "object"})),
            ),
            Tool::new(
                "snapshot",
                "Return a caption and an image",
                schema(json!({"type": "object", "properties": {}})),
            ),
        ];
        if self.report_launch {
            tools.push(Tool::new(
                "launch_info",
                "Report the process arguments and environment",
                schema(json!({"type": "object", "properties": {}})),
            ));
        }
        tools
    }

    fn launch_info() -> Value {
        json!({
            "args": std::env::args().skip(1).collect::<Vec<_>>(),
            "marker": std::env::var(MARKER_ENV).ok(),
            "inherited_path": std::env::var_os("PATH").is_some(),
        })
    }
}

#[allow(clippy::manual_async_fn)]
impl ServerHandler for Calculator {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async {
            Ok(ListToolsResult {
                tools: self.tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = request.arguments.unwrap_or_default();
            match request.name.as_ref() {
                "add" => {
                    let a = arguments.get("a").and_then(Value::as_i64).unwrap_or(0);
                    let b = arguments.get("b").and_then(Value::as_i64).unwrap_or(0);
                    Ok(CallToolResult::success(vec![Content::text((a + b).to_string())]))
                }
                "echo" => Ok(CallToolResult::success(vec![Content::text(
                    Value::Object(arguments).to_string(),
                )])),
                "snapshot" => Ok(CallToolResult::success(vec![
                    Content::text("caption"),
                    Content::image("aGVsbG8=", "image/png"),
                ])),
                "launch_info" if self.report_launch => Ok(CallToolResult::success(vec![
                    Content::text(Self::launch_info().to_string()),
                ])),
                other => Err(McpError {
                    code: ErrorCode::METHOD_NOT_FOUND,
                    message: format!("Unknown tool: {other}").into(),
                    data: None,
                }),
            }
        }
    }
}
