use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the single tool reported when introspection fails.
pub const PLACEHOLDER_TOOL_NAME: &str = "example_tool";

const PLACEHOLDER_DESCRIPTION: &str =
    "Mock tool (could not connect to server at introspection time)";

/// The definition of a tool as a provider listed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

impl From<&rmcp::model::Tool> for ToolDescriptor {
    fn from(tool: &rmcp::model::Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.as_deref().map(str::to_owned),
            input_schema: Value::Object((*tool.input_schema).clone()),
        }
    }
}

/// The `{name, description}` pair printed by `--list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSummary<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// A provider's tools in listing order. Names are trusted to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
}

impl Catalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    pub fn from_tools(tools: &[rmcp::model::Tool]) -> Self {
        Self::new(tools.iter().map(ToolDescriptor::from).collect())
    }

    /// Stand-in catalog used when the provider could not be introspected.
    pub fn placeholder() -> Self {
        Self::new(vec![ToolDescriptor {
            name: PLACEHOLDER_TOOL_NAME.to_string(),
            description: Some(PLACEHOLDER_DESCRIPTION.to_string()),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "param1": {"type": "string", "description": "First parameter"}
                },
                "required": ["param1"]
            }),
        }])
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// First tool whose name matches exactly.
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn summaries(&self) -> Vec<ToolSummary<'_>> {
        self.tools
            .iter()
            .map(|t| ToolSummary {
                name: &t.name,
                description: t.description.as_deref(),
            })
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolDescriptor> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
