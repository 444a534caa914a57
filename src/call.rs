use std::str::FromStr;

use rmcp::model::{CallToolResult, Content, RawContent};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Result, SkillError};

/// One tool invocation as supplied through `--call`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallRequest {
    pub tool: String,
    /// Absent or `null` arguments mean an empty object.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arguments: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FromStr for CallRequest {
    type Err = SkillError;

    fn from_str(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| SkillError::InvalidCall(e.to_string()))
    }
}

/// A single content item of a call result, normalized for printing.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Text(String),
    /// Any non-text item, kept in its full wire form.
    Structured(Value),
}

impl ContentItem {
    pub fn from_content(content: &Content) -> Result<Self> {
        match &content.raw {
            RawContent::Text(text) => Ok(ContentItem::Text(text.text.clone())),
            _ => Ok(ContentItem::Structured(serde_json::to_value(content)?)),
        }
    }

    /// Text as-is; structured items as pretty JSON.
    pub fn render(&self) -> Result<String> {
        match self {
            ContentItem::Text(text) => Ok(text.clone()),
            ContentItem::Structured(value) => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// Ordered content items returned by one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub items: Vec<ContentItem>,
    /// The provider flagged the result as a tool-level error.
    pub is_error: bool,
}

impl TryFrom<CallToolResult> for CallResult {
    type Error = SkillError;

    fn try_from(result: CallToolResult) -> Result<Self> {
        let items = result
            .content
            .iter()
            .map(ContentItem::from_content)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            items,
            is_error: result.is_error.unwrap_or(false),
        })
    }
}
