use crate::tools::r#trait::{SharedTool, ToolCategory, ToolRequest, ToolResult};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Tool metadata advertised to the calling client.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub category: ToolCategory,
    pub input_schema: serde_json::Value,
}

/// Name-keyed tool dispatch.
///
/// Every call and every failure is logged here with the tool name as a
/// structured field; instrumenting the single dispatch point covers the
/// whole tool surface without per-tool logging code.
pub struct ToolRegistry {
    tools: BTreeMap<String, SharedTool>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<SharedTool>) -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
        };

        for tool in tools {
            registry.register_tool(tool);
        }

        registry
    }

    pub fn register_tool(&mut self, tool: SharedTool) {
        let name = tool.name().to_string();
        debug!(tool_name = %name, "Registering tool");
        self.tools.insert(name, tool);
    }

    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                category: tool.category(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub async fn dispatch(&self, tool_name: &str, request: &ToolRequest) -> ToolResult {
        let Some(tool) = self.tools.get(tool_name) else {
            let available = self.list_tools().join(", ");
            error!(tool_name = %tool_name, "Unknown tool");
            return ToolResult::Error(format!(
                "Unknown tool: {tool_name}. Available tools: {available}"
            ));
        };

        debug!(
            tool_name = %tool_name,
            tool_use_id = %request.tool_use_id,
            "Dispatching tool call"
        );

        match tool.validate(request).await {
            Ok(result) => result,
            Err(e) => {
                error!(?e, tool_name = %tool_name, "Tool call failed");
                ToolResult::Error(format!("Error: {e:?}"))
            }
        }
    }

    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }
}
