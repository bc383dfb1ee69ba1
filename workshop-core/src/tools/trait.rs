use anyhow::Result;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Request passed to tool execution
#[derive(Debug, Clone)]
pub struct ToolRequest {
    /// The arguments for the tool
    pub arguments: Value,
    /// The unique ID for this tool use
    pub tool_use_id: String,
    // Future fields can be added here without breaking compatibility
}

impl ToolRequest {
    /// Create a new tool request
    pub fn new(arguments: Value, tool_use_id: String) -> Self {
        Self {
            arguments,
            tool_use_id,
        }
    }
}

/// Result from tool execution
#[derive(Debug)]
pub enum ToolResult {
    /// Standard success with a JSON payload for the client
    Success { context_data: Value },
    /// Error result
    Error(String),
    /// Command execution details for the server loop to run
    RunCommand {
        command: String,
        working_directory: PathBuf,
        timeout_seconds: u64,
    },
}

impl ToolResult {
    /// Create a result with only context data
    pub fn context_only(data: Value) -> Self {
        Self::Success { context_data: data }
    }
}

/// Broad class of a tool, advertised to clients alongside the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    ReadOnly,
    Modification,
    Execution,
}

#[async_trait::async_trait(?Send)]
pub trait ToolExecutor {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
    fn category(&self) -> ToolCategory;

    async fn validate(&self, request: &ToolRequest) -> Result<ToolResult>;
}

pub type SharedTool = Arc<dyn ToolExecutor>;
