use crate::file::manager::FileManager;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolRequest, ToolResult};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ReadFileTool {
    file_manager: FileManager,
}

impl ReadFileTool {
    pub fn new(file_manager: FileManager) -> Self {
        Self { file_manager }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read the contents of a file. The path is relative to the base directory; reads outside it are rejected."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file to read"
                }
            },
            "required": ["file_path"]
        })
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::ReadOnly
    }

    async fn validate(&self, request: &ToolRequest) -> Result<ToolResult> {
        let file_path = request
            .arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: file_path"))?;

        let content = self.file_manager.read_file(file_path).await?;
        Ok(ToolResult::context_only(json!({
            "path": file_path,
            "content": content,
        })))
    }
}
