use crate::file::manager::FileManager;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolRequest, ToolResult};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct WriteFileTool {
    file_manager: FileManager,
}

impl WriteFileTool {
    pub fn new(file_manager: FileManager) -> Self {
        Self { file_manager }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Write content to a file, creating it and any missing parent directories. Overwrites existing content."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "Full content to write to the file"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Modification
    }

    async fn validate(&self, request: &ToolRequest) -> Result<ToolResult> {
        let file_path = request
            .arguments
            .get("file_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: file_path"))?;

        let content = request
            .arguments
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: content"))?;

        self.file_manager.write_file(file_path, content).await?;
        Ok(ToolResult::context_only(json!({
            "path": file_path,
            "bytes_written": content.len(),
        })))
    }
}
