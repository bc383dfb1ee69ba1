use crate::file::manager::FileManager;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolRequest, ToolResult};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct DeleteFileTool {
    file_manager: FileManager,
}

impl DeleteFileTool {
    pub fn new(file_manager: FileManager) -> Self {
        Self { file_manager }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for DeleteFileTool {
    fn name(&self) -> &'static str {
        "delete_file"
    }

    fn description(&self) -> &'static str {
        "Delete a file or an empty directory inside the base directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the file or empty directory to delete"
                }
            },
            "required": ["file_path"]
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

        self.file_manager.delete_file(file_path).await?;
        Ok(ToolResult::context_only(json!({
            "path": file_path,
            "deleted": true,
        })))
    }
}
