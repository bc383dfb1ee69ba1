use crate::file::manager::FileManager;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolRequest, ToolResult};
use anyhow::Result;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct ListFilesTool {
    file_manager: FileManager,
    max_entries: usize,
}

impl ListFilesTool {
    pub fn new(file_manager: FileManager, max_entries: usize) -> Self {
        Self {
            file_manager,
            max_entries,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "List the entries of a directory, relative to the base directory. Entries matched by ignore rules are not shown."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "directory_path": {
                    "type": "string",
                    "description": "Directory to list; defaults to the base directory"
                }
            }
        })
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::ReadOnly
    }

    async fn validate(&self, request: &ToolRequest) -> Result<ToolResult> {
        let directory_path = request
            .arguments
            .get("directory_path")
            .and_then(|v| v.as_str())
            .unwrap_or(".");

        let mut paths = self.file_manager.list_directory(directory_path).await?;

        let truncated = paths.len() > self.max_entries;
        if truncated {
            paths.truncate(self.max_entries);
        }

        let entries: Vec<Value> = paths
            .iter()
            .map(|path| {
                json!({
                    "name": path.file_name().unwrap_or_default().to_string_lossy(),
                    "path": path.to_string_lossy(),
                })
            })
            .collect();

        Ok(ToolResult::context_only(json!({
            "directory": directory_path,
            "entries": entries,
            "truncated": truncated,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathAuthority;
    use std::sync::Arc;

    #[tokio::test]
    async fn lists_and_truncates() {
        let temp = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(temp.path().join(format!("f{i}.txt")), "").unwrap();
        }

        let manager = FileManager::new(Arc::new(PathAuthority::new(temp.path()).unwrap()));
        let tool = ListFilesTool::new(manager, 3);
        let request = ToolRequest::new(json!({}), "id".to_string());

        match tool.validate(&request).await.unwrap() {
            ToolResult::Success { context_data } => {
                assert_eq!(context_data["entries"].as_array().unwrap().len(), 3);
                assert_eq!(context_data["truncated"], json!(true));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
