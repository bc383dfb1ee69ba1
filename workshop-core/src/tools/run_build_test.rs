use crate::path::PathAuthority;
use crate::tools::r#trait::{ToolCategory, ToolExecutor, ToolRequest, ToolResult};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct RunBuildTestTool {
    authority: Arc<PathAuthority>,
}

impl RunBuildTestTool {
    pub fn new(authority: Arc<PathAuthority>) -> Self {
        Self { authority }
    }
}

#[async_trait::async_trait(?Send)]
impl ToolExecutor for RunBuildTestTool {
    fn name(&self) -> &'static str {
        "run_build_test"
    }

    fn description(&self) -> &'static str {
        "Run build, test, or execution commands (cargo build, npm test, python main.py) - NOT for file operations (no cat/ls/grep/find) or shell features (no pipes/redirects); use dedicated file tools instead."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute"
                },
                "working_directory": {
                    "type": "string",
                    "description": "The directory to run the command in, relative to the base directory."
                },
                "timeout_seconds": {
                    "type": "integer",
                    "description": "Maximum seconds to wait for command completion",
                    "minimum": 1,
                    "maximum": 300
                }
            },
            "required": ["command", "timeout_seconds", "working_directory"]
        })
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Execution
    }

    async fn validate(&self, request: &ToolRequest) -> Result<ToolResult> {
        let command_str = request
            .arguments
            .get("command")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing 'command' argument"))?;

        let timeout_seconds = request
            .arguments
            .get("timeout_seconds")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| anyhow!("Missing 'timeout_seconds' argument"))?;

        let working_directory = request
            .arguments
            .get("working_directory")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("Missing 'working_directory' argument"))?;
        let resolved_working_directory = self.authority.resolve(working_directory)?;

        if command_str.split_whitespace().next().is_none() {
            return Ok(ToolResult::Error("Empty command".to_string()));
        }

        Ok(ToolResult::RunCommand {
            command: command_str.to_string(),
            working_directory: resolved_working_directory,
            timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_working_directory_outside_base() {
        let temp = tempfile::tempdir().unwrap();
        let tool = RunBuildTestTool::new(Arc::new(PathAuthority::new(temp.path()).unwrap()));
        let request = ToolRequest::new(
            json!({
                "command": "cargo build",
                "working_directory": "../elsewhere",
                "timeout_seconds": 30,
            }),
            "id".to_string(),
        );
        assert!(tool.validate(&request).await.is_err());
    }

    #[tokio::test]
    async fn produces_run_command() {
        let temp = tempfile::tempdir().unwrap();
        let tool = RunBuildTestTool::new(Arc::new(PathAuthority::new(temp.path()).unwrap()));
        let request = ToolRequest::new(
            json!({
                "command": "cargo test",
                "working_directory": ".",
                "timeout_seconds": 60,
            }),
            "id".to_string(),
        );
        match tool.validate(&request).await.unwrap() {
            ToolResult::RunCommand {
                command,
                working_directory,
                timeout_seconds,
            } => {
                assert_eq!(command, "cargo test");
                assert_eq!(timeout_seconds, 60);
                assert!(working_directory.starts_with(temp.path().canonicalize().unwrap()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
