//! Line-oriented JSON transport over stdio.
//!
//! One request per input line, one response per output line. A malformed
//! line produces an error response and the loop keeps serving; only closed
//! input ends the session.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use workshop_core::tools::r#trait::{ToolRequest, ToolResult};
use workshop_core::{cmd, report, Settings, ToolRegistry};

#[derive(Debug, Deserialize)]
struct WireRequest {
    id: String,
    tool: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct WireResponse {
    id: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl WireResponse {
    fn success(id: String, result: serde_json::Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: String, error: String) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error),
        }
    }
}

pub async fn run(registry: ToolRegistry, settings: Settings) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&registry, &settings, &line).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

async fn handle_line(registry: &ToolRegistry, settings: &Settings, line: &str) -> WireResponse {
    let request: WireRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            return WireResponse::failure(String::new(), format!("Malformed request: {e}"));
        }
    };

    if request.tool == "list_tools" {
        return WireResponse::success(request.id, json!(registry.get_tool_definitions()));
    }

    let tool_request = ToolRequest::new(request.arguments, request.id.clone());
    match registry.dispatch(&request.tool, &tool_request).await {
        ToolResult::Success { context_data } => WireResponse::success(request.id, context_data),
        ToolResult::Error(message) => WireResponse::failure(request.id, message),
        ToolResult::RunCommand {
            command,
            working_directory,
            timeout_seconds,
        } => {
            let timeout =
                Duration::from_secs(timeout_seconds.min(settings.command_timeout_seconds));
            match cmd::run_cmd(working_directory, command.clone(), timeout).await {
                Ok(result) => {
                    let report = report::from_result(&command, &result);
                    WireResponse::success(request.id, json!(report))
                }
                Err(e) => WireResponse::failure(request.id, format!("{e:?}")),
            }
        }
    }
}
