//! The single error-translation wrapper every tool call goes through.

use serde_json::Value;

use crate::deps::ToolDeps;
use crate::error::ToolError;
use crate::tools::ToolRegistry;

pub const APOLOGY_PREFIX: &str = "Sorry, I encountered an error:";

/// Runs a tool and always returns text for the orchestrator.
///
/// A missing order becomes its plain not-found sentence. Any other failure is
/// logged once against the request id and replaced by an apology that names
/// only the failure category.
pub async fn invoke_guarded(
    registry: &ToolRegistry,
    deps: &ToolDeps,
    name: &str,
    arguments: Value,
) -> String {
    let result = match registry.get(name) {
        Some(tool) => tool.execute(deps, arguments).await,
        None => Err(ToolError::UnknownTool(name.to_string())),
    };

    match result {
        Ok(text) => text,
        Err(ToolError::Domain(error)) => error.to_string(),
        Err(error) => {
            deps.logger.log_tool_error(name, &error.to_string());
            let interface = error.into_interface(deps.request_id());
            format!("{APOLOGY_PREFIX} {}", interface.user_message())
        }
    }
}
