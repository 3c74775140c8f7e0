use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use ops_core::envelope::{AgentResponse, ChatResponseEnvelope, EnvelopeError};

use crate::boundary::invoke_guarded;
use crate::deps::ToolDeps;
use crate::llm::Orchestrator;
use crate::logger::RequestSummary;
use crate::tools::ToolRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCallRecord {
    pub tool: String,
    pub status: String,
}

/// Tool access for one orchestrator run. Every call goes through the guarded
/// boundary and is recorded in order.
pub struct ToolSession<'a> {
    registry: &'a ToolRegistry,
    deps: &'a ToolDeps,
    calls: Vec<ToolCallRecord>,
}

impl<'a> ToolSession<'a> {
    pub fn new(registry: &'a ToolRegistry, deps: &'a ToolDeps) -> Self {
        Self { registry, deps, calls: Vec::new() }
    }

    pub async fn call(&mut self, name: &str, arguments: Value) -> String {
        let status = self.registry.status_message(name, &arguments);
        debug!(
            event_name = "agent.tool.call",
            correlation_id = %self.deps.request_id(),
            tool = name,
            status = %status,
            "tool call started"
        );
        self.calls.push(ToolCallRecord { tool: name.to_string(), status });
        invoke_guarded(self.registry, self.deps, name, arguments).await
    }

    pub fn tools_called(&self) -> Vec<String> {
        self.calls.iter().map(|call| call.tool.clone()).collect()
    }

    fn into_calls(self) -> Vec<ToolCallRecord> {
        self.calls
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("orchestrator failed: {0}")]
    Orchestrator(anyhow::Error),
    #[error("orchestrator returned an invalid response: {0}")]
    Envelope(#[from] EnvelopeError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AgentReply {
    pub envelope: ChatResponseEnvelope,
    pub tool_calls: Vec<ToolCallRecord>,
}

pub struct AgentRuntime {
    registry: ToolRegistry,
    orchestrator: Arc<dyn Orchestrator>,
}

impl AgentRuntime {
    pub fn new(orchestrator: Arc<dyn Orchestrator>) -> Self {
        Self { registry: ToolRegistry::with_default_tools(), orchestrator }
    }

    /// Runs one query end to end and validates the orchestrator's envelope.
    pub async fn handle_query(
        &self,
        deps: &ToolDeps,
        query: &str,
    ) -> Result<AgentReply, RuntimeError> {
        let started = Instant::now();
        let mut session = ToolSession::new(&self.registry, deps);

        let outcome = self.orchestrator.run(query, &mut session).await;
        let tools_called = session.tools_called();
        let output = match outcome {
            Ok(output) => output,
            Err(failure) => {
                error!(
                    event_name = "agent.request.failed",
                    correlation_id = %deps.request_id(),
                    request_id = deps.logger.short_id(),
                    query = ?query,
                    tools = %tools_called.join(", "),
                    error = %failure,
                    "orchestrator run failed"
                );
                return Err(RuntimeError::Orchestrator(failure));
            }
        };

        let response = AgentResponse::from_json(&output.raw)?;
        let model = self.orchestrator.model_name().to_string();
        deps.logger.log_request(&RequestSummary {
            query,
            model: &model,
            usage: output.usage,
            tools_called: &tools_called,
            duration_ms: started.elapsed().as_millis(),
        });

        Ok(AgentReply {
            envelope: ChatResponseEnvelope {
                data: response,
                request_id: deps.request_id().to_string(),
                model,
            },
            tool_calls: session.into_calls(),
        })
    }
}
