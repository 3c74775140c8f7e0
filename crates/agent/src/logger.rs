use tracing::{error, info};
use uuid::Uuid;

/// Token counts reported by the orchestrator for one request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Clone, Debug)]
pub struct RequestSummary<'a> {
    pub query: &'a str,
    pub model: &'a str,
    pub usage: TokenUsage,
    pub tools_called: &'a [String],
    pub duration_ms: u128,
}

/// Structured log sink bound to one request id.
#[derive(Clone, Debug)]
pub struct RequestLogger {
    request_id: String,
}

impl RequestLogger {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self { request_id: request_id.into() }
    }

    pub fn for_new_request() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// First eight characters of the request id, as written to logs.
    pub fn short_id(&self) -> &str {
        match self.request_id.char_indices().nth(8) {
            Some((end, _)) => &self.request_id[..end],
            None => &self.request_id,
        }
    }

    pub fn log_request(&self, summary: &RequestSummary<'_>) {
        info!(
            event_name = "agent.request.completed",
            correlation_id = %self.request_id,
            request_id = self.short_id(),
            query = ?summary.query,
            model = summary.model,
            tokens = summary.usage.total(),
            tools = %summary.tools_called.join(", "),
            duration_ms = summary.duration_ms as u64,
            "agent request completed"
        );
    }

    pub fn log_tool_error(&self, tool: &str, error: &str) {
        error!(
            event_name = "agent.tool.error",
            correlation_id = %self.request_id,
            request_id = self.short_id(),
            tool,
            error,
            "tool invocation failed"
        );
    }
}
