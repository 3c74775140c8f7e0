use anyhow::Result;
use async_trait::async_trait;

use crate::logger::TokenUsage;
use crate::runtime::ToolSession;

/// What the orchestrator hands back: the raw response envelope text plus token
/// accounting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrchestratorOutput {
    pub raw: String,
    pub usage: TokenUsage,
}

/// The language-model driver. It decides which tools to call, calls them
/// through the session, and produces the response envelope as JSON.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    fn model_name(&self) -> &str;

    async fn run(&self, query: &str, tools: &mut ToolSession<'_>) -> Result<OrchestratorOutput>;
}
