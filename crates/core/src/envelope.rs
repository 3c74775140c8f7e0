//! The response contract between the orchestrator and the callers of the agent.
//!
//! Every response carries all four top-level keys. Keys that do not apply to the
//! query are `null`, never omitted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::sentiment::{SentimentBreakdown, SentimentLabel};

const ENVELOPE_KEYS: [&str; 4] = ["message", "orders", "order_summaries", "sentiment"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderInfo {
    pub code: String,
    pub status: String,
    pub customer: String,
    pub product_name: String,
    pub included_tonnage: Option<f64>,
    pub access_details: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderSummaryInfo {
    pub code: String,
    pub status: String,
    pub customer: String,
    pub access_details: String,
    pub product_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentInfo {
    pub order_code: String,
    pub overall_sentiment: SentimentLabel,
    pub message_count: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub flagged_messages: Vec<String>,
}

impl SentimentInfo {
    pub fn from_breakdown(order_code: impl Into<String>, breakdown: &SentimentBreakdown) -> Self {
        Self {
            order_code: order_code.into(),
            overall_sentiment: breakdown.overall,
            message_count: breakdown.total,
            positive: breakdown.positive,
            neutral: breakdown.neutral,
            negative: breakdown.negative,
            flagged_messages: breakdown.flagged.clone(),
        }
    }
}

/// Validated output of one agent run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentResponse {
    pub message: String,
    pub orders: Option<Vec<OrderInfo>>,
    pub order_summaries: Option<Vec<OrderSummaryInfo>>,
    pub sentiment: Option<SentimentInfo>,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response must be a JSON object")]
    NotAnObject,
    #[error("response is missing required key `{0}` (use null for unused fields)")]
    MissingKey(&'static str),
    #[error("response message must not be empty")]
    EmptyMessage,
}

impl AgentResponse {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self { message: message.into(), orders: None, order_summaries: None, sentiment: None }
    }

    /// Parses and validates raw orchestrator output.
    pub fn from_json(raw: &str) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_str(raw.trim())?;
        let object = value.as_object().ok_or(EnvelopeError::NotAnObject)?;
        if let Some(missing) = ENVELOPE_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(EnvelopeError::MissingKey(*missing));
        }

        let response: Self = serde_json::from_value(value)?;
        response.validate()?;
        Ok(response)
    }

    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if self.message.trim().is_empty() {
            return Err(EnvelopeError::EmptyMessage);
        }
        Ok(())
    }
}

/// What the chat surface hands back for one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponseEnvelope {
    pub data: AgentResponse,
    pub request_id: String,
    pub model: String,
}
