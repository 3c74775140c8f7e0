use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::deps::ToolDeps;
use crate::error::ToolError;
use crate::facade;

pub const LOOKUP_ORDER: &str = "lookup_order";
pub const FIND_ACTIVE_ORDERS: &str = "find_active_orders";
pub const GET_ORDER_SENTIMENT: &str = "get_order_sentiment";

/// A named lookup the orchestrator may call with one string argument.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Key of the single string argument, e.g. `order_code`.
    fn argument(&self) -> &'static str;
    /// Progress line shown while the tool runs.
    fn status_message(&self, value: &str) -> String;
    async fn execute(&self, deps: &ToolDeps, input: Value) -> Result<String, ToolError>;
}

/// Argument objects may arrive as JSON or as a string holding JSON.
fn arguments_object(input: &Value) -> Option<Map<String, Value>> {
    match input {
        Value::Object(map) => Some(map.clone()),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

fn argument_value(input: &Value, key: &str) -> Option<String> {
    arguments_object(input)?.get(key)?.as_str().map(str::to_string)
}

fn required_argument(tool: &dyn Tool, input: &Value) -> Result<String, ToolError> {
    let value = argument_value(input, tool.argument()).ok_or_else(|| {
        ToolError::invalid_arguments(
            tool.name(),
            format!("expected a string `{}` argument", tool.argument()),
        )
    })?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ToolError::invalid_arguments(
            tool.name(),
            format!("`{}` must not be empty", tool.argument()),
        ));
    }
    Ok(value.to_string())
}

pub struct LookupOrderTool;

#[async_trait]
impl Tool for LookupOrderTool {
    fn name(&self) -> &'static str {
        LOOKUP_ORDER
    }

    fn description(&self) -> &'static str {
        "Look up an order by short code (e.g., ORD-1234). Returns status, access details, \
         product info, and customer."
    }

    fn argument(&self) -> &'static str {
        "order_code"
    }

    fn status_message(&self, value: &str) -> String {
        format!("Looking up order {value}...")
    }

    async fn execute(&self, deps: &ToolDeps, input: Value) -> Result<String, ToolError> {
        let order_code = required_argument(self, &input)?;
        let order = facade::lookup_order(deps, &order_code).await?;
        Ok(facade::render_order(&order))
    }
}

pub struct FindActiveOrdersTool;

#[async_trait]
impl Tool for FindActiveOrdersTool {
    fn name(&self) -> &'static str {
        FIND_ACTIVE_ORDERS
    }

    fn description(&self) -> &'static str {
        "Find all active orders for a company (e.g., 'Chase Construction')."
    }

    fn argument(&self) -> &'static str {
        "company_name"
    }

    fn status_message(&self, value: &str) -> String {
        format!("Searching active orders for {value}...")
    }

    async fn execute(&self, deps: &ToolDeps, input: Value) -> Result<String, ToolError> {
        let company_name = required_argument(self, &input)?;
        let summaries = facade::find_active_orders(deps, &company_name).await?;
        Ok(facade::render_order_summaries(&company_name, &summaries))
    }
}

pub struct OrderSentimentTool;

#[async_trait]
impl Tool for OrderSentimentTool {
    fn name(&self) -> &'static str {
        GET_ORDER_SENTIMENT
    }

    fn description(&self) -> &'static str {
        "Analyze customer sentiment for messages on an order. Returns sentiment breakdown and \
         flagged negative messages."
    }

    fn argument(&self) -> &'static str {
        "order_code"
    }

    fn status_message(&self, value: &str) -> String {
        format!("Analyzing sentiment for {value}...")
    }

    async fn execute(&self, deps: &ToolDeps, input: Value) -> Result<String, ToolError> {
        let order_code = required_argument(self, &input)?;
        let sentiment = facade::order_sentiment(deps, &order_code).await?;
        Ok(facade::render_sentiment(&sentiment))
    }
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn with_default_tools() -> Self {
        let mut registry = Self::default();
        registry.register(LookupOrderTool);
        registry.register(FindActiveOrdersTool);
        registry.register(OrderSentimentTool);
        registry
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Progress line for a pending call, falling back to `Running <tool>...`
    /// when the tool is unknown or its argument cannot be read.
    pub fn status_message(&self, name: &str, arguments: &Value) -> String {
        self.get(name)
            .and_then(|tool| {
                argument_value(arguments, tool.argument()).map(|value| tool.status_message(&value))
            })
            .unwrap_or_else(|| format!("Running {name}..."))
    }
}
