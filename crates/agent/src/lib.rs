//! Agent runtime for the operations assistant.
//!
//! Staff questions are answered by an external language-model orchestrator that
//! may only read data through three tools:
//! - `lookup_order` - one order by short code
//! - `find_active_orders` - active rentals for a company
//! - `get_order_sentiment` - customer sentiment on an order's conversation
//!
//! # Architecture
//!
//! 1. **Dependencies** (`deps`) - repositories and a request logger, built per request
//! 2. **Operations** (`facade`) - the lookups themselves, returning structured views
//! 3. **Tools** (`tools`) - named wrappers that parse arguments and render text
//! 4. **Boundary** (`boundary`) - turns every tool failure into user-safe text
//! 5. **Runtime** (`runtime`, `llm`) - drives the orchestrator and validates its envelope
//!
//! The orchestrator never writes. It can only read orders, products, and messages.
//!
//! No language-model client ships with this workspace. `Orchestrator` is the seam
//! one plugs into, and `AgentRuntime` drives it. The server and CLI binaries skip
//! the runtime and call tools directly through [`invoke_guarded`].

pub mod boundary;
pub mod deps;
pub mod error;
pub mod facade;
pub mod llm;
pub mod logger;
pub mod runtime;
pub mod tools;

#[cfg(test)]
mod test_support;

pub use boundary::invoke_guarded;
pub use deps::ToolDeps;
pub use error::ToolError;
pub use llm::{Orchestrator, OrchestratorOutput};
pub use logger::{RequestLogger, TokenUsage};
pub use runtime::{AgentReply, AgentRuntime, RuntimeError, ToolSession};
pub use tools::{Tool, ToolRegistry};
