pub mod config;
pub mod domain;
pub mod envelope;
pub mod errors;
pub mod sentiment;

pub use domain::message::{ConversationId, Message, MessageId};
pub use domain::order::{CustomerOrder, Order, OrderId};
pub use domain::product::{Product, ProductId};
pub use domain::user::{User, UserId};
pub use envelope::{
    AgentResponse, ChatResponseEnvelope, EnvelopeError, OrderInfo, OrderSummaryInfo,
    SentimentInfo,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use sentiment::{aggregate, SentimentBreakdown, SentimentLabel, SentimentSummary};
