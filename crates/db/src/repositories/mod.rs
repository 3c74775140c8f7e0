use async_trait::async_trait;
use thiserror::Error;

use ops_core::domain::message::{ConversationId, Message};
use ops_core::domain::order::CustomerOrder;
use ops_core::domain::product::{Product, ProductId};

pub mod memory;
pub mod message;
pub mod order;
pub mod product;

pub use memory::{InMemoryMessageRepository, InMemoryOrderRepository, InMemoryProductRepository};
pub use message::SqlMessageRepository;
pub use order::SqlOrderRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// First non-deleted order carrying `code`, joined with its owner.
    async fn find_by_code(&self, code: &str) -> Result<Option<CustomerOrder>, RepositoryError>;

    /// Non-deleted `Active` orders whose owner username matches the company name,
    /// ordered by code.
    async fn find_active_by_company(
        &self,
        company_name: &str,
    ) -> Result<Vec<CustomerOrder>, RepositoryError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Non-deleted messages of a conversation in `created_on` order.
    async fn list_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError>;
}
