use std::sync::Arc;

use ops_db::repositories::{
    MessageRepository, OrderRepository, ProductRepository, SqlMessageRepository,
    SqlOrderRepository, SqlProductRepository,
};
use ops_db::DbPool;

use crate::logger::RequestLogger;

/// Everything a tool may touch while serving one request. Built per request
/// and dropped when the request ends.
#[derive(Clone)]
pub struct ToolDeps {
    pub orders: Arc<dyn OrderRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub logger: RequestLogger,
}

impl ToolDeps {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        messages: Arc<dyn MessageRepository>,
        products: Arc<dyn ProductRepository>,
        logger: RequestLogger,
    ) -> Self {
        Self { orders, messages, products, logger }
    }

    pub fn sql(pool: DbPool, logger: RequestLogger) -> Self {
        Self {
            orders: Arc::new(SqlOrderRepository::new(pool.clone())),
            messages: Arc::new(SqlMessageRepository::new(pool.clone())),
            products: Arc::new(SqlProductRepository::new(pool)),
            logger,
        }
    }

    pub fn request_id(&self) -> &str {
        self.logger.request_id()
    }
}
