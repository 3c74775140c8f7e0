use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use ops_core::domain::message::{ConversationId, Message};
use ops_core::domain::order::{CustomerOrder, Order};
use ops_core::domain::product::{Product, ProductId};
use ops_core::domain::user::{username_matches_company, User};

use super::{MessageRepository, OrderRepository, ProductRepository, RepositoryError};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        products.insert(product.id.0.clone(), product);
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.get(&id.0).cloned())
    }
}

/// Orders keyed by id so lookups by code resolve to the lowest id, as the SQL
/// repository does.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<BTreeMap<String, Order>>,
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryOrderRepository {
    pub async fn insert_order(&self, order: Order) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.0.clone(), order);
    }

    pub async fn insert_user(&self, user: User) {
        let mut users = self.users.write().await;
        users.insert(user.id.0.clone(), user);
    }
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<CustomerOrder>, RepositoryError> {
        let orders = self.orders.read().await;
        let users = self.users.read().await;

        Ok(orders.values().find(|order| !order.is_deleted && order.code == code).map(|order| {
            CustomerOrder {
                order: order.clone(),
                username: users.get(&order.user_id.0).map(|user| user.username.clone()),
            }
        }))
    }

    async fn find_active_by_company(
        &self,
        company_name: &str,
    ) -> Result<Vec<CustomerOrder>, RepositoryError> {
        let orders = self.orders.read().await;
        let users = self.users.read().await;

        let mut matches: Vec<CustomerOrder> = orders
            .values()
            .filter(|order| !order.is_deleted && order.is_active())
            .filter_map(|order| {
                let user = users.get(&order.user_id.0)?;
                username_matches_company(&user.username, company_name).then(|| CustomerOrder {
                    order: order.clone(),
                    username: Some(user.username.clone()),
                })
            })
            .collect();
        matches.sort_by(|left, right| {
            (&left.order.code, &left.order.id.0).cmp(&(&right.order.code, &right.order.id.0))
        });
        Ok(matches)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<HashMap<String, Message>>,
}

impl InMemoryMessageRepository {
    pub async fn insert(&self, message: Message) {
        let mut messages = self.messages.write().await;
        messages.insert(message.id.0.clone(), message);
    }
}

#[async_trait::async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn list_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.read().await;
        let mut thread: Vec<Message> = messages
            .values()
            .filter(|message| !message.is_deleted && &message.conversation_id == conversation_id)
            .cloned()
            .collect();
        thread.sort_by(|left, right| {
            (&left.created_on, &left.id.0).cmp(&(&right.created_on, &right.id.0))
        });
        Ok(thread)
    }
}
