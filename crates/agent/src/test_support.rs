use std::sync::Arc;

use async_trait::async_trait;

use ops_core::domain::message::{ConversationId, Message, MessageId};
use ops_core::domain::order::{CustomerOrder, Order, OrderId};
use ops_core::domain::product::{Product, ProductId};
use ops_core::domain::user::{User, UserId};
use ops_db::repositories::{
    InMemoryMessageRepository, InMemoryOrderRepository, InMemoryProductRepository,
    OrderRepository, RepositoryError,
};

use crate::deps::ToolDeps;
use crate::logger::RequestLogger;

fn user(id: &str, username: &str) -> User {
    User {
        id: UserId(id.to_string()),
        email: format!("{id}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        username: username.to_string(),
        is_active: true,
    }
}

fn product(id: &str, name: &str, tonnage: f64) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        main_product_code: String::new(),
        description: String::new(),
        included_tonnage_quantity: tonnage,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    user_id: &str,
    code: &str,
    dates: (&str, &str),
    status: &str,
    product_id: Option<&str>,
    access_details: &str,
    is_deleted: bool,
) -> Order {
    Order {
        id: OrderId(id.to_string()),
        user_id: UserId(user_id.to_string()),
        conversation_id: ConversationId(format!("conv-{}", code.trim_start_matches("ORD-"))),
        code: code.to_string(),
        start_date: dates.0.to_string(),
        end_date: dates.1.to_string(),
        status: status.to_string(),
        waste_type_id: product_id.map(|id| ProductId(id.to_string())),
        access_details: access_details.to_string(),
        is_deleted,
    }
}

fn message(id: &str, conversation: &str, body: &str, label: &str, created_on: &str) -> Message {
    Message {
        id: MessageId(id.to_string()),
        conversation_id: ConversationId(conversation.to_string()),
        user_id: UserId("u-003".to_string()),
        message: body.to_string(),
        sentiment_label: label.to_string(),
        created_on: created_on.to_string(),
        is_deleted: false,
    }
}

/// In-memory copy of the `data/` snapshot plus one orphaned order (`ORD-4040`)
/// whose owner and product were never loaded.
pub(crate) async fn fixture_deps() -> ToolDeps {
    fixture_deps_with_logger(RequestLogger::new("test-request-0001")).await
}

pub(crate) async fn fixture_deps_with_logger(logger: RequestLogger) -> ToolDeps {
    let products = InMemoryProductRepository::default();
    products.insert(product("p-ro30", "30 Yard Dumpster", 4.0)).await;
    products.insert(product("p-ro20", "20 Yard Dumpster", 3.0)).await;
    products.insert(product("p-tf10", "Temporary Fence Panel", 0.0)).await;

    let orders = InMemoryOrderRepository::default();
    orders.insert_user(user("u-001", "Omaha_Builders")).await;
    orders.insert_user(user("u-002", "Chase_Construction")).await;
    orders.insert_user(user("u-003", "Riverbend_Landscaping")).await;
    for entry in [
        order(
            "o-001",
            "u-001",
            "ORD-5353",
            ("2025-12-31", "2026-01-07"),
            "Completed",
            Some("p-ro30"),
            "Front driveway",
            false,
        ),
        order(
            "o-002",
            "u-002",
            "ORD-1592",
            ("2026-01-05", "2026-01-19"),
            "Active",
            Some("p-ro20"),
            "Gate code 4321",
            false,
        ),
        order(
            "o-003",
            "u-002",
            "ORD-1688",
            ("2026-01-10", "2026-02-10"),
            "Active",
            Some("p-tf10"),
            "",
            false,
        ),
        order(
            "o-004",
            "u-003",
            "ORD-9910",
            ("2026-01-02", "2026-01-16"),
            "Active",
            Some("p-ro30"),
            "Alley behind the shop",
            false,
        ),
        order(
            "o-005",
            "u-003",
            "ORD-2044",
            ("2026-01-12", "2026-01-26"),
            "Active",
            None,
            "Side yard",
            false,
        ),
        order(
            "o-006",
            "u-002",
            "ORD-1301",
            ("2025-11-01", "2025-11-15"),
            "Active",
            Some("p-pt1"),
            "",
            true,
        ),
        order(
            "o-008",
            "u-missing",
            "ORD-4040",
            ("2026-02-01", "2026-02-08"),
            "Active",
            Some("p-missing"),
            "",
            false,
        ),
    ] {
        orders.insert_order(entry).await;
    }

    let messages = InMemoryMessageRepository::default();
    for (id, body, label, created_on) in [
        ("m-101", "Thanks for the quick drop-off", "positive", "2026-01-02T07:45:00"),
        ("m-102", "What time is the swap scheduled?", "neutral", "2026-01-04T09:30:00"),
        ("m-103", "The pickup was late again", "negative", "2026-01-06T16:10:00"),
        ("m-104", "Please confirm the new date", "neutral", "2026-01-07T08:00:00"),
        ("m-105", "Still waiting on the replacement", "negative", "2026-01-09T11:20:00"),
        ("m-106", "Driver was friendly, appreciate it", "positive", "2026-01-10T14:05:00"),
        ("m-107", "This is unacceptable service", "negative", "2026-01-12T09:45:00"),
        ("m-108", "Okay noted", "neutral", "2026-01-13T10:00:00"),
    ] {
        messages.insert(message(id, "conv-9910", body, label, created_on)).await;
    }
    messages
        .insert(message(
            "m-201",
            "conv-2044",
            "Is the side gate wide enough?",
            "neutral",
            "2026-01-12T07:00:00",
        ))
        .await;

    ToolDeps::new(Arc::new(orders), Arc::new(messages), Arc::new(products), logger)
}

/// Order repository whose every call fails like a dropped connection.
pub(crate) struct UnavailableOrderRepository;

#[async_trait]
impl OrderRepository for UnavailableOrderRepository {
    async fn find_by_code(&self, _code: &str) -> Result<Option<CustomerOrder>, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_active_by_company(
        &self,
        _company_name: &str,
    ) -> Result<Vec<CustomerOrder>, RepositoryError> {
        Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
    }
}

pub(crate) async fn unavailable_deps() -> ToolDeps {
    let healthy = fixture_deps().await;
    ToolDeps { orders: Arc::new(UnavailableOrderRepository), ..healthy }
}
