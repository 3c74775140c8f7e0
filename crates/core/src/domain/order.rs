use serde::{Deserialize, Serialize};

use crate::domain::message::ConversationId;
use crate::domain::product::ProductId;
use crate::domain::user::UserId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

/// Status value marking an order as currently on rent.
pub const ACTIVE_STATUS: &str = "Active";

/// Rendered in place of empty access details.
pub const NO_ACCESS_DETAILS: &str = "None";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub code: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub waste_type_id: Option<ProductId>,
    pub access_details: String,
    pub is_deleted: bool,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    pub fn access_details_or_marker(&self) -> &str {
        if self.access_details.trim().is_empty() {
            NO_ACCESS_DETAILS
        } else {
            &self.access_details
        }
    }
}

/// An order joined with its owner's username.
///
/// The owner is optional because seeded orders may name a user that was never
/// loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order: Order,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Order, OrderId};
    use crate::domain::message::ConversationId;
    use crate::domain::user::UserId;

    fn order(access_details: &str, status: &str) -> Order {
        Order {
            id: OrderId("o-1".to_string()),
            user_id: UserId("u-1".to_string()),
            conversation_id: ConversationId("c-1".to_string()),
            code: "ORD-1".to_string(),
            start_date: "2026-01-01".to_string(),
            end_date: "2026-01-08".to_string(),
            status: status.to_string(),
            waste_type_id: None,
            access_details: access_details.to_string(),
            is_deleted: false,
        }
    }

    #[test]
    fn empty_access_details_render_marker() {
        assert_eq!(order("", "Active").access_details_or_marker(), "None");
        assert_eq!(order("   ", "Active").access_details_or_marker(), "None");
        assert_eq!(order("Gate code 4321", "Active").access_details_or_marker(), "Gate code 4321");
    }

    #[test]
    fn only_exact_active_status_is_active() {
        assert!(order("", "Active").is_active());
        assert!(!order("", "Completed").is_active());
        assert!(!order("", "active").is_active());
    }
}
