use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use ops_core::domain::message::ConversationId;
use ops_core::domain::order::{CustomerOrder, Order, OrderId, ACTIVE_STATUS};
use ops_core::domain::product::ProductId;
use ops_core::domain::user::{company_like_pattern, UserId};

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

const ORDER_COLUMNS: &str = "o.id, o.user_id, o.conversation_id, o.code, o.start_date,
    o.end_date, o.status, o.waste_type_id, o.access_details, o.is_deleted, u.username";

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn text(row: &SqliteRow, column: &str) -> Result<String, RepositoryError> {
    let value: Option<String> =
        row.try_get(column).map_err(|e| RepositoryError::Decode(e.to_string()))?;
    Ok(value.unwrap_or_default())
}

fn row_to_customer_order(row: &SqliteRow) -> Result<CustomerOrder, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let waste_type_id: Option<String> =
        row.try_get("waste_type_id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let is_deleted: bool =
        row.try_get("is_deleted").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let username: Option<String> =
        row.try_get("username").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let order = Order {
        id: OrderId(id),
        user_id: UserId(text(row, "user_id")?),
        conversation_id: ConversationId(text(row, "conversation_id")?),
        code: text(row, "code")?,
        start_date: text(row, "start_date")?,
        end_date: text(row, "end_date")?,
        status: text(row, "status")?,
        waste_type_id: waste_type_id.filter(|id| !id.is_empty()).map(ProductId),
        access_details: text(row, "access_details")?,
        is_deleted,
    };

    Ok(CustomerOrder { order, username })
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<CustomerOrder>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders o LEFT JOIN users u ON u.id = o.user_id
             WHERE o.code = ? AND o.is_deleted = 0
             ORDER BY o.id
             LIMIT 1"
        );
        let row = sqlx::query(&sql).bind(code).fetch_optional(&self.pool).await?;

        match row {
            Some(ref r) => Ok(Some(row_to_customer_order(r)?)),
            None => Ok(None),
        }
    }

    async fn find_active_by_company(
        &self,
        company_name: &str,
    ) -> Result<Vec<CustomerOrder>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS}
             FROM orders o JOIN users u ON u.id = o.user_id
             WHERE u.username LIKE ? ESCAPE '\\'
               AND o.status = ?
               AND o.is_deleted = 0
             ORDER BY o.code, o.id"
        );
        let rows = sqlx::query(&sql)
            .bind(company_like_pattern(company_name))
            .bind(ACTIVE_STATUS)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_customer_order).collect()
    }
}
