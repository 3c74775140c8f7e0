use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use ops_core::domain::message::{ConversationId, Message, MessageId};
use ops_core::domain::user::UserId;

use super::{MessageRepository, RepositoryError};
use crate::DbPool;

pub struct SqlMessageRepository {
    pool: DbPool,
}

impl SqlMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_message(row: &SqliteRow) -> Result<Message, RepositoryError> {
    let get_text = |column: &str| -> Result<String, RepositoryError> {
        let value: Option<String> =
            row.try_get(column).map_err(|e| RepositoryError::Decode(e.to_string()))?;
        Ok(value.unwrap_or_default())
    };

    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let is_deleted: bool =
        row.try_get("is_deleted").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(Message {
        id: MessageId(id),
        conversation_id: ConversationId(get_text("conversation_id")?),
        user_id: UserId(get_text("user_id")?),
        message: get_text("message")?,
        sentiment_label: get_text("sentiment_label")?,
        created_on: get_text("created_on")?,
        is_deleted,
    })
}

#[async_trait::async_trait]
impl MessageRepository for SqlMessageRepository {
    async fn list_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, conversation_id, user_id, message, sentiment_label, created_on, is_deleted
             FROM messages
             WHERE conversation_id = ? AND is_deleted = 0
             ORDER BY created_on, id",
        )
        .bind(&conversation_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_message).collect()
    }
}
