//! In-app notification store.
//!
//! Insert-only: a successful write *is* the durable record that a
//! notification happened. The engine never updates or deletes inbox rows.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use pawhaven_common::types::InAppPayload;

/// Persisted in-app channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InboxStore: Send + Sync {
    async fn insert(&self, recipient_id: Uuid, payload: &InAppPayload) -> anyhow::Result<()>;
}

/// Postgres-backed inbox store writing to the `notifications` table.
pub struct PgInboxStore {
    pool: PgPool,
}

impl PgInboxStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InboxStore for PgInboxStore {
    async fn insert(&self, recipient_id: Uuid, payload: &InAppPayload) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, content)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(recipient_id)
        .bind(&payload.title)
        .bind(&payload.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
