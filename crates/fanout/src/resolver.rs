//! Recipient resolver — turns a trigger context into the recipient set.
//!
//! Each variant maps to one point-in-time query against the user store:
//! - `NewEvent` / `GlobalChatMessage`: every user whose account is not
//!   indefinitely suspended; global chat additionally excludes the sender.
//! - `ForumAdminBroadcast`: approved members of the forum, sender excluded.
//!   Mute flags are ignored here on purpose: admin broadcasts always
//!   deliver.
//!
//! A failed query fails the whole broadcast: no partial recipient list is
//! ever dispatched.

use async_trait::async_trait;
use sqlx::PgPool;

use pawhaven_common::error::FanoutError;
use pawhaven_common::types::{Recipient, TriggerContext};

/// Source of broadcast recipients. Read-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipientSource: Send + Sync {
    /// Resolve the ordered recipient set for one trigger.
    ///
    /// The returned order is the dispatch order; it is preserved across
    /// batch boundaries by the coordinator.
    async fn resolve(&self, context: &TriggerContext) -> Result<Vec<Recipient>, FanoutError>;
}

/// Postgres-backed recipient source.
pub struct PgRecipientSource {
    pool: PgPool,
}

impl PgRecipientSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientSource for PgRecipientSource {
    async fn resolve(&self, context: &TriggerContext) -> Result<Vec<Recipient>, FanoutError> {
        let recipients: Vec<Recipient> = match context {
            TriggerContext::NewEvent { .. } => {
                sqlx::query_as(
                    r#"
                    SELECT id, username AS display_name, role
                    FROM users
                    WHERE suspended_indefinite = false
                    ORDER BY created_at, id
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
            TriggerContext::GlobalChatMessage { sender_id, .. } => {
                sqlx::query_as(
                    r#"
                    SELECT id, username AS display_name, role
                    FROM users
                    WHERE suspended_indefinite = false
                      AND id <> $1
                    ORDER BY created_at, id
                    "#,
                )
                .bind(sender_id)
                .fetch_all(&self.pool)
                .await
            }
            TriggerContext::ForumAdminBroadcast {
                forum_id,
                sender_id,
                ..
            } => {
                // Mute status deliberately not filtered
                sqlx::query_as(
                    r#"
                    SELECT u.id, u.username AS display_name, u.role
                    FROM forum_members fm
                    JOIN users u ON u.id = fm.user_id
                    WHERE fm.forum_id = $1
                      AND fm.status = 'approved'
                      AND fm.user_id <> $2
                    ORDER BY fm.joined_at, u.id
                    "#,
                )
                .bind(forum_id)
                .bind(sender_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(FanoutError::Resolution)?;

        tracing::debug!(count = recipients.len(), "Recipient set resolved");
        Ok(recipients)
    }
}
