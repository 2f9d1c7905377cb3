//! Broadcast service — the engine's public entry points.
//!
//! One method per trigger kind, all driving the same pipeline:
//! resolve → compose → batched dual-channel dispatch.
//!
//! Delivery is best-effort: the only error a caller ever sees is a
//! resolution failure (in which case nobody was contacted). Per-recipient
//! delivery failures are logged and counted in the returned summary, so the
//! triggering action (event creation, chat send) is never failed by a
//! dropped notification.

use sqlx::PgPool;
use uuid::Uuid;

use pawhaven_common::config::AppConfig;
use pawhaven_common::error::FanoutError;
use pawhaven_common::types::{DispatchSummary, TriggerContext, UserRole};

use crate::composer::compose;
use crate::coordinator::BatchCoordinator;
use crate::dispatcher::Dispatcher;
use crate::inbox::{InboxStore, PgInboxStore};
use crate::push::{OneSignalClient, PushGateway};
use crate::resolver::{PgRecipientSource, RecipientSource};

/// Fan-out engine facade, generic over its three external collaborators.
pub struct BroadcastService<R, G, S> {
    source: R,
    dispatcher: Dispatcher<G, S>,
    coordinator: BatchCoordinator,
}

impl BroadcastService<PgRecipientSource, OneSignalClient, PgInboxStore> {
    /// Wire up the production collaborators from config.
    pub fn from_config(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(
            PgRecipientSource::new(pool.clone()),
            OneSignalClient::new(config.gateway.clone()),
            PgInboxStore::new(pool),
            config.fanout_batch_size,
        )
    }
}

impl<R, G, S> BroadcastService<R, G, S>
where
    R: RecipientSource,
    G: PushGateway,
    S: InboxStore,
{
    pub fn new(source: R, gateway: G, inbox: S, batch_size: usize) -> Self {
        Self {
            source,
            dispatcher: Dispatcher::new(gateway, inbox),
            coordinator: BatchCoordinator::new(batch_size),
        }
    }

    /// Broadcast a newly posted adoption event to all active users.
    pub async fn notify_new_event(
        &self,
        title: &str,
        event_id: Uuid,
        creator_name: Option<&str>,
    ) -> Result<DispatchSummary, FanoutError> {
        self.broadcast(TriggerContext::NewEvent {
            event_id,
            title: title.to_string(),
            creator_name: creator_name.map(str::to_string),
        })
        .await
    }

    /// Broadcast an admin announcement to a forum's approved members.
    pub async fn notify_forum_admin_broadcast(
        &self,
        forum_id: Uuid,
        admin_username: &str,
        message: &str,
        sender_id: Uuid,
        image_url: Option<&str>,
    ) -> Result<DispatchSummary, FanoutError> {
        self.broadcast(TriggerContext::ForumAdminBroadcast {
            forum_id,
            admin_name: admin_username.to_string(),
            message: message.to_string(),
            sender_id,
            image_url: image_url.map(str::to_string),
        })
        .await
    }

    /// Broadcast a global chat message to everyone except the sender.
    pub async fn notify_global_chat(
        &self,
        sender_username: &str,
        message: &str,
        sender_id: Uuid,
        sender_role: UserRole,
        image_url: Option<&str>,
    ) -> Result<DispatchSummary, FanoutError> {
        self.broadcast(TriggerContext::GlobalChatMessage {
            sender_name: sender_username.to_string(),
            message: message.to_string(),
            sender_id,
            sender_role,
            image_url: image_url.map(str::to_string),
        })
        .await
    }

    /// Run the full pipeline for one trigger.
    ///
    /// `Err` only when the recipient set cannot be resolved; in that case
    /// no recipient was contacted and no inbox row was written.
    async fn broadcast(&self, context: TriggerContext) -> Result<DispatchSummary, FanoutError> {
        let recipients = self.source.resolve(&context).await?;
        if recipients.is_empty() {
            tracing::debug!("Broadcast resolved to zero recipients");
            return Ok(DispatchSummary::default());
        }

        let message = compose(&context);
        let summary = self
            .coordinator
            .dispatch_all(&self.dispatcher, &recipients, &message)
            .await;

        tracing::info!(
            attempted = summary.attempted,
            batches = summary.batches,
            push_delivered = summary.push_delivered,
            push_failed = summary.push_failed,
            in_app_written = summary.in_app_written,
            in_app_failed = summary.in_app_failed,
            "Broadcast complete"
        );

        Ok(summary)
    }
}
