//! Dual-channel dispatcher — one recipient, two independent sends.
//!
//! The push send and the in-app write run concurrently with no shared
//! transaction. Each side is caught and logged on its own: a gateway
//! rejection never blocks the inbox row, and a failed insert never undoes
//! the push attempt. Failures are terminal per recipient/channel; the
//! engine does not retry.

use pawhaven_common::error::DeliveryError;
use pawhaven_common::types::{DeliveryOutcome, NotificationMessage, Recipient};

use crate::inbox::InboxStore;
use crate::push::PushGateway;

/// Delivers one composed message to one recipient over both channels.
pub struct Dispatcher<G, S> {
    gateway: G,
    inbox: S,
}

impl<G: PushGateway, S: InboxStore> Dispatcher<G, S> {
    pub fn new(gateway: G, inbox: S) -> Self {
        Self { gateway, inbox }
    }

    /// Attempt both channels and settle into per-channel outcomes.
    ///
    /// Never returns `Err`; failures are values inside the outcome.
    pub async fn deliver(
        &self,
        recipient: &Recipient,
        message: &NotificationMessage,
    ) -> DeliveryOutcome {
        let (push_result, in_app_result) = tokio::join!(
            self.gateway.send(recipient.id, &message.push),
            self.inbox.insert(recipient.id, &message.in_app),
        );

        let push = push_result.map_err(|e| {
            let err = DeliveryError::PushDeliveryFailed {
                recipient_id: recipient.id,
                cause: e.to_string(),
            };
            tracing::warn!(recipient_id = %recipient.id, error = %err, "Push delivery failed");
            err
        });

        let in_app = in_app_result.map_err(|e| {
            let err = DeliveryError::InAppPersistFailed {
                recipient_id: recipient.id,
                cause: e.to_string(),
            };
            tracing::warn!(recipient_id = %recipient.id, error = %err, "In-app persist failed");
            err
        });

        DeliveryOutcome {
            recipient_id: recipient.id,
            push,
            in_app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::inbox::MockInboxStore;
    use crate::push::MockPushGateway;

    fn recipient() -> Recipient {
        Recipient {
            id: Uuid::new_v4(),
            display_name: Some("casey".to_string()),
            role: None,
        }
    }

    fn message() -> NotificationMessage {
        crate::composer::compose(&pawhaven_common::types::TriggerContext::NewEvent {
            event_id: Uuid::new_v4(),
            title: "Adoption Day".to_string(),
            creator_name: None,
        })
    }

    #[tokio::test]
    async fn test_both_channels_succeed() {
        let mut gateway = MockPushGateway::new();
        gateway.expect_send().times(1).returning(|_, _| Ok(()));
        let mut inbox = MockInboxStore::new();
        inbox.expect_insert().times(1).returning(|_, _| Ok(()));

        let outcome = Dispatcher::new(gateway, inbox)
            .deliver(&recipient(), &message())
            .await;
        assert!(outcome.push.is_ok());
        assert!(outcome.in_app.is_ok());
    }

    #[tokio::test]
    async fn test_push_failure_does_not_block_in_app() {
        let mut gateway = MockPushGateway::new();
        gateway
            .expect_send()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("gateway returned 502")));
        let mut inbox = MockInboxStore::new();
        inbox.expect_insert().times(1).returning(|_, _| Ok(()));

        let outcome = Dispatcher::new(gateway, inbox)
            .deliver(&recipient(), &message())
            .await;
        assert!(matches!(
            outcome.push,
            Err(DeliveryError::PushDeliveryFailed { .. })
        ));
        assert!(outcome.in_app.is_ok(), "in-app write must still land");
    }

    #[tokio::test]
    async fn test_in_app_failure_does_not_block_push() {
        let mut gateway = MockPushGateway::new();
        gateway.expect_send().times(1).returning(|_, _| Ok(()));
        let mut inbox = MockInboxStore::new();
        inbox
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("connection closed")));

        let outcome = Dispatcher::new(gateway, inbox)
            .deliver(&recipient(), &message())
            .await;
        assert!(outcome.push.is_ok(), "push attempt must still be made");
        assert!(matches!(
            outcome.in_app,
            Err(DeliveryError::InAppPersistFailed { .. })
        ));
    }
}
