use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DeliveryError;

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Member => write!(f, "member"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// A broadcast recipient, read from the user store at resolution time.
///
/// Recipients are read-only to the fan-out engine; suppression filtering
/// happens in the resolver query, so a `Recipient` that reaches the
/// dispatcher is always eligible for delivery.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipient {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
}

/// The business event that caused a broadcast.
///
/// Constructed once per invocation by the broadcast service and treated as
/// immutable from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TriggerContext {
    /// A new adoption event was posted.
    NewEvent {
        event_id: Uuid,
        title: String,
        creator_name: Option<String>,
    },
    /// An admin broadcast to one forum's approved members.
    ForumAdminBroadcast {
        forum_id: Uuid,
        admin_name: String,
        message: String,
        sender_id: Uuid,
        image_url: Option<String>,
    },
    /// A message in the platform-wide chat.
    GlobalChatMessage {
        sender_name: String,
        message: String,
        sender_id: Uuid,
        sender_role: UserRole,
        image_url: Option<String>,
    },
}

/// Payload for the push channel (external gateway).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    /// In-app route the notification opens (e.g. `/events/{id}`).
    pub route: String,
    pub image_url: Option<String>,
    pub priority: u8,
    pub ttl_seconds: u32,
}

/// Payload for the in-app channel (persisted inbox row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InAppPayload {
    pub title: String,
    pub content: String,
}

/// Composed notification with one projection per channel.
///
/// Both projections derive from the same `TriggerContext` and reference the
/// same logical destination, so tapping the push notification and opening
/// the in-app inbox land the user in the same place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub push: PushPayload,
    pub in_app: InAppPayload,
}

/// Result of one channel's delivery attempt for one recipient.
pub type ChannelOutcome = Result<(), DeliveryError>;

/// Per-recipient delivery result, one outcome per channel.
///
/// Outcomes are ephemeral: they are logged and rolled into the
/// `DispatchSummary`, never persisted. The in-app channel's success *is*
/// the persisted notification row.
#[derive(Debug)]
pub struct DeliveryOutcome {
    pub recipient_id: Uuid,
    pub push: ChannelOutcome,
    pub in_app: ChannelOutcome,
}

/// Aggregate counts for one broadcast round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    /// Recipients the coordinator attempted (both channels each).
    pub attempted: usize,
    /// Number of batches driven to completion.
    pub batches: usize,
    pub push_delivered: usize,
    pub push_failed: usize,
    pub in_app_written: usize,
    pub in_app_failed: usize,
}

impl DispatchSummary {
    /// Fold one recipient's outcome into the counts.
    pub fn record(&mut self, outcome: &DeliveryOutcome) {
        self.attempted += 1;
        match outcome.push {
            Ok(()) => self.push_delivered += 1,
            Err(_) => self.push_failed += 1,
        }
        match outcome.in_app {
            Ok(()) => self.in_app_written += 1,
            Err(_) => self.in_app_failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(push: ChannelOutcome, in_app: ChannelOutcome) -> DeliveryOutcome {
        DeliveryOutcome {
            recipient_id: Uuid::new_v4(),
            push,
            in_app,
        }
    }

    #[test]
    fn test_summary_records_mixed_outcomes() {
        let mut summary = DispatchSummary::default();
        let id = Uuid::new_v4();
        summary.record(&outcome(Ok(()), Ok(())));
        summary.record(&outcome(
            Err(DeliveryError::PushDeliveryFailed {
                recipient_id: id,
                cause: "gateway 502".to_string(),
            }),
            Ok(()),
        ));
        summary.record(&outcome(
            Ok(()),
            Err(DeliveryError::InAppPersistFailed {
                recipient_id: id,
                cause: "connection closed".to_string(),
            }),
        ));

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.push_delivered, 2);
        assert_eq!(summary.push_failed, 1);
        assert_eq!(summary.in_app_written, 2);
        assert_eq!(summary.in_app_failed, 1);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Member.to_string(), "member");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }
}
