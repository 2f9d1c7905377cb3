//! Message composer — turns a trigger context into channel payloads.
//!
//! Pure and deterministic: the same context always composes the same
//! message, and nothing here can fail. Missing actor metadata falls back to
//! a generic "Admin" label instead of erroring.
//!
//! Admin-authored content carries an `[ADMIN]` title marker so recipients
//! can recognize elevated-trust messages at a glance. Both projections
//! reference the same route, so the push tap and the in-app inbox open the
//! same destination.

use pawhaven_common::types::{
    InAppPayload, NotificationMessage, PushPayload, TriggerContext, UserRole,
};

/// Urgency marker prefixed to admin-authored titles.
const ADMIN_MARKER: &str = "[ADMIN]";

/// Gateway delivery priority for every broadcast.
const PUSH_PRIORITY: u8 = 10;

/// Push time-to-live: 3 days.
const PUSH_TTL_SECONDS: u32 = 259_200;

/// Compose the dual-channel message for one trigger.
pub fn compose(context: &TriggerContext) -> NotificationMessage {
    let (title, body, route, image_url) = match context {
        TriggerContext::NewEvent {
            event_id,
            title,
            creator_name,
        } => {
            let creator = creator_name.as_deref().unwrap_or("Admin");
            (
                format!("New Event: {}", title),
                format!("{} just posted a new event. Check it out!", creator),
                format!("/events/{}", event_id),
                None,
            )
        }
        TriggerContext::ForumAdminBroadcast {
            forum_id,
            admin_name,
            message,
            image_url,
            ..
        } => (
            format!("{} {}", ADMIN_MARKER, admin_name),
            message.clone(),
            format!("/forum-chat/{}", forum_id),
            image_url.clone(),
        ),
        TriggerContext::GlobalChatMessage {
            sender_name,
            message,
            sender_role,
            image_url,
            ..
        } => {
            let title = match sender_role {
                UserRole::Admin => format!("{} {}", ADMIN_MARKER, sender_name),
                UserRole::Member => sender_name.clone(),
            };
            (title, message.clone(), "/global-chat".to_string(), image_url.clone())
        }
    };

    NotificationMessage {
        push: PushPayload {
            title: title.clone(),
            body: body.clone(),
            route,
            image_url,
            priority: PUSH_PRIORITY,
            ttl_seconds: PUSH_TTL_SECONDS,
        },
        in_app: InAppPayload {
            title,
            content: body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn new_event(creator: Option<&str>) -> TriggerContext {
        TriggerContext::NewEvent {
            event_id: Uuid::nil(),
            title: "Adoption Day".to_string(),
            creator_name: creator.map(str::to_string),
        }
    }

    #[test]
    fn test_new_event_phrasing() {
        let msg = compose(&new_event(Some("Dana")));
        assert_eq!(msg.push.title, "New Event: Adoption Day");
        assert!(msg.push.body.contains("Dana just posted a new event"));
        assert_eq!(msg.push.route, format!("/events/{}", Uuid::nil()));
    }

    #[test]
    fn test_new_event_missing_creator_falls_back_to_admin() {
        let msg = compose(&new_event(None));
        assert!(msg.push.body.starts_with("Admin just posted"));
    }

    #[test]
    fn test_forum_broadcast_carries_admin_marker_and_image() {
        let forum_id = Uuid::new_v4();
        let msg = compose(&TriggerContext::ForumAdminBroadcast {
            forum_id,
            admin_name: "shelter_admin".to_string(),
            message: "Vet visit moved to Friday".to_string(),
            sender_id: Uuid::new_v4(),
            image_url: Some("https://cdn.example/vet.jpg".to_string()),
        });
        assert_eq!(msg.push.title, "[ADMIN] shelter_admin");
        assert_eq!(msg.push.body, "Vet visit moved to Friday");
        assert_eq!(msg.push.route, format!("/forum-chat/{}", forum_id));
        assert_eq!(msg.push.image_url.as_deref(), Some("https://cdn.example/vet.jpg"));
    }

    #[test]
    fn test_global_chat_admin_vs_member_title() {
        let base = |role| TriggerContext::GlobalChatMessage {
            sender_name: "casey".to_string(),
            message: "hi all".to_string(),
            sender_id: Uuid::new_v4(),
            sender_role: role,
            image_url: None,
        };
        assert_eq!(compose(&base(UserRole::Admin)).push.title, "[ADMIN] casey");
        assert_eq!(compose(&base(UserRole::Member)).push.title, "casey");
        assert_eq!(compose(&base(UserRole::Member)).push.route, "/global-chat");
    }

    #[test]
    fn test_projections_stay_consistent() {
        let msg = compose(&new_event(Some("Dana")));
        assert_eq!(msg.push.title, msg.in_app.title);
        assert_eq!(msg.push.body, msg.in_app.content);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let ctx = new_event(Some("Dana"));
        assert_eq!(compose(&ctx), compose(&ctx));
    }
}
