//! Push gateway client.
//!
//! Delivers the push projection to the hosted gateway's REST endpoint, one
//! request per recipient, addressed by the recipient's external-id alias.
//! Credentials come from an injected [`GatewayConfig`], never from constants.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use pawhaven_common::config::GatewayConfig;
use pawhaven_common::types::PushPayload;

/// Outbound push channel. One call per recipient; the gateway's own
/// per-request timeout bounds each call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, recipient_id: Uuid, payload: &PushPayload) -> anyhow::Result<()>;
}

/// Wire format accepted by the gateway's notifications endpoint.
#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    app_id: &'a str,
    contents: LocalizedText<'a>,
    headings: LocalizedText<'a>,
    target_channel: &'static str,
    include_aliases: Aliases,
    data: RouteData<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    big_picture: Option<&'a str>,
    priority: u8,
    ttl: u32,
}

#[derive(Debug, Serialize)]
struct LocalizedText<'a> {
    en: &'a str,
}

#[derive(Debug, Serialize)]
struct Aliases {
    external_id: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RouteData<'a> {
    route: &'a str,
}

/// reqwest-backed client for the OneSignal-compatible gateway.
pub struct OneSignalClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl OneSignalClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PushGateway for OneSignalClient {
    async fn send(&self, recipient_id: Uuid, payload: &PushPayload) -> anyhow::Result<()> {
        let request = GatewayRequest {
            app_id: &self.config.app_id,
            contents: LocalizedText { en: &payload.body },
            headings: LocalizedText { en: &payload.title },
            target_channel: "push",
            include_aliases: Aliases {
                external_id: vec![recipient_id.to_string()],
            },
            data: RouteData {
                route: &payload.route,
            },
            big_picture: payload.image_url.as_deref(),
            priority: payload.priority,
            ttl: payload.ttl_seconds,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", format!("Basic {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("gateway returned {}: {}", status, detail);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let payload = PushPayload {
            title: "New Event: Adoption Day".to_string(),
            body: "Dana just posted a new event. Check it out!".to_string(),
            route: "/events/42".to_string(),
            image_url: None,
            priority: 10,
            ttl_seconds: 259_200,
        };
        let id = Uuid::new_v4();
        let request = GatewayRequest {
            app_id: "app-1",
            contents: LocalizedText { en: &payload.body },
            headings: LocalizedText { en: &payload.title },
            target_channel: "push",
            include_aliases: Aliases {
                external_id: vec![id.to_string()],
            },
            data: RouteData {
                route: &payload.route,
            },
            big_picture: payload.image_url.as_deref(),
            priority: payload.priority,
            ttl: payload.ttl_seconds,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["app_id"], "app-1");
        assert_eq!(json["headings"]["en"], "New Event: Adoption Day");
        assert_eq!(json["target_channel"], "push");
        assert_eq!(json["include_aliases"]["external_id"][0], id.to_string());
        assert_eq!(json["data"]["route"], "/events/42");
        assert_eq!(json["ttl"], 259_200);
        // Absent image must not serialize a null big_picture
        assert!(json.get("big_picture").is_none());
    }
}
