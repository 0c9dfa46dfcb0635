//! # Notification Sink
//!
//! Fire-and-forget client for the Signal REST gateway. Lifecycle outcomes
//! are announced to a configured group after the transaction commits; a
//! failure here is logged and swallowed, never surfaced to the API caller
//! and never retried.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SignalConfig;

/// Payload accepted by the Signal REST gateway.
#[derive(Debug, Clone, Serialize)]
pub struct SignalMessage {
    pub message: String,
    pub number: String,
    pub recipients: Vec<String>,
}

/// Client for the external notification collaborator.
#[derive(Debug, Clone)]
pub struct SignalNotifier {
    config: SignalConfig,
    client: reqwest::Client,
}

impl SignalNotifier {
    /// Build a notifier from configuration. Returns `None` when the sink is
    /// disabled so callers hold an `Option` instead of a no-op client.
    pub fn from_config(config: &SignalConfig) -> Option<Self> {
        if !config.enabled || config.api_url.is_empty() {
            return None;
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;
        Some(Self {
            config: config.clone(),
            client,
        })
    }

    /// Announce a created instance, identified by its display token.
    pub fn notify_instance_created(&self, name: &str) {
        let message = format!(
            "App started, access code {name}. Delete this message from your \
             phone for safety. The download will be ready in a few minutes."
        );
        self.dispatch(message);
    }

    /// Announce a deleted instance.
    pub fn notify_instance_deleted(&self) {
        let message =
            "App removed. Delete the APK from your phone for safety.".to_string();
        self.dispatch(message);
    }

    /// Compose the gateway payload for a message body.
    fn payload(&self, message: String) -> SignalMessage {
        SignalMessage {
            message,
            number: self.config.number.clone(),
            recipients: vec![self.config.group_id.clone()],
        }
    }

    /// Post the payload on a background task. The spawned task owns the
    /// request end to end; the caller returns immediately.
    fn dispatch(&self, message: String) {
        let url = self.config.api_url.clone();
        let client = self.client.clone();
        let payload = self.payload(message);

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(status = %response.status(), "notification delivered");
                }
                Ok(response) => {
                    warn!(status = %response.status(), "notification rejected by gateway");
                }
                Err(e) => {
                    warn!(error = %e, "notification dispatch failed");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_config() -> SignalConfig {
        SignalConfig {
            enabled: true,
            api_url: "http://localhost:9999/v2/send".to_string(),
            number: "+10000000000".to_string(),
            group_id: "group.abc123".to_string(),
            timeout_ms: 1000,
        }
    }

    #[test]
    fn test_disabled_config_yields_no_notifier() {
        let config = SignalConfig::default();
        assert!(SignalNotifier::from_config(&config).is_none());
    }

    #[tokio::test]
    async fn test_enabled_config_yields_notifier() {
        assert!(SignalNotifier::from_config(&enabled_config()).is_some());
    }

    #[tokio::test]
    async fn test_payload_shape() {
        let notifier = SignalNotifier::from_config(&enabled_config()).unwrap();
        let payload = notifier.payload("hello".to_string());
        assert_eq!(payload.message, "hello");
        assert_eq!(payload.number, "+10000000000");
        assert_eq!(payload.recipients, vec!["group.abc123".to_string()]);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("message").is_some());
        assert!(json.get("number").is_some());
        assert!(json["recipients"].is_array());
    }
}
