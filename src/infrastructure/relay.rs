//! EmailJS-backed implementation of the outbound order notification.

use crate::domain::{services, OrderDraft, OrderNotifier, Product, RelayError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Immutable relay configuration, injected at construction rather than read
/// from ambient globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: "service_128wpem".to_string(),
            template_id: "template_insvw2k".to_string(),
            public_key: "VMmRrsjDMUVK2vWORiwwE".to_string(),
            endpoint: default_endpoint(),
        }
    }
}

/// Sends order emails through the EmailJS HTTP API.
///
/// One blocking POST per order, no retries; failures come back as
/// `RelayError` and the state machine keeps the draft for a manual retry.
pub struct EmailJsRelay {
    config: RelayConfig,
    client: reqwest::blocking::Client,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { config, client }
    }
}

/// Resolves the template parameters for an order email.
///
/// Everything is rendered up front: the product name, the rating as a star
/// row, and the notes defaulted to a placeholder when empty.
pub fn template_params(draft: &OrderDraft, product: &Product) -> serde_json::Value {
    let notes = if draft.notes.is_empty() {
        "—"
    } else {
        draft.notes.as_str()
    };
    json!({
        "cookie": product.name,
        "rating": services::star_bar(draft.rating),
        "quantity": draft.quantity,
        "email": draft.email,
        "notes": notes,
    })
}

impl OrderNotifier for EmailJsRelay {
    fn send(&self, draft: &OrderDraft, product: &Product) -> Result<(), RelayError> {
        let body = json!({
            "service_id": self.config.service_id,
            "template_id": self.config.template_id,
            "user_id": self.config.public_key,
            "template_params": template_params(draft, product),
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().unwrap_or_default();
            Err(RelayError::Status(status.as_u16(), text))
        }
    }
}
