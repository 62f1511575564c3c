//! Stripe Connect onboarding for owner payouts.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::Transport;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StripeStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub onboarding_complete: bool,
    #[serde(default)]
    pub charges_enabled: bool,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl StripeStatus {
    pub fn label(&self) -> &'static str {
        match (self.connected, self.onboarding_complete) {
            (false, _) => "Not connected",
            (true, false) => "Onboarding incomplete",
            (true, true) => "Connected",
        }
    }
}

#[derive(Deserialize)]
struct ConnectLink {
    url: String,
}

impl<T: Transport> ApiClient<T> {
    pub async fn stripe_status(&self) -> Result<StripeStatus> {
        self.get("/stripe/status").await
    }

    /// Start or resume onboarding; returns the Stripe-hosted URL to open.
    pub async fn stripe_connect(&self) -> Result<String> {
        let link: ConnectLink = self.post("/stripe/connect", &serde_json::json!({})).await?;
        Ok(link.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_status_and_connect() {
        let mock = MockTransport::new(|req| match req.path.as_str() {
            "/stripe/status" => json_response(200, json!({"connected": true, "account_id": "acct_1"})),
            _ => json_response(200, json!({"url": "https://connect.stripe.com/setup/x"})),
        });
        let client = ApiClient::with_transport(mock);

        let status = client.stripe_status().await.unwrap();
        assert_eq!(status.label(), "Onboarding incomplete");
        assert_eq!(status.account_id.as_deref(), Some("acct_1"));

        let url = client.stripe_connect().await.unwrap();
        assert!(url.starts_with("https://connect.stripe.com"));
    }
}
