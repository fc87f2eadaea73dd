use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const SLACK_API_BASE: &str = "https://slack.com/api";

/// Thin Web API client for outbound calls.
///
/// Delivery failures are the caller's concern; they are logged and dropped
/// there, never fed back into the core.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    user_id: Option<String>,
}

impl SlackClient {
    pub fn new(token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            token,
            base_url: SLACK_API_BASE.to_string(),
        }
    }

    /// Post a message to a channel via `chat.postMessage`.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let body: ApiResponse = self
            .call("chat.postMessage", &PostMessageRequest { channel, text })
            .await?;
        if !body.ok {
            return Err(anyhow!(
                "chat.postMessage failed: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            ));
        }
        Ok(())
    }

    /// Resolve the bot's own user id via `auth.test`. Used to strip the
    /// bot mention from inbound text and to ignore the bot's own messages.
    pub async fn auth_test(&self) -> Result<String> {
        let body: ApiResponse = self.call("auth.test", &serde_json::json!({})).await?;
        if !body.ok {
            return Err(anyhow!(
                "auth.test failed: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            ));
        }
        body.user_id
            .ok_or_else(|| anyhow!("auth.test response carried no user_id"))
    }

    async fn call<T: Serialize>(&self, method: &str, payload: &T) -> Result<ApiResponse> {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("Slack API HTTP error: {}", response.status()));
        }

        Ok(response.json().await?)
    }
}
