//! Inbound payload shapes for the chat platform's Events API.

use serde::Deserialize;

/// Top-level envelope posted to `/slack/events`.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub challenge: Option<String>,
    pub team_id: Option<String>,
    pub event: Option<InboundEvent>,
    #[serde(default)]
    pub authorizations: Vec<Authorization>,
}

#[derive(Debug, Deserialize)]
pub struct Authorization {
    pub user_id: Option<String>,
}

/// The inner event of an `event_callback` envelope. Only `app_mention`
/// events and direct messages are acted on; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: Option<String>,
    pub text: Option<String>,
    pub channel: Option<String>,
    pub channel_type: Option<String>,
    pub team: Option<String>,
}

/// Form payload of a slash command invocation.
#[derive(Debug, Deserialize)]
pub struct SlashCommand {
    pub user_id: Option<String>,
    pub team_id: Option<String>,
    #[serde(default)]
    pub text: String,
}
