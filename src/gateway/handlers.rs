//! Event and slash-command handlers.
//!
//! Handlers normalize inbound payloads to an `IntentSubmission`, run it
//! through the core under the shared lock, and render the result back to
//! the platform. Signature verification has already happened in the
//! router layer by the time these run.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde_json::json;
use tracing::{debug, info, warn};

use super::events::{EventEnvelope, InboundEvent, SlashCommand};
use super::render;
use super::state::AppState;
use crate::kernel::record::{IntentResult, IntentSubmission};

/// `POST /slack/events`: URL verification challenges and event callbacks.
pub async fn slack_events(
    State(state): State<AppState>,
    Json(envelope): Json<EventEnvelope>,
) -> Response {
    match envelope.kind.as_str() {
        "url_verification" => {
            let challenge = envelope.challenge.unwrap_or_default();
            Json(json!({ "challenge": challenge })).into_response()
        }
        "event_callback" => {
            handle_event_callback(&state, envelope).await;
            StatusCode::OK.into_response()
        }
        other => {
            debug!(kind = %other, "ignoring unhandled envelope type");
            StatusCode::OK.into_response()
        }
    }
}

/// `POST /slack/command`: the slash-command form. The rendered result goes
/// back inline as the command response.
pub async fn slack_command(
    State(state): State<AppState>,
    Form(command): Form<SlashCommand>,
) -> Response {
    let Some(user_id) = command.user_id.filter(|id| !id.is_empty()) else {
        return StatusCode::OK.into_response();
    };

    let cid = render::correlation_id();
    let submission = IntentSubmission {
        user_id,
        team_id: command.team_id.unwrap_or_default(),
        text: command.text.trim().to_string(),
        correlation_id: cid.clone(),
    };

    let result = submit(&state, submission).await;
    Json(json!({
        "response_type": "ephemeral",
        "text": render::format_response(&result, &cid),
    }))
    .into_response()
}

/// Liveness probe with the current ledger depth.
pub async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    let core = state.core.lock().await;
    Json(json!({ "status": "ok", "ledger_len": core.ledger().len() }))
}

async fn handle_event_callback(state: &AppState, envelope: EventEnvelope) {
    let Some(event) = envelope.event else { return };

    if !is_actionable(&event) {
        return;
    }

    // The envelope's authorization is the bot's identity on this workspace;
    // fall back to the id resolved at startup.
    let bot_user_id = envelope
        .authorizations
        .first()
        .and_then(|auth| auth.user_id.clone())
        .or_else(|| state.bot_user_id.clone());

    let Some(user_id) = event.user.clone().filter(|id| !id.is_empty()) else {
        return;
    };
    if bot_user_id.as_deref() == Some(user_id.as_str()) {
        return;
    }

    let team_id = event
        .team
        .clone()
        .or(envelope.team_id)
        .unwrap_or_default();
    let text = render::sanitise_text(
        event.text.as_deref().unwrap_or(""),
        bot_user_id.as_deref(),
    );

    let cid = render::correlation_id();
    let submission = IntentSubmission {
        user_id,
        team_id,
        text,
        correlation_id: cid.clone(),
    };
    let result = submit(state, submission).await;

    let Some(channel) = event.channel else { return };
    let reply = render::format_response(&result, &cid);
    let slack = state.slack.clone();
    tokio::spawn(async move {
        if let Err(err) = slack.post_message(&channel, &reply).await {
            warn!(correlation_id = %cid, "unable to deliver response: {err:#}");
        }
    });
}

fn is_actionable(event: &InboundEvent) -> bool {
    match event.kind.as_str() {
        "app_mention" => true,
        "message" => event.channel_type.as_deref() == Some("im"),
        _ => false,
    }
}

async fn submit(state: &AppState, submission: IntentSubmission) -> IntentResult {
    let correlation_id = submission.correlation_id.clone();
    let result = {
        let mut core = state.core.lock().await;
        core.handle_intent(submission)
    };
    info!(
        correlation_id = %correlation_id,
        accepted = result.accepted,
        "intent handled"
    );
    result
}
