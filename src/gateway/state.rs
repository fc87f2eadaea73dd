//! Shared application state for the gateway.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::client::SlackClient;
use crate::config::GatewayConfig;
use crate::kernel::core::VolitionCore;

/// State injected into every handler.
///
/// The core sits behind a single async lock. One `handle_intent` call is a
/// read-check-append critical section: two concurrent submissions from the
/// same user must not both observe "no recent record" and both pass the
/// cooldown gate. The call itself is pure CPU work, so the section is
/// always short.
#[derive(Clone)]
pub struct AppState {
    pub core: Arc<Mutex<VolitionCore>>,
    pub slack: SlackClient,
    pub signing_secret: String,
    pub bot_user_id: Option<String>,
}

impl AppState {
    pub fn new(config: &GatewayConfig, slack: SlackClient, bot_user_id: Option<String>) -> Self {
        Self {
            core: Arc::new(Mutex::new(VolitionCore::new(config.admission_policy()))),
            slack,
            signing_secret: config.signing_secret.clone(),
            bot_user_id,
        }
    }
}
