use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted instruction, exactly as written to the ledger.
///
/// Constructed once at acceptance time and never mutated; it only leaves
/// the ledger by eviction when capacity overflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    pub user_id: String,
    pub team_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: String,
}

/// Normalized inbound tuple handed to the core by the gateway.
///
/// Mention markup is already stripped and the text trimmed before this is
/// built. `user_id` is guaranteed non-empty by the inbound adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSubmission {
    pub user_id: String,
    pub team_id: String,
    pub text: String,
    pub correlation_id: String,
}

/// Outcome of a single `handle_intent` call.
///
/// `memory` is the ledger's newest-first snapshot taken after any append
/// performed by the same call, on rejection as well as acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub accepted: bool,
    pub message: String,
    pub memory: Vec<IntentRecord>,
}
