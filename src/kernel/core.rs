use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::ledger::{VolitionLedger, RECENT_LIMIT};
use super::record::{IntentRecord, IntentResult, IntentSubmission};

const MSG_UNTRUSTED: &str = "I am scoped to trusted workspaces only. \
    Ask an admin to add this workspace to TRUSTED_WORKSPACE_IDS.";
const MSG_DUPLICATE: &str = "I already have that request on my queue.";
const MSG_ACCEPTED: &str = "Intent acknowledged. Logging it to my volition ledger now.";

/// Rate-limit knobs plus the workspace allow-list.
///
/// An empty `trusted_workspaces` set means every workspace is accepted.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    pub duplicate_window: Duration,
    pub cooldown: Duration,
    pub trusted_workspaces: HashSet<String>,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            duplicate_window: Duration::minutes(3),
            cooldown: Duration::seconds(20),
            trusted_workspaces: HashSet::new(),
        }
    }
}

/// Admission gates in evaluation order. The first gate that rejects wins,
/// so a duplicate inside both windows is reported as a duplicate, and a
/// non-duplicate inside the cooldown is reported as cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Trust,
    Duplicate,
    Cooldown,
}

const GATES: [Gate; 3] = [Gate::Trust, Gate::Duplicate, Gate::Cooldown];

/// The admission engine. Owns the ledger and decides, per submission,
/// whether to accept it.
///
/// Rejections are ordinary values, never errors. The engine has no other
/// mutable state; every rate-limit decision derives from the ledger's
/// per-user last record.
pub struct VolitionCore {
    ledger: VolitionLedger,
    policy: AdmissionPolicy,
    clock: Box<dyn Clock>,
}

impl VolitionCore {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self::with_clock(policy, Box::new(SystemClock))
    }

    pub fn with_clock(policy: AdmissionPolicy, clock: Box<dyn Clock>) -> Self {
        Self {
            ledger: VolitionLedger::new(),
            policy,
            clock,
        }
    }

    pub fn ledger(&self) -> &VolitionLedger {
        &self.ledger
    }

    /// Run the submission through the gates; append and acknowledge if all
    /// of them pass.
    ///
    /// The clock is read once here and reused for every comparison in the
    /// call. Callers sharing one core across tasks must hold their lock for
    /// the whole call: the read-check-append sequence is one critical
    /// section.
    pub fn handle_intent(&mut self, submission: IntentSubmission) -> IntentResult {
        let now = self.clock.now();
        let last = self.ledger.last_for_user(&submission.user_id).cloned();

        for gate in GATES {
            if let Some(message) = self.evaluate(gate, &submission, last.as_ref(), now) {
                debug!(
                    correlation_id = %submission.correlation_id,
                    user = %submission.user_id,
                    gate = ?gate,
                    "intent rejected"
                );
                return IntentResult {
                    accepted: false,
                    message,
                    memory: self.ledger.recent(RECENT_LIMIT),
                };
            }
        }

        let record = IntentRecord {
            user_id: submission.user_id,
            team_id: submission.team_id,
            text: submission.text,
            timestamp: now,
            correlation_id: submission.correlation_id,
        };
        info!(
            correlation_id = %record.correlation_id,
            user = %record.user_id,
            "intent accepted"
        );
        self.ledger.append(record);

        IntentResult {
            accepted: true,
            message: MSG_ACCEPTED.to_string(),
            memory: self.ledger.recent(RECENT_LIMIT),
        }
    }

    /// One gate's verdict: `Some(reason)` rejects, `None` passes.
    fn evaluate(
        &self,
        gate: Gate,
        submission: &IntentSubmission,
        last: Option<&IntentRecord>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        match gate {
            Gate::Trust => {
                let trusted = &self.policy.trusted_workspaces;
                if trusted.is_empty() || trusted.contains(&submission.team_id) {
                    None
                } else {
                    Some(MSG_UNTRUSTED.to_string())
                }
            }
            Gate::Duplicate => {
                let last = last?;
                let same_text = last.text.trim() == submission.text.trim();
                let within = now - last.timestamp <= self.policy.duplicate_window;
                (same_text && within).then(|| MSG_DUPLICATE.to_string())
            }
            Gate::Cooldown => {
                let last = last?;
                let elapsed = now - last.timestamp;
                if elapsed <= self.policy.cooldown {
                    // num_seconds truncates toward zero: announce the floor
                    // of the remaining duration.
                    let remaining = (self.policy.cooldown - elapsed).num_seconds();
                    Some(format!(
                        "Hold on. Give me about {remaining} more seconds \
                         before sending another instruction."
                    ))
                } else {
                    None
                }
            }
        }
    }
}
