use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use volition::kernel::clock::Clock;
use volition::kernel::core::{AdmissionPolicy, VolitionCore};
use volition::kernel::record::IntentSubmission;

/// Manually advanced clock so tests control time without real delay.
#[derive(Clone)]
struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            )),
        }
    }

    fn advance(&self, seconds: i64) {
        *self.now.lock().unwrap() += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

fn core_with(policy: AdmissionPolicy) -> (VolitionCore, ManualClock) {
    let clock = ManualClock::new();
    let core = VolitionCore::with_clock(policy, Box::new(clock.clone()));
    (core, clock)
}

fn submission(user: &str, team: &str, text: &str, cid: &str) -> IntentSubmission {
    IntentSubmission {
        user_id: user.to_string(),
        team_id: team.to_string(),
        text: text.to_string(),
        correlation_id: cid.to_string(),
    }
}

#[test]
fn accepts_first_intent() {
    let (mut core, _clock) = core_with(AdmissionPolicy::default());

    let result = core.handle_intent(submission("U1", "T1", "Plan the weekly standup", "abc123"));

    assert!(result.accepted);
    assert_eq!(result.memory[0].text, "Plan the weekly standup");
    assert_eq!(result.memory[0].correlation_id, "abc123");
    assert_eq!(core.ledger().len(), 1);
}

#[test]
fn rejects_duplicate_within_window() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        duplicate_window: Duration::minutes(5),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "Send the latest metrics", "c1"));
    clock.advance(120);
    let result = core.handle_intent(submission("U1", "T1", "Send the latest metrics", "c2"));

    assert!(!result.accepted);
    assert!(result.message.to_lowercase().contains("already"));
    assert_eq!(core.ledger().len(), 1);
}

#[test]
fn enforces_cooldown_and_reports_remaining_seconds() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        cooldown: Duration::seconds(45),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "Summarise the channel", "c1"));
    clock.advance(20);
    let result = core.handle_intent(submission("U1", "T1", "Look up release notes", "c2"));

    assert!(!result.accepted);
    assert!(result.message.contains("25"));
    assert!(result.message.to_lowercase().contains("seconds"));
    assert_eq!(core.ledger().len(), 1);
}

#[test]
fn cooldown_boundary_is_inclusive() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        cooldown: Duration::seconds(20),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "First instruction", "c1"));
    clock.advance(20);
    let result = core.handle_intent(submission("U1", "T1", "Second instruction", "c2"));

    assert!(!result.accepted);
    assert!(result.message.contains('0'));
}

#[test]
fn accepts_after_cooldown_expires() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        cooldown: Duration::seconds(20),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "First instruction", "c1"));
    clock.advance(21);
    let result = core.handle_intent(submission("U1", "T1", "Second instruction", "c2"));

    assert!(result.accepted);
    assert_eq!(core.ledger().len(), 2);
}

#[test]
fn rejects_untrusted_workspace_without_mutating_ledger() {
    let (mut core, _clock) = core_with(AdmissionPolicy {
        trusted_workspaces: HashSet::from(["TRUSTED".to_string()]),
        ..AdmissionPolicy::default()
    });

    let result = core.handle_intent(submission("U2", "UNTRUSTED", "Deploy to prod", "c3"));

    assert!(!result.accepted);
    assert!(result.message.to_lowercase().contains("trusted"));
    assert!(result.memory.is_empty());
    assert_eq!(core.ledger().len(), 0);
}

#[test]
fn empty_trusted_set_accepts_any_workspace() {
    let (mut core, _clock) = core_with(AdmissionPolicy::default());

    let result = core.handle_intent(submission("U1", "ANYTEAM", "Hello there", "c1"));

    assert!(result.accepted);
}

#[test]
fn duplicate_is_reported_before_cooldown() {
    // Same text, inside both windows: the duplicate gate wins the tie.
    let (mut core, clock) = core_with(AdmissionPolicy {
        duplicate_window: Duration::minutes(5),
        cooldown: Duration::seconds(45),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "Restart the worker", "c1"));
    clock.advance(10);
    let result = core.handle_intent(submission("U1", "T1", "Restart the worker", "c2"));

    assert!(!result.accepted);
    assert!(result.message.to_lowercase().contains("already"));
    assert!(!result.message.contains("more seconds"));
}

#[test]
fn duplicate_matching_ignores_surrounding_whitespace() {
    let (mut core, clock) = core_with(AdmissionPolicy::default());

    core.handle_intent(submission("U1", "T1", "ship the release", "c1"));
    clock.advance(30);
    let result = core.handle_intent(submission("U1", "T1", "  ship the release  ", "c2"));

    assert!(!result.accepted);
    assert!(result.message.to_lowercase().contains("already"));
}

#[test]
fn memory_shows_the_new_record_on_acceptance() {
    let (mut core, clock) = core_with(AdmissionPolicy::default());

    core.handle_intent(submission("U1", "T1", "First", "c1"));
    clock.advance(60);
    let result = core.handle_intent(submission("U2", "T1", "Second", "c2"));

    assert!(result.accepted);
    assert_eq!(result.memory.len(), 2);
    assert_eq!(result.memory[0].correlation_id, "c2");
    assert_eq!(result.memory[1].correlation_id, "c1");
}

#[test]
fn memory_is_unchanged_history_on_rejection() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        cooldown: Duration::seconds(45),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "First", "c1"));
    clock.advance(5);
    let result = core.handle_intent(submission("U1", "T1", "Second", "c2"));

    assert!(!result.accepted);
    assert_eq!(result.memory.len(), 1);
    assert_eq!(result.memory[0].correlation_id, "c1");
}

#[test]
fn cooldown_tracks_users_independently() {
    let (mut core, clock) = core_with(AdmissionPolicy {
        cooldown: Duration::seconds(45),
        ..AdmissionPolicy::default()
    });

    core.handle_intent(submission("U1", "T1", "From the first user", "c1"));
    clock.advance(5);
    let result = core.handle_intent(submission("U2", "T1", "From another user", "c2"));

    assert!(result.accepted);
    assert_eq!(core.ledger().len(), 2);
}
