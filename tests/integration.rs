// SPDX-License-Identifier: MPL-2.0
use std::collections::HashSet;
use std::time::Duration;

use feedback_hub::config::{self, Config};
use feedback_hub::confirmation::{ConfirmationOptions, ConfirmationState, SingleFlightPolicy};
use feedback_hub::diagnostics::{DiagnosticsCollector, FeedbackEventKind};
use feedback_hub::notifications::Severity;
use feedback_hub::FeedbackContext;
use tempfile::tempdir;

fn traced(config: &Config) -> (FeedbackContext, DiagnosticsCollector) {
    let (context, collector) = FeedbackContext::from_config(config);
    (context, collector.expect("diagnostics enabled by default"))
}

#[tokio::test(start_paused = true)]
async fn repeated_notify_yields_independent_timed_items() {
    let context = FeedbackContext::default();

    context.notify("Saved", Severity::Success);
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    context.notify("Saved", Severity::Success);

    let items = context.active_notifications();
    assert_eq!(items.len(), 2);
    assert_ne!(items[0].id(), items[1].id());
    assert!(items.iter().all(|n| n.message() == "Saved"));
    assert!(items.iter().all(|n| n.severity() == Severity::Success));
    for item in &items {
        assert_eq!(item.expires_at() - item.created_at(), Duration::from_millis(3_500));
    }

    // First one expires 3.5 s after its own creation, second one 1 s later.
    tokio::time::sleep(Duration::from_millis(2_600)).await;
    tokio::task::yield_now().await;
    let survivors = context.active_notifications();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id(), items[1].id());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    tokio::task::yield_now().await;
    assert!(context.active_notifications().is_empty());
}

#[test]
fn notifications_keep_call_order_and_unique_ids() {
    let context = FeedbackContext::default();
    for i in 0..20 {
        let severity = if i % 3 == 0 { Severity::Error } else { Severity::Success };
        context.notify(format!("event {i}"), severity);
    }

    let items = context.active_notifications();
    let ids: HashSet<_> = items.iter().map(|n| n.id()).collect();
    assert_eq!(ids.len(), 20);

    let messages: Vec<_> = items.iter().map(|n| n.message().to_string()).collect();
    let expected: Vec<_> = (0..20).map(|i| format!("event {i}")).collect();
    assert_eq!(messages, expected);
}

#[test]
fn simulated_double_expiry_removes_only_its_item() {
    let context = FeedbackContext::default();
    context.notify_success("a");
    context.notify_success("b");
    context.notify_success("c");
    let items = context.active_notifications();

    assert!(context.expire_notification(items[1].id()));
    assert!(!context.expire_notification(items[1].id()));

    let remaining: Vec<_> = context
        .active_notifications()
        .iter()
        .map(|n| n.message().to_string())
        .collect();
    assert_eq!(remaining, vec!["a", "c"]);
}

#[tokio::test]
async fn cancel_resolves_false_and_later_confirm_is_noop() {
    let context = FeedbackContext::default();
    let answer = context.request_confirmation(ConfirmationOptions::new("Delete?"));

    let pending = context.pending_confirmation().expect("dialog should be pending");
    assert_eq!(pending.message, "Delete?");
    assert_eq!(pending.confirm_label, "Delete");
    assert_eq!(pending.cancel_label, "Cancel");

    assert!(context.cancel());
    assert!(!context.confirm());
    assert_eq!(context.confirmation_state(), ConfirmationState::Idle);
    assert!(!answer.await);
}

#[tokio::test]
async fn awaiting_caller_resumes_when_presentation_answers() {
    let context = FeedbackContext::default();
    let mut updates = context.subscribe();

    let controller = {
        let context = context.clone();
        tokio::spawn(async move {
            let confirmed = context
                .request_confirmation(ConfirmationOptions::new("Remove member?").title("Team"))
                .await;
            if confirmed {
                context.notify_success("Member removed");
            }
            confirmed
        })
    };

    // Presentation layer: wait until a dialog shows up, then press confirm.
    let id = loop {
        updates.changed().await.expect("context alive");
        let pending = updates.borrow_and_update().confirmation.clone();
        if let Some(pending) = pending {
            assert_eq!(pending.title.as_deref(), Some("Team"));
            break pending.id;
        }
    };
    assert!(context.confirm_request(id));

    assert!(controller.await.expect("controller task"));
    assert_eq!(context.active_notifications()[0].message(), "Member removed");
}

#[tokio::test]
async fn second_request_supersedes_the_first_by_default() {
    let (context, mut collector) = traced(&Config::default());

    let first = context.request_confirmation(ConfirmationOptions::new("first"));
    let second = context.request_confirmation(ConfirmationOptions::new("second"));
    let (first_id, second_id) = (first.id(), second.id());

    assert!(!first.await);
    assert!(!context.cancel_request(first_id));
    assert!(context.confirm_request(second_id));
    assert!(second.await);

    collector.process_pending();
    assert!(collector.iter().any(|e| e.kind
        == FeedbackEventKind::ConfirmationSuperseded {
            cancelled: first_id,
            installed: second_id,
        }));
}

#[tokio::test]
async fn refuse_new_policy_keeps_the_first_request() {
    let mut config = Config::default();
    config.confirmation.policy = SingleFlightPolicy::RefuseNew;
    let context = FeedbackContext::new(&config);

    let first = context.request_confirmation(ConfirmationOptions::new("first"));
    let second = context.request_confirmation(ConfirmationOptions::new("second"));

    assert!(!second.await);
    assert_eq!(
        context.pending_confirmation().map(|p| p.message),
        Some("first".to_string())
    );
    context.confirm();
    assert!(first.await);
}

#[test]
fn three_producers_hold_busy_until_the_last_exits() {
    let context = FeedbackContext::default();
    let producers: Vec<_> = (0..3).map(|_| context.clone()).collect();

    for producer in &producers {
        producer.enter_busy();
    }
    assert!(context.show_busy());

    producers[0].exit_busy();
    producers[1].exit_busy();
    assert!(context.show_busy());
    assert_eq!(context.busy_count(), 1);

    producers[2].exit_busy();
    assert!(!context.show_busy());
    assert!(!context.snapshot().show_busy());
}

#[test]
fn unmatched_exit_busy_stays_at_zero() {
    let (context, mut collector) = traced(&Config::default());
    context.exit_busy();

    assert_eq!(context.busy_count(), 0);
    collector.process_pending();
    assert_eq!(collector.misuse_count(), 1);
}

#[test]
fn interleaved_busy_pairs_balance() {
    let context = FeedbackContext::default();
    let order = [0, 1, 2, 3, 4];
    let exit_order = [3, 0, 4, 2, 1];

    let guards: Vec<_> = order.iter().map(|_| context.busy_scope()).collect();
    let mut guards: Vec<Option<_>> = guards.into_iter().map(Some).collect();

    for (released, &index) in exit_order.iter().enumerate() {
        assert!(context.show_busy());
        drop(guards[index].take());
        assert_eq!(context.busy_count(), order.len() - released - 1);
    }
    assert!(!context.show_busy());
}

#[tokio::test]
async fn busy_scope_is_released_when_a_guarded_task_fails() {
    let context = FeedbackContext::default();

    let result: Result<(), &str> = {
        let _busy = context.busy_scope();
        async { Err("network down") }.await
    };
    if let Err(reason) = result {
        context.notify_error(format!("Load failed: {reason}"));
    }

    assert!(!context.show_busy());
    assert_eq!(context.active_notifications()[0].severity(), Severity::Error);
}

#[tokio::test(start_paused = true)]
async fn configured_ttl_applies_to_every_notification() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("feedback.toml");
    std::fs::write(&path, "[notifications]\nttl_ms = 1000\n").expect("write config");
    let config = config::load_from_path(&path).expect("valid config");

    let context = FeedbackContext::new(&config);
    context.notify_success("quick");

    tokio::time::sleep(Duration::from_millis(1_001)).await;
    tokio::task::yield_now().await;
    assert!(context.active_notifications().is_empty());
}

#[test]
fn diagnostics_report_covers_a_session() {
    let (context, mut collector) = traced(&Config::default());
    context.enter_busy();
    context.notify_error("Save failed");
    context.exit_busy();
    context.exit_busy();

    collector.process_pending();
    let dir = tempdir().expect("failed to create temp dir");
    let path = collector
        .export_to_file(dir.path().join("report.json"))
        .expect("export should succeed");

    let json = std::fs::read_to_string(path).expect("report written");
    assert!(json.contains("\"notification_posted\""));
    assert!(json.contains("\"busy_underflow\""));
    assert!(!json.contains("Save failed"));
}

#[test]
fn notifications_expire_on_a_runtime_without_timers() {
    let mut config = Config::default();
    config.notifications.ttl_ms = config::MIN_NOTIFICATION_TTL_MS;
    let context = FeedbackContext::new(&config);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build runtime");

    runtime.block_on(async { context.notify_success("x") });
    std::thread::sleep(Duration::from_millis(600));

    assert!(context.active_notifications().is_empty());
    assert_eq!(context.tick(), 0);
}
