//! Failure behavior: cycles degrade per calendar, never abort.

use crate::prelude::*;
use cw_core::FiringKind;
use cw_engine::EngineError;
use cw_rules::parse_rules;

#[tokio::test]
async fn a_failing_calendar_is_skipped_and_recovers_cleanly() {
    let mut w = World::new("[[change]]\nname = \"watch\"\n", at(9, 0));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 0)).await;

    w.source.fail_next_reads("work", 1);
    let report = w.poll_at(at(9, 1)).await;
    assert_eq!(report.skipped, vec!["work"]);
    assert_eq!(report.errors.len(), 1);

    // The snapshot was retained through the outage: recovery with the
    // same contents reports nothing.
    let report = w.poll_at(at(9, 2)).await;
    assert!(report.firings.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn other_calendars_keep_firing_through_an_outage() {
    let mut w = World::new(
        "[[event]]\nname = \"any\"\nmatch_end = false\n",
        at(9, 55),
    );
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.source
        .set_events("home", vec![timed("b", "home", "Dentist", at(10, 0), 30)]);
    w.poll_at(at(9, 55)).await;

    w.source.fail_next_reads("home", 1);
    w.poll_at(at(10, 0)).await;

    assert_eq!(
        w.fired(),
        vec![("any".to_string(), FiringKind::Start, "a".to_string())]
    );
}

#[tokio::test]
async fn host_rejection_does_not_block_later_firings() {
    let mut w = World::new(
        "[[event]]\nname = \"any\"\nmatch_end = false\n",
        at(9, 55),
    );
    w.source.set_events(
        "work",
        vec![
            timed("a", "work", "First", at(10, 0), 15),
            timed("b", "work", "Second", at(10, 0), 15),
        ],
    );
    w.poll_at(at(9, 55)).await;

    w.host.fail_next(1);
    let report = w.poll_at(at(10, 0)).await;

    // Both firings were attempted; one landed.
    assert_eq!(report.firings.len(), 2);
    assert_eq!(w.host.firings().len(), 1);
    assert!(matches!(report.errors[0], EngineError::HostDispatch { .. }));
}

#[tokio::test]
async fn script_failure_leaves_the_firing_delivered() {
    let toml = "[[event]]\nname = \"scripted\"\nmatch_end = false\nexecute_notes = true\n";
    let mut w = World::new(toml, at(9, 55));
    let mut ev = timed("a", "work", "Standup", at(10, 0), 15);
    ev.notes = Some("broken-command".to_string());
    w.source.set_events("work", vec![ev]);
    w.poll_at(at(9, 55)).await;

    w.scripts.fail_next(1);
    let report = w.poll_at(at(10, 0)).await;

    assert_eq!(w.host.firings().len(), 1);
    assert!(matches!(report.errors[0], EngineError::Script { .. }));
}

#[tokio::test]
async fn rules_swapped_mid_run_take_effect_next_cycle() {
    let mut w = World::new(
        "[[event]]\nname = \"old\"\nmatch_end = false\n",
        at(9, 55),
    );
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 55)).await;

    w.handle
        .replace(parse_rules("[[change]]\nname = \"watch\"\n").unwrap());
    w.source.set_events(
        "work",
        vec![
            timed("a", "work", "Standup", at(10, 0), 15),
            timed("b", "work", "Review", at(14, 0), 60),
        ],
    );
    w.poll_at(at(10, 0)).await;

    // The old event rule is gone; only the change rule fires.
    assert_eq!(
        w.fired(),
        vec![("watch".to_string(), FiringKind::Inserted, "b".to_string())]
    );
}

#[tokio::test]
async fn a_vanished_calendar_is_pruned_and_primes_silently_on_return() {
    let mut w = World::new("[[change]]\nname = \"watch\"\n", at(9, 0));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.source.set_events("keep", vec![]);
    w.poll_at(at(9, 0)).await;

    // The calendar disappears from discovery entirely.
    w.source.remove_calendar("work");
    w.poll_at(at(9, 1)).await;
    assert!(w.fired().is_empty());

    // It comes back with the same contents: primed silently again.
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 2)).await;
    assert!(w.fired().is_empty());
}
