//! Change triggers: snapshot diffing between polls.

use crate::prelude::*;
use cw_core::FiringKind;

const ANY_CHANGE: &str = "[[change]]\nname = \"watch\"\n";

#[tokio::test]
async fn startup_load_is_silent() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    w.source.set_events(
        "work",
        vec![
            timed("a", "work", "Standup", at(10, 0), 15),
            timed("b", "work", "Review", at(14, 0), 60),
        ],
    );

    let report = w.poll_at(at(9, 0)).await;

    assert!(report.firings.is_empty());
    assert!(w.fired().is_empty());
}

#[tokio::test]
async fn an_added_event_fires_inserted() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 0)).await;

    w.source.set_events(
        "work",
        vec![
            timed("a", "work", "Standup", at(10, 0), 15),
            timed("b", "work", "Review", at(14, 0), 60),
        ],
    );
    w.poll_at(at(9, 1)).await;

    assert_eq!(
        w.fired(),
        vec![("watch".to_string(), FiringKind::Inserted, "b".to_string())]
    );
}

#[tokio::test]
async fn a_deleted_event_fires_removed_with_its_last_contents() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 0)).await;

    w.source.set_events("work", vec![]);
    w.poll_at(at(9, 1)).await;

    let firings = w.host.firings();
    assert_eq!(firings.len(), 1);
    assert_eq!(firings[0].kind, FiringKind::Removed);
    assert_eq!(firings[0].event.title, "Standup");
}

#[tokio::test]
async fn a_rescheduled_event_fires_changed_not_removed_plus_inserted() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.poll_at(at(9, 0)).await;

    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(11, 0), 15)]);
    w.poll_at(at(9, 1)).await;

    let firings = w.host.firings();
    assert_eq!(firings.len(), 1);
    assert_eq!(firings[0].kind, FiringKind::Changed);
    assert_eq!(firings[0].event.start, at(11, 0));
}

#[tokio::test]
async fn an_unchanged_calendar_fires_nothing() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    let events = vec![timed("a", "work", "Standup", at(10, 0), 15)];
    w.source.set_events("work", events);
    w.poll_at(at(9, 0)).await;
    w.poll_at(at(9, 1)).await;
    w.poll_at(at(9, 2)).await;

    assert!(w.fired().is_empty());
}

#[tokio::test]
async fn change_filters_apply_to_the_current_contents() {
    let toml = "[[change]]\nname = \"standups\"\ntitle = \"standup\"\n";
    let mut w = World::new(toml, at(9, 0));
    w.source.set_events("work", vec![]);
    w.poll_at(at(9, 0)).await;

    w.source.set_events(
        "work",
        vec![
            timed("a", "work", "Daily Standup", at(10, 0), 15),
            timed("b", "work", "Lunch", at(12, 0), 60),
        ],
    );
    w.poll_at(at(9, 1)).await;

    assert_eq!(
        w.fired(),
        vec![("standups".to_string(), FiringKind::Inserted, "a".to_string())]
    );
}

#[tokio::test]
async fn a_future_event_change_is_detected_before_it_starts() {
    // Change detection covers the whole upcoming set, not just events
    // near the poll window.
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    w.source
        .set_events("work", vec![timed("far", "work", "Planning", at(17, 0), 60)]);
    w.poll_at(at(9, 0)).await;

    let mut moved = timed("far", "work", "Planning", at(17, 0), 60);
    moved.location = Some("Room 9".to_string());
    w.source.set_events("work", vec![moved]);
    w.poll_at(at(9, 1)).await;

    assert_eq!(w.fired().len(), 1);
    assert_eq!(w.fired()[0].1, FiringKind::Changed);
}

#[tokio::test]
async fn recurrence_instances_change_independently() {
    let mut w = World::new(ANY_CHANGE, at(9, 0));
    let mut monday = timed("weekly", "work", "Sync", at(10, 0), 30);
    monday.occurrence = Some(at(10, 0));
    let mut tuesday = timed("weekly", "work", "Sync", at(10, 0) + chrono::Duration::days(1), 30);
    tuesday.occurrence = Some(at(10, 0) + chrono::Duration::days(1));
    w.source.set_events("work", vec![monday.clone(), tuesday]);
    w.poll_at(at(9, 0)).await;

    // Cancel only Tuesday's instance.
    w.source.set_events("work", vec![monday]);
    w.poll_at(at(9, 1)).await;

    let firings = w.host.firings();
    assert_eq!(firings.len(), 1);
    assert_eq!(firings[0].kind, FiringKind::Removed);
    assert_eq!(
        firings[0].event.occurrence,
        Some(at(10, 0) + chrono::Duration::days(1))
    );
}
