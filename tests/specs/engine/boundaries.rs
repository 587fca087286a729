//! Event-boundary triggers: start and end crossings, duration
//! classes, filter components.

use crate::prelude::*;
use cw_core::FiringKind;

const STANDUP_RULE: &str = r#"
[[event]]
name = "standup"
title = "standup"
match_end = false
"#;

#[tokio::test]
async fn standup_fires_when_its_start_passes() {
    let mut w = World::new(STANDUP_RULE, at(9, 55));
    w.source.set_events(
        "work",
        vec![timed("s1", "work", "Daily Standup", at(10, 0), 15)],
    );

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(9, 59)).await;
    assert!(w.fired().is_empty());

    w.poll_at(at(10, 0)).await;
    assert_eq!(
        w.fired(),
        vec![("standup".to_string(), FiringKind::Start, "s1".to_string())]
    );
}

#[tokio::test]
async fn a_fired_start_never_fires_again() {
    let mut w = World::new(STANDUP_RULE, at(9, 55));
    w.source.set_events(
        "work",
        vec![timed("s1", "work", "Daily Standup", at(10, 0), 15)],
    );

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;
    w.poll_at(at(10, 1)).await;
    w.poll_at(at(10, 30)).await;

    assert_eq!(w.fired().len(), 1);
}

#[tokio::test]
async fn start_and_end_both_fire_for_an_unfiltered_rule() {
    let mut w = World::new("[[event]]\nname = \"any\"\n", at(9, 55));
    w.source
        .set_events("work", vec![timed("s1", "work", "Standup", at(10, 0), 15)]);

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;
    w.poll_at(at(10, 15)).await;

    assert_eq!(
        w.fired(),
        vec![
            ("any".to_string(), FiringKind::Start, "s1".to_string()),
            ("any".to_string(), FiringKind::End, "s1".to_string()),
        ]
    );
}

#[tokio::test]
async fn a_missed_boundary_fires_on_the_next_cycle() {
    // Polls are sparse; the window between them still covers 10:00.
    let mut w = World::new(STANDUP_RULE, at(9, 30));
    w.source.set_events(
        "work",
        vec![timed("s1", "work", "Daily Standup", at(10, 0), 15)],
    );

    w.poll_at(at(9, 30)).await;
    w.poll_at(at(10, 7)).await;

    assert_eq!(w.fired().len(), 1);
}

#[tokio::test]
async fn title_match_is_case_insensitive_substring() {
    let mut w = World::new(STANDUP_RULE, at(9, 55));
    w.source.set_events(
        "work",
        vec![
            timed("s1", "work", "STANDUP (eng)", at(10, 0), 15),
            timed("s2", "work", "Coffee", at(10, 0), 15),
        ],
    );

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    let fired = w.fired();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].2, "s1");
}

#[tokio::test]
async fn allday_only_rule_skips_timed_events() {
    let toml = "[[event]]\nname = \"days\"\nmatch_hourly = false\nmatch_end = false\n";
    let mut w = World::new(toml, at(23, 55));
    w.source.set_events(
        "work",
        vec![
            all_day("holiday", "work", "Holiday", at(0, 0) + chrono::Duration::days(1)),
            timed("meeting", "work", "Meeting", at(0, 5) + chrono::Duration::days(1), 30),
        ],
    );

    w.poll_at(at(23, 55)).await;
    w.poll_at(at(0, 10) + chrono::Duration::days(1)).await;

    let fired = w.fired();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].2, "holiday");
}

#[tokio::test]
async fn timed_event_spanning_a_day_belongs_to_no_class() {
    let mut w = World::new("[[event]]\nname = \"any\"\n", at(9, 55));
    w.source.set_events(
        "work",
        vec![timed("offsite", "work", "Offsite", at(10, 0), 60 * 25)],
    );

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    assert!(w.fired().is_empty());
}

#[tokio::test]
async fn multiple_rules_fire_in_file_order() {
    let toml = r#"
[[event]]
name = "first"
match_end = false

[[event]]
name = "second"
match_end = false
"#;
    let mut w = World::new(toml, at(9, 55));
    w.source
        .set_events("work", vec![timed("s1", "work", "Standup", at(10, 0), 15)]);

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    let triggers: Vec<_> = w.fired().into_iter().map(|(t, _, _)| t).collect();
    assert_eq!(triggers, vec!["first", "second"]);
}

#[tokio::test]
async fn notes_script_runs_after_the_host_sees_the_firing() {
    let toml = r#"
[[event]]
name = "scripted"
match_end = false
execute_notes = true
"#;
    let mut w = World::new(toml, at(9, 55));
    let mut ev = timed("s1", "work", "Standup", at(10, 0), 15);
    ev.notes = Some("notify-team".to_string());
    w.source.set_events("work", vec![ev]);

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    assert_eq!(w.fired().len(), 1);
    let calls = w.scripts.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].script, "notify-team");
    assert_eq!(calls[0].event_uid, "s1");
}
