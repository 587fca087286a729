//! Rule loading behavior observed through the engine.

use crate::prelude::*;
use cw_core::FiringKind;
use cw_rules::{parse_rules, validate, RuleWarning};

#[tokio::test]
async fn a_disabled_rule_never_fires_but_its_neighbors_do() {
    let toml = r#"
[[event]]
name = "broken"
title = "([unclosed"
match_end = false

[[event]]
name = "fine"
match_end = false
"#;
    let mut w = World::new(toml, at(9, 55));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    assert_eq!(
        w.fired(),
        vec![("fine".to_string(), FiringKind::Start, "a".to_string())]
    );
}

#[tokio::test]
async fn the_all_calendar_sentinel_matches_everywhere() {
    let toml = "[[event]]\nname = \"any\"\ncalendar = \"ALL\"\nmatch_end = false\n";
    let mut w = World::new(toml, at(9, 55));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);
    w.source
        .set_events("home", vec![timed("b", "home", "Dentist", at(10, 0), 30)]);

    w.poll_at(at(9, 55)).await;
    w.poll_at(at(10, 0)).await;

    let uids: Vec<_> = w.fired().into_iter().map(|(_, _, uid)| uid).collect();
    assert_eq!(uids, vec!["b", "a"]);
}

#[test]
fn validation_flags_degenerate_rules() {
    let rules = parse_rules(
        r#"
[[event]]
name = "dead"
match_start = false
match_end = false

[[event]]
name = "classless"
match_hourly = false
match_allday = false
"#,
    )
    .unwrap();

    let warnings = validate(&rules);
    assert!(warnings
        .iter()
        .any(|w| matches!(w, RuleWarning::NoEdgeSelected(_))));
    assert!(warnings
        .iter()
        .any(|w| matches!(w, RuleWarning::NoDurationClass(_))));
}

#[tokio::test]
async fn an_empty_rule_file_polls_without_firing() {
    let mut w = World::new("", at(9, 55));
    w.source
        .set_events("work", vec![timed("a", "work", "Standup", at(10, 0), 15)]);

    w.poll_at(at(9, 55)).await;
    let report = w.poll_at(at(10, 0)).await;

    assert!(report.firings.is_empty());
    assert!(report.errors.is_empty());
}
