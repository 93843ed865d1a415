//! The persistence boundary: save, load, and fold stored feeds.

use std::fs;
use std::io::Write;

use match_gen::replay::{self, Replay, ReplayError};
use match_gen::scenario::Scenario;
use match_gen::sim::MatchConfig;
use match_gen::{MatchAdapter, Role};

fn archived_events() -> Vec<match_gen::GameEvent> {
    let scenario = Scenario::mirrored_duel(Role::Mid);
    let adapter = MatchAdapter::new(scenario.simulator(MatchConfig::new(808)));
    let (events, _) = adapter.run_replay();
    events
}

#[test]
fn save_then_load_round_trips() {
    let events = archived_events();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match_808.jsonl");
    replay::save_replay(&path, &events).unwrap();
    let loaded = replay::load_replay(&path).unwrap();
    assert_eq!(loaded, events);
}

#[test]
fn missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_match.jsonl");
    match replay::load_replay(&path) {
        Err(ReplayError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn corrupt_file_reports_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.jsonl");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "{{\"tick\": 1, \"type\": \"not a real event\"").unwrap();
    match replay::load_replay(&path) {
        Err(ReplayError::Invalid(message)) => {
            assert!(message.contains("line 1"), "message was: {message}");
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn scrubbing_matches_full_folds() {
    let events = archived_events();
    let replay = Replay::new(events.clone(), 50);
    // Spot-check scrub positions against a from-scratch fold.
    for index in [0usize, 1, 49, 50, 51, events.len() - 1] {
        if index >= events.len() {
            continue;
        }
        let direct = replay::fold(&events[..=index]);
        assert_eq!(replay.state_at(index), direct, "scrub mismatch at {index}");
    }
}

#[test]
fn folded_final_state_matches_simulation_aggregates() {
    let scenario = Scenario::mirrored_duel(Role::Mid);
    let mut sim = scenario.simulator(MatchConfig::new(808));
    let result = sim.run_to_end().clone();

    let replay = Replay::new(sim.events().events().to_vec(), 100);
    let state = replay.final_state();

    assert_eq!(state.winner, Some(result.winner));
    for line in &result.champions {
        let score = state
            .champions
            .get(&line.champion)
            .cloned()
            .unwrap_or_default();
        assert_eq!(score.kills, line.kills, "kills for {}", line.name);
        assert_eq!(score.deaths, line.deaths, "deaths for {}", line.name);
        assert_eq!(score.cs, line.cs, "cs for {}", line.name);
        assert_eq!(score.level, line.level, "level for {}", line.name);
        assert_eq!(score.items, line.items, "items for {}", line.name);
    }
}

#[test]
fn loaded_feed_folds_identically_to_the_original() {
    let events = archived_events();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fold_check.jsonl");
    replay::save_replay(&path, &events).unwrap();
    let loaded = replay::load_replay(&path).unwrap();
    assert_eq!(replay::fold(&loaded), replay::fold(&events));
}
