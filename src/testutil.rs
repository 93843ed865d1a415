//! Shared helpers for unit and integration tests.

use crate::model::event::{EventKind, GameEvent};
use crate::model::event_log::EventLog;
use crate::model::world::World;
use crate::rng::RngStream;
use crate::sim::{GameSystem, MatchPhase, TickContext};

/// Run one system for a single tick against a shared root stream.
/// Returns the events the system emitted.
pub fn tick_system(
    world: &mut World,
    system: &mut dyn GameSystem,
    rng: &mut RngStream,
    tick: u64,
    phase: MatchPhase,
) -> EventLog {
    world.tick = tick;
    let mut events = EventLog::new();
    let mut ctx = TickContext {
        world,
        rng,
        events: &mut events,
        phase,
    };
    if system.active_in(phase) {
        system.update(&mut ctx);
    }
    events
}

/// Serialize an event slice to canonical JSONL for byte-level comparison.
pub fn serialize_log(events: &[GameEvent]) -> String {
    events
        .iter()
        .map(|e| serde_json::to_string(e).expect("events serialize"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Count events matching a predicate.
pub fn count_events(events: &[GameEvent], predicate: impl Fn(&EventKind) -> bool) -> usize {
    events.iter().filter(|e| predicate(&e.kind)).count()
}

/// Assert two logs are byte-identical once serialized.
pub fn assert_logs_identical(a: &[GameEvent], b: &[GameEvent]) {
    assert_eq!(
        a.len(),
        b.len(),
        "log length mismatch: {} vs {}",
        a.len(),
        b.len()
    );
    assert_eq!(serialize_log(a), serialize_log(b), "serialized logs differ");
}

/// Total kills across every champion in the world.
pub fn total_kills(world: &World) -> u32 {
    world.champions.values().map(|c| c.stats.kills).sum()
}

/// Total deaths across every champion in the world.
pub fn total_deaths(world: &World) -> u32 {
    world.champions.values().map(|c| c.stats.deaths).sum()
}
