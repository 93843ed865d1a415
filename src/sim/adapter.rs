//! Delivery layer around one simulator.
//!
//! Two consumption modes over the same log: synchronous run-to-completion
//! for archival replay generation, and a cooperative real-time loop that
//! hands each event to a subscriber as it is produced. The engine itself
//! never sleeps; pacing lives here.

use std::thread;
use std::time::Duration;

use super::simulator::{MatchResult, MatchSimulator, MatchState};
use crate::model::event::GameEvent;

/// Subscriber verdict for each delivered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveControl {
    Continue,
    /// Abort the match. Cancellation lands between ticks, and the log is
    /// always finalized with the terminal event before the loop returns.
    Stop,
}

pub struct MatchAdapter {
    sim: MatchSimulator,
    cursor: usize,
}

impl MatchAdapter {
    pub fn new(sim: MatchSimulator) -> Self {
        Self { sim, cursor: 0 }
    }

    /// Archival path: run synchronously to completion and return the full
    /// ordered event array plus the final snapshot.
    pub fn run_replay(mut self) -> (Vec<GameEvent>, MatchResult) {
        let result = self.sim.run_to_end().clone();
        (self.sim.events().events().to_vec(), result)
    }

    /// Live path: tick on a cooperative timer, delivering each new event to
    /// the subscriber in emission order. The subscriber can return
    /// [`LiveControl::Stop`] to abort; the terminal event is still produced
    /// and delivered.
    pub fn run_live<F>(&mut self, tick_duration: Duration, mut deliver: F) -> &MatchResult
    where
        F: FnMut(&GameEvent) -> LiveControl,
    {
        if self.sim.state() == MatchState::Setup {
            self.sim.start();
        }
        loop {
            let mut stop = false;
            while self.cursor < self.sim.events().len() {
                let event = &self.sim.events().events()[self.cursor];
                self.cursor += 1;
                if deliver(event) == LiveControl::Stop {
                    stop = true;
                    break;
                }
            }
            if stop {
                self.sim.abort();
                // Drain the finalization; the subscriber no longer steers.
                while self.cursor < self.sim.events().len() {
                    let _ = deliver(&self.sim.events().events()[self.cursor]);
                    self.cursor += 1;
                }
                break;
            }
            if self.sim.state() == MatchState::Ended {
                break;
            }
            if !tick_duration.is_zero() {
                thread::sleep(tick_duration);
            }
            self.sim.tick();
        }
        self.sim
            .result()
            .expect("live loop only exits on a finalized match")
    }

    pub fn simulator(&self) -> &MatchSimulator {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::champion::Role;
    use crate::model::event::EventKind;
    use crate::roster::{ChampionSpec, TeamRoster};
    use crate::sim::simulator::MatchConfig;

    fn rosters() -> (TeamRoster, TeamRoster) {
        let mut blue = TeamRoster::new("Blue Team");
        blue.champions
            .push(ChampionSpec::standard("Aster", Role::Mid));
        blue.champions
            .push(ChampionSpec::standard("Oak", Role::Top));
        let mut red = TeamRoster::new("Red Team");
        red.champions
            .push(ChampionSpec::standard("Briar", Role::Mid));
        red.champions
            .push(ChampionSpec::standard("Slate", Role::Top));
        (blue, red)
    }

    fn sim(seed: u64) -> MatchSimulator {
        let (blue, red) = rosters();
        MatchSimulator::new(MatchConfig::new(seed), &blue, &red)
    }

    #[test]
    fn live_delivery_equals_archival_order() {
        let mut live = MatchAdapter::new(sim(31));
        let mut delivered = Vec::new();
        live.run_live(Duration::ZERO, |event| {
            delivered.push(event.clone());
            LiveControl::Continue
        });

        let (archived, _) = MatchAdapter::new(sim(31)).run_replay();
        assert_eq!(delivered.len(), archived.len());
        assert_eq!(delivered, archived);
    }

    #[test]
    fn every_event_delivered_exactly_once() {
        let mut adapter = MatchAdapter::new(sim(32));
        let mut count = 0usize;
        adapter.run_live(Duration::ZERO, |_| {
            count += 1;
            LiveControl::Continue
        });
        assert_eq!(count, adapter.simulator().events().len());
    }

    #[test]
    fn stop_aborts_and_still_finalizes() {
        let mut adapter = MatchAdapter::new(sim(33));
        let mut delivered = Vec::new();
        let result = adapter
            .run_live(Duration::ZERO, |event| {
                delivered.push(event.clone());
                if delivered.len() == 25 {
                    LiveControl::Stop
                } else {
                    LiveControl::Continue
                }
            })
            .clone();
        let last = delivered.last().unwrap();
        assert!(
            matches!(last.kind, EventKind::MatchEnd { .. }),
            "aborted feed must end with the terminal event"
        );
        assert_eq!(adapter.simulator().state(), MatchState::Ended);
        assert_eq!(result.champions.len(), 4);
        // The aborted run is far shorter than a full one.
        let (full, _) = MatchAdapter::new(sim(33)).run_replay();
        assert!(delivered.len() < full.len());
    }

    #[test]
    fn replay_result_has_final_snapshot() {
        let (events, result) = MatchAdapter::new(sim(34)).run_replay();
        assert!(!events.is_empty());
        assert!(matches!(
            events.last().unwrap().kind,
            EventKind::MatchEnd { .. }
        ));
        assert_eq!(result.champions.len(), 4);
        assert_eq!(result.teams.len(), 2);
    }
}
