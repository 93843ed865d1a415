use std::cmp::Ordering;

use super::combat::CombatSystem;
use super::context::TickContext;
use super::items::ItemSystem;
use super::lanes::LaneSystem;
use super::leveling::LevelingSystem;
use super::objectives::ObjectiveSystem;
use super::system::{GameSystem, MatchPhase};
use super::weather::WeatherSystem;
use crate::model::champion::TeamId;
use crate::model::event::{ChampionLine, EventKind, TeamTotals};
use crate::model::event_log::EventLog;
use crate::model::world::World;
use crate::rng::{self, RngStream};
use crate::roster::{self, TeamRoster};

/// Configuration for one match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub seed: u64,
    /// Hard tick cap; the match ends here if no structural win arrives.
    pub tick_limit: u64,
    /// First tick of the mid phase.
    pub mid_phase_at: u64,
    /// First tick of the late phase.
    pub late_phase_at: u64,
}

impl MatchConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tick_limit: 600,
            mid_phase_at: 180,
            late_phase_at: 400,
        }
    }

    pub fn from_str_seed(seed: &str) -> Self {
        Self::new(rng::hash_str_seed(seed))
    }

    pub fn phase_at(&self, tick: u64) -> MatchPhase {
        if tick >= self.late_phase_at {
            MatchPhase::Late
        } else if tick >= self.mid_phase_at {
            MatchPhase::Mid
        } else {
            MatchPhase::Early
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Setup,
    Running,
    Ended,
}

/// Final snapshot, also carried by the `match.end` event.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub winner: TeamId,
    pub teams: Vec<TeamTotals>,
    pub champions: Vec<ChampionLine>,
}

/// The canonical pipeline, in its fixed, hard-coded order. Two systems may
/// never fork the root with the same label in one tick, so each system owns
/// one name here.
pub fn default_pipeline() -> Vec<Box<dyn GameSystem>> {
    vec![
        Box::new(WeatherSystem::new()),
        Box::new(ItemSystem::new()),
        Box::new(LaneSystem),
        Box::new(CombatSystem),
        Box::new(ObjectiveSystem),
        Box::new(LevelingSystem),
    ]
}

/// Owns one world, one RNG root, one event log, and the ordered pipeline for
/// the lifetime of one match. Single pass: `Setup → Running → Ended`, no
/// retry or resume.
pub struct MatchSimulator {
    config: MatchConfig,
    blue_name: String,
    red_name: String,
    world: World,
    rng: RngStream,
    events: EventLog,
    systems: Vec<Box<dyn GameSystem>>,
    state: MatchState,
    result: Option<MatchResult>,
}

impl MatchSimulator {
    pub fn new(config: MatchConfig, blue: &TeamRoster, red: &TeamRoster) -> Self {
        let world = roster::build_world(blue, red);
        let rng = RngStream::from_seed(config.seed);
        Self {
            blue_name: blue.name.clone(),
            red_name: red.name.clone(),
            world,
            rng,
            events: EventLog::new(),
            systems: default_pipeline(),
            state: MatchState::Setup,
            result: None,
            config,
        }
    }

    /// Run each system's one-time setup and open the broadcast feed.
    ///
    /// # Panics
    /// Panics if the match already started.
    pub fn start(&mut self) {
        assert_eq!(self.state, MatchState::Setup, "start: match already started");
        self.events.log(
            0,
            format!("{} vs {}", self.blue_name, self.red_name),
            EventKind::MatchStart {
                blue_team: self.blue_name.clone(),
                red_team: self.red_name.clone(),
            },
        );
        for system in self.systems.iter_mut() {
            let mut ctx = TickContext {
                world: &mut self.world,
                rng: &mut self.rng,
                events: &mut self.events,
                phase: MatchPhase::Early,
            };
            system.initialize(&mut ctx);
        }
        self.state = MatchState::Running;
        tracing::debug!(seed = self.config.seed, "match started");
    }

    /// Advance one tick: bump the counter, compute the phase, run every
    /// phase-admitted system in pipeline order, then test termination.
    ///
    /// # Panics
    /// Panics unless the match is running.
    pub fn tick(&mut self) {
        assert_eq!(self.state, MatchState::Running, "tick: match is not running");
        self.world.tick += 1;
        let phase = self.config.phase_at(self.world.tick);
        for system in self.systems.iter_mut() {
            if !system.active_in(phase) {
                continue;
            }
            let mut ctx = TickContext {
                world: &mut self.world,
                rng: &mut self.rng,
                events: &mut self.events,
                phase,
            };
            system.update(&mut ctx);
        }
        if self.world.winner().is_some() || self.world.tick >= self.config.tick_limit {
            self.finish();
        }
    }

    /// Tick until the match ends. Starts it first if needed.
    pub fn run_to_end(&mut self) -> &MatchResult {
        if self.state == MatchState::Setup {
            self.start();
        }
        while self.state == MatchState::Running {
            self.tick();
        }
        self.result.as_ref().expect("ended match has a result")
    }

    /// Cooperative cancellation. Called between ticks only (the adapter
    /// never interrupts one); finalizes the log with the terminal event.
    pub fn abort(&mut self) {
        if self.state != MatchState::Ended {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let winner = self.world.winner().unwrap_or_else(|| {
            // Tick limit with no structural win: kills, then gold, then blue.
            let by_kills = self
                .world
                .team_kills(TeamId::Blue)
                .cmp(&self.world.team_kills(TeamId::Red));
            let by_gold = self
                .world
                .team_gold(TeamId::Blue)
                .cmp(&self.world.team_gold(TeamId::Red));
            match by_kills.then(by_gold) {
                Ordering::Less => TeamId::Red,
                Ordering::Equal | Ordering::Greater => TeamId::Blue,
            }
        });

        let teams: Vec<TeamTotals> = TeamId::BOTH
            .iter()
            .map(|&team| TeamTotals {
                team,
                kills: self.world.team_kills(team),
                gold: self.world.team_gold(team),
            })
            .collect();
        let champions: Vec<ChampionLine> = self
            .world
            .champions
            .values()
            .map(|c| ChampionLine {
                champion: c.id(),
                name: c.identity.name.clone(),
                team: c.team(),
                role: c.identity.role,
                level: c.leveling.level,
                kills: c.stats.kills,
                deaths: c.stats.deaths,
                assists: c.stats.assists,
                cs: c.stats.cs,
                gold: c.stats.gold,
                items: c.items.iter().map(|i| i.id).collect(),
            })
            .collect();

        let winner_name = match winner {
            TeamId::Blue => &self.blue_name,
            TeamId::Red => &self.red_name,
        };
        self.events.log(
            self.world.tick,
            format!("{winner_name} take the match"),
            EventKind::MatchEnd {
                winner,
                teams: teams.clone(),
                champions: champions.clone(),
            },
        );
        tracing::debug!(winner = winner_name.as_str(), tick = self.world.tick, "match ended");
        self.result = Some(MatchResult {
            winner,
            teams,
            champions,
        });
        self.state = MatchState::Ended;
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}
