//! Persistence boundary for event logs, and fold-based state reconstruction
//! for replay scrubbing.
//!
//! Storage is JSONL, one event per line. Parse failures are recoverable
//! boundary errors; they never reach simulation code.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::catalog::items::ItemId;
use crate::catalog::weather::WeatherId;
use crate::model::champion::TeamId;
use crate::model::event::{EventKind, GameEvent};
use crate::model::lane::LaneId;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay not found: {0}")]
    NotFound(String),
    #[error("replay invalid: {0}")]
    Invalid(String),
}

/// Write an event log to a JSONL file, one JSON object per line.
pub fn save_replay(path: &Path, events: &[GameEvent]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Load an event log saved by [`save_replay`].
pub fn load_replay(path: &Path) -> Result<Vec<GameEvent>, ReplayError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReplayError::NotFound(path.display().to_string()),
        _ => ReplayError::Invalid(e.to_string()),
    })?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ReplayError::Invalid(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line)
            .map_err(|e| ReplayError::Invalid(format!("line {}: {e}", index + 1)))?;
        events.push(event);
    }
    Ok(events)
}

/// Scoreboard derived purely from the event stream. Folding the same events
/// in the same order always reproduces the same state, whichever consumer
/// does the folding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreboardState {
    pub blue_team: String,
    pub red_team: String,
    pub champions: BTreeMap<u64, ChampionScore>,
    pub active_weather: Option<WeatherId>,
    pub towers_down: Vec<(LaneId, TeamId)>,
    pub winner: Option<TeamId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChampionScore {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub level: u8,
    /// Gold income observed in the feed (bounties, CS, showers, towers).
    pub gold_earned: u32,
    pub items: Vec<ItemId>,
}

impl Default for ChampionScore {
    fn default() -> Self {
        Self {
            kills: 0,
            deaths: 0,
            assists: 0,
            cs: 0,
            level: 1,
            gold_earned: 0,
            items: Vec::new(),
        }
    }
}

/// Fold a full event slice from scratch.
pub fn fold(events: &[GameEvent]) -> ScoreboardState {
    let mut state = ScoreboardState::default();
    for event in events {
        apply_event(&mut state, event);
    }
    state
}

fn champ(state: &mut ScoreboardState, id: u64) -> &mut ChampionScore {
    state.champions.entry(id).or_default()
}

fn apply_event(state: &mut ScoreboardState, event: &GameEvent) {
    match &event.kind {
        EventKind::MatchStart {
            blue_team,
            red_team,
        } => {
            state.blue_team = blue_team.clone();
            state.red_team = red_team.clone();
        }
        EventKind::MatchEnd { winner, .. } => {
            state.winner = Some(*winner);
        }
        EventKind::ItemPurchase { champion, item, .. } => {
            champ(state, *champion).items.push(*item);
        }
        EventKind::LaneCs {
            champion,
            total,
            gold,
            ..
        } => {
            let score = champ(state, *champion);
            score.cs = *total;
            score.gold_earned += gold;
        }
        EventKind::LaneTrade { .. } | EventKind::CombatClash { .. } => {}
        EventKind::LaneKill {
            killer,
            victim,
            gold,
            ..
        } => {
            let k = champ(state, *killer);
            k.kills += 1;
            k.gold_earned += gold;
            champ(state, *victim).deaths += 1;
        }
        EventKind::CombatKill {
            killer,
            victim,
            gold,
            assist,
            ..
        } => {
            let k = champ(state, *killer);
            k.kills += 1;
            k.gold_earned += gold;
            champ(state, *victim).deaths += 1;
            if let Some(assist) = assist {
                champ(state, *assist).assists += 1;
            }
        }
        EventKind::LevelUp {
            champion, level, ..
        } => {
            champ(state, *champion).level = *level;
        }
        EventKind::WeatherChange { weather, .. } => {
            state.active_weather = Some(*weather);
        }
        EventKind::WeatherEffect { gold, .. } => {
            if let Some(bonus) = gold {
                for score in state.champions.values_mut() {
                    score.gold_earned += bonus;
                }
            }
        }
        EventKind::TowerDamage { .. } => {}
        EventKind::TowerFall { lane, team, .. } => {
            state.towers_down.push((*lane, *team));
        }
    }
}

/// A stored replay with periodic snapshots so scrubbing to position `i`
/// costs one snapshot clone plus at most `snapshot_interval` event folds,
/// not `O(i)`.
pub struct Replay {
    events: Vec<GameEvent>,
    snapshot_interval: usize,
    /// `snapshots[k]` is the state after folding the first
    /// `k * snapshot_interval` events.
    snapshots: Vec<ScoreboardState>,
}

impl Replay {
    pub fn new(events: Vec<GameEvent>, snapshot_interval: usize) -> Self {
        let snapshot_interval = snapshot_interval.max(1);
        let mut snapshots = vec![ScoreboardState::default()];
        let mut state = ScoreboardState::default();
        for (index, event) in events.iter().enumerate() {
            apply_event(&mut state, event);
            if (index + 1) % snapshot_interval == 0 {
                snapshots.push(state.clone());
            }
        }
        Self {
            events,
            snapshot_interval,
            snapshots,
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// State after events `0..=index`. Indexes past the end clamp to the
    /// final state.
    pub fn state_at(&self, index: usize) -> ScoreboardState {
        let upto = (index + 1).min(self.events.len());
        let nearest = upto / self.snapshot_interval;
        let mut state = self.snapshots[nearest].clone();
        for event in &self.events[nearest * self.snapshot_interval..upto] {
            apply_event(&mut state, event);
        }
        state
    }

    pub fn final_state(&self) -> ScoreboardState {
        match self.events.len() {
            0 => ScoreboardState::default(),
            n => self.state_at(n - 1),
        }
    }
}
