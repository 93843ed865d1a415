use serde::{Deserialize, Serialize};

use crate::catalog::items::ItemId;
use crate::catalog::weather::WeatherId;
use crate::model::champion::{Role, TeamId};
use crate::model::lane::LaneId;

/// The closed event catalog. Every observable simulation output is one of
/// these, namespaced `domain.action`; consumers folding the log in order
/// reconstruct identical derived state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    #[serde(rename = "match.start")]
    MatchStart { blue_team: String, red_team: String },

    #[serde(rename = "match.end")]
    MatchEnd {
        winner: TeamId,
        teams: Vec<TeamTotals>,
        champions: Vec<ChampionLine>,
    },

    #[serde(rename = "item.purchase")]
    ItemPurchase {
        champion: u64,
        item: ItemId,
        cost: u32,
        gold_remaining: u32,
    },

    #[serde(rename = "lane.cs")]
    LaneCs {
        champion: u64,
        lane: LaneId,
        gained: u32,
        total: u32,
        gold: u32,
    },

    #[serde(rename = "lane.trade")]
    LaneTrade {
        lane: LaneId,
        attacker: u64,
        defender: u64,
        damage: u32,
        defender_health: f64,
    },

    #[serde(rename = "lane.kill")]
    LaneKill {
        lane: LaneId,
        killer: u64,
        victim: u64,
        gold: u32,
        streak: u32,
    },

    #[serde(rename = "leveling.level_up")]
    LevelUp {
        champion: u64,
        level: u8,
        power_spike: bool,
        ability_unlocked: Option<u8>,
    },

    #[serde(rename = "weather.change")]
    WeatherChange {
        weather: WeatherId,
        duration: u32,
        forecast: Vec<WeatherId>,
    },

    #[serde(rename = "weather.effect")]
    WeatherEffect {
        weather: WeatherId,
        effect: WeatherEffectKind,
        champion: Option<u64>,
        gold: Option<u32>,
    },

    #[serde(rename = "combat.clash")]
    CombatClash {
        attacker: u64,
        defender: u64,
        damage: u32,
        reflected: u32,
    },

    #[serde(rename = "combat.kill")]
    CombatKill {
        killer: u64,
        victim: u64,
        gold: u32,
        streak: u32,
        assist: Option<u64>,
    },

    #[serde(rename = "objective.tower_damage")]
    TowerDamage {
        lane: LaneId,
        team: TeamId,
        damage: f64,
        health_remaining: f64,
    },

    #[serde(rename = "objective.tower_fall")]
    TowerFall {
        lane: LaneId,
        team: TeamId,
        credited_team: TeamId,
        gold: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherEffectKind {
    GoldRain,
    Teleport,
    StatCorruption,
}

/// Per-team aggregates carried by `match.end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub team: TeamId,
    pub kills: u32,
    pub gold: u32,
}

/// Per-champion stat snapshot carried by `match.end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionLine {
    pub champion: u64,
    pub name: String,
    pub team: TeamId,
    pub role: Role,
    pub level: u8,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub gold: u32,
    pub items: Vec<ItemId>,
}

/// One record in the broadcast feed / replay log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: u64,
    pub description: String,
    #[serde(flatten)]
    pub kind: EventKind,
}
