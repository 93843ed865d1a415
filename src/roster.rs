//! Roster input and match-setup world construction.
//!
//! Rosters are externally supplied (team registries, season schedulers);
//! the simulator builds its world from them exactly once per match.

use serde::{Deserialize, Serialize};

use crate::model::champion::{HiddenStats, PowerCurve, Role, StatBlock, Stats, TeamId};
use crate::model::world::World;

/// Gold every champion starts the match with.
pub const STARTING_GOLD: u32 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionSpec {
    pub name: String,
    pub role: Role,
    pub health: f64,
    pub base: StatBlock,
    pub mechanics: f64,
    pub game_sense: f64,
    pub tilt_resistance: f64,
    pub power_curve: PowerCurve,
}

impl ChampionSpec {
    /// A middle-of-the-road spec; scenario builders tweak from here.
    pub fn standard(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            role,
            health: 600.0,
            base: StatBlock {
                attack_damage: 60.0,
                ability_power: 0.0,
                attack_speed: 0.65,
                armor: 30.0,
                magic_resist: 30.0,
            },
            mechanics: 0.5,
            game_sense: 0.5,
            tilt_resistance: 0.5,
            power_curve: PowerCurve::Mid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub name: String,
    pub champions: Vec<ChampionSpec>,
}

impl TeamRoster {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            champions: Vec::new(),
        }
    }
}

/// Build the world from two rosters. Blue champions are added first, so IDs
/// are assigned blue-then-red in roster order.
pub fn build_world(blue: &TeamRoster, red: &TeamRoster) -> World {
    let mut world = World::new();
    for (team, roster) in [(TeamId::Blue, blue), (TeamId::Red, red)] {
        for spec in &roster.champions {
            let mut stats = Stats::new(spec.health, spec.base);
            stats.gold = STARTING_GOLD;
            world.add_champion(
                spec.name.clone(),
                spec.role,
                team,
                stats,
                HiddenStats {
                    mechanics: spec.mechanics,
                    game_sense: spec.game_sense,
                    tilt_resistance: spec.tilt_resistance,
                    tilt: 0.0,
                    power_curve: spec.power_curve,
                },
            );
        }
    }
    world
}
