//! Roster builders for tests and demos.

use crate::model::champion::Role;
use crate::roster::{ChampionSpec, TeamRoster};
use crate::sim::{MatchConfig, MatchSimulator};

/// Builds the two rosters for a match, with sensible defaults that tests
/// tweak field by field.
pub struct Scenario {
    pub blue: TeamRoster,
    pub red: TeamRoster,
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            blue: TeamRoster::new("Blue Team"),
            red: TeamRoster::new("Red Team"),
        }
    }

    /// Two identical champions facing each other in one lane.
    pub fn mirrored_duel(role: Role) -> Self {
        let mut s = Self::new();
        s.blue.champions.push(ChampionSpec::standard("Aster", role));
        s.red.champions.push(ChampionSpec::standard("Briar", role));
        s
    }

    /// Full 5v5 with the standard role spread.
    pub fn full_teams() -> Self {
        let mut s = Self::new();
        let roles = [
            Role::Top,
            Role::Jungle,
            Role::Mid,
            Role::Marksman,
            Role::Support,
        ];
        let blue_names = ["Aster", "Bram", "Kessra", "Dova", "Ember"];
        let red_names = ["Fenn", "Gale", "Hollis", "Ira", "Juno"];
        for (role, name) in roles.iter().zip(blue_names) {
            s.blue.champions.push(ChampionSpec::standard(name, *role));
        }
        for (role, name) in roles.iter().zip(red_names) {
            s.red.champions.push(ChampionSpec::standard(name, *role));
        }
        s
    }

    /// Mutate the blue spec at `index` in place.
    pub fn tune_blue(&mut self, index: usize, f: impl FnOnce(&mut ChampionSpec)) -> &mut Self {
        f(&mut self.blue.champions[index]);
        self
    }

    pub fn tune_red(&mut self, index: usize, f: impl FnOnce(&mut ChampionSpec)) -> &mut Self {
        f(&mut self.red.champions[index]);
        self
    }

    pub fn simulator(&self, config: MatchConfig) -> MatchSimulator {
        MatchSimulator::new(config, &self.blue, &self.red)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
