use serde::{Deserialize, Serialize};

use crate::model::champion::TeamId;

/// Starting tower health per lane side.
pub const TOWER_HEALTH: f64 = 1500.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LaneId {
    Top,
    Mid,
    Bot,
}

impl LaneId {
    pub const ALL: [LaneId; 3] = [LaneId::Top, LaneId::Mid, LaneId::Bot];

    pub fn as_str(self) -> &'static str {
        match self {
            LaneId::Top => "top",
            LaneId::Mid => "mid",
            LaneId::Bot => "bot",
        }
    }
}

/// One team's half of a lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSide {
    /// Minions currently alive on this side's wave.
    pub minions: u32,
    /// How far this side's wave has pushed toward the enemy, in `[0, 1]`.
    pub push: f64,
    pub tower_health: f64,
}

impl Default for LaneSide {
    fn default() -> Self {
        Self {
            minions: 0,
            push: 0.0,
            tower_health: TOWER_HEALTH,
        }
    }
}

impl LaneSide {
    pub fn tower_standing(&self) -> bool {
        self.tower_health > 0.0
    }
}

/// Lane state is owned by the World, not by champions: both the lane system
/// and the objective system read and write it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaneState {
    pub blue: LaneSide,
    pub red: LaneSide,
    /// Derived each tick by the lane system, blue-positive, in `[-1, 1]`.
    pub pressure: f64,
}

impl LaneState {
    pub fn side(&self, team: TeamId) -> &LaneSide {
        match team {
            TeamId::Blue => &self.blue,
            TeamId::Red => &self.red,
        }
    }

    pub fn side_mut(&mut self, team: TeamId) -> &mut LaneSide {
        match team {
            TeamId::Blue => &mut self.blue,
            TeamId::Red => &mut self.red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_indexed_by_team() {
        let mut lane = LaneState::default();
        lane.side_mut(TeamId::Blue).minions = 6;
        lane.side_mut(TeamId::Red).minions = 2;
        assert_eq!(lane.side(TeamId::Blue).minions, 6);
        assert_eq!(lane.side(TeamId::Red).minions, 2);
    }

    #[test]
    fn towers_start_standing() {
        let lane = LaneState::default();
        assert!(lane.blue.tower_standing());
        assert_eq!(lane.red.tower_health, TOWER_HEALTH);
    }

    #[test]
    fn lane_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&LaneId::Bot).unwrap(), "\"bot\"");
    }
}
