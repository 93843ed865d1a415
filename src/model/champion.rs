use serde::{Deserialize, Serialize};

use crate::catalog::items::{ItemId, ItemPassive};
use crate::model::lane::LaneId;

/// Crit multiplier applied when no item overrides it.
pub const BASE_CRIT_DAMAGE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamId {
    Blue,
    Red,
}

impl TeamId {
    pub const BOTH: [TeamId; 2] = [TeamId::Blue, TeamId::Red];

    pub fn opponent(self) -> TeamId {
        match self {
            TeamId::Blue => TeamId::Red,
            TeamId::Red => TeamId::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamId::Blue => "blue",
            TeamId::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Marksman,
    Support,
}

impl Role {
    /// The lane this role holds during the laning phase. Junglers and
    /// supports roam and are not lane-assigned.
    pub fn lane(self) -> Option<LaneId> {
        match self {
            Role::Top => Some(LaneId::Top),
            Role::Mid => Some(LaneId::Mid),
            Role::Marksman => Some(LaneId::Bot),
            Role::Jungle | Role::Support => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Marksman => "marksman",
            Role::Support => "support",
        }
    }
}

/// Qualitative strength profile over the match timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerCurve {
    Early,
    Mid,
    Late,
}

/// The five combat ratings shared by base stats, effective stats, and item
/// grants. Health is tracked separately because item health feeds the
/// max-health top-up path rather than a flat stat.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack_damage: f64,
    pub ability_power: f64,
    pub attack_speed: f64,
    pub armor: f64,
    pub magic_resist: f64,
}

impl StatBlock {
    pub fn add(&mut self, other: &StatBlock) {
        self.attack_damage += other.attack_damage;
        self.ability_power += other.ability_power;
        self.attack_speed += other.attack_speed;
        self.armor += other.armor;
        self.magic_resist += other.magic_resist;
    }
}

/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub name: String,
    pub role: Role,
    pub team: TeamId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub gold: u32,
    pub health: f64,
    pub max_health: f64,
    /// Max health before item bonuses. Grows on level-up; the item system
    /// recomputes `max_health` from this every tick.
    pub base_max_health: f64,
    pub base: StatBlock,
    /// Recomputed from `base` + item bonuses every tick, never accumulated.
    pub effective: StatBlock,
    pub cs: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub kill_streak: u32,
    pub last_trade_tick: Option<u64>,
    pub crit_damage: f64,
    pub healing_power: f64,
}

impl Stats {
    pub fn new(health: f64, base: StatBlock) -> Self {
        Self {
            gold: 0,
            health,
            max_health: health,
            base_max_health: health,
            base,
            effective: base,
            cs: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            kill_streak: 0,
            last_trade_tick: None,
            crit_damage: BASE_CRIT_DAMAGE,
            healing_power: 1.0,
        }
    }

    pub fn earn_gold(&mut self, amount: u32) {
        self.gold += amount;
    }

    /// Spend gold; clamps at zero rather than underflowing.
    pub fn spend_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_sub(amount);
    }

    /// Apply damage; health clamps at zero.
    pub fn take_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Heal scaled by the healing-power multiplier, capped at max health.
    pub fn heal(&mut self, amount: f64) {
        self.health = (self.health + amount * self.healing_power).min(self.max_health);
    }

    /// KDA ratio with the zero-deaths guard.
    pub fn kda(&self) -> f64 {
        let contributions = (self.kills + self.assists) as f64;
        if self.deaths == 0 {
            contributions
        } else {
            contributions / self.deaths as f64
        }
    }
}

/// Attributes driving probabilistic outcomes. Not visible to the opposing
/// side's decision logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenStats {
    pub mechanics: f64,
    pub game_sense: f64,
    pub tilt_resistance: f64,
    pub tilt: f64,
    pub power_curve: PowerCurve,
}

impl HiddenStats {
    pub fn combined_skill(&self) -> f64 {
        self.mechanics + self.game_sense
    }

    /// Raise tilt, clamped to 1.0.
    pub fn add_tilt(&mut self, amount: f64) {
        self.tilt = (self.tilt + amount).min(1.0);
    }
}

/// Snapshot of an item definition at purchase time. Copies the catalog entry
/// rather than referencing it, so later catalog changes cannot rewrite an
/// inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub id: ItemId,
    pub name: String,
    pub cost: u32,
    pub health: f64,
    pub stats: StatBlock,
    pub passive: Option<ItemPassive>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leveling {
    pub level: u8,
    pub xp: u32,
    /// Staged by other systems, drained once per tick by the leveling system.
    pub pending_xp: u32,
}

impl Default for Leveling {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            pending_xp: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Abilities {
    pub unlocked: [bool; 4],
}

/// A simulated combatant. The component set is fixed at creation; only
/// component values mutate afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub identity: Identity,
    pub stats: Stats,
    pub hidden: HiddenStats,
    pub items: Vec<OwnedItem>,
    pub leveling: Leveling,
    pub abilities: Abilities,
}

impl Champion {
    pub fn id(&self) -> u64 {
        self.identity.id
    }

    pub fn team(&self) -> TeamId {
        self.identity.team
    }

    pub fn owns_item(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> Stats {
        Stats::new(
            600.0,
            StatBlock {
                attack_damage: 60.0,
                ability_power: 0.0,
                attack_speed: 0.65,
                armor: 30.0,
                magic_resist: 30.0,
            },
        )
    }

    #[test]
    fn spend_gold_clamps_at_zero() {
        let mut s = stats();
        s.earn_gold(100);
        s.spend_gold(250);
        assert_eq!(s.gold, 0);
    }

    #[test]
    fn take_damage_clamps_at_zero() {
        let mut s = stats();
        s.take_damage(10_000.0);
        assert_eq!(s.health, 0.0);
    }

    #[test]
    fn heal_caps_at_max_health() {
        let mut s = stats();
        s.take_damage(50.0);
        s.heal(500.0);
        assert_eq!(s.health, s.max_health);
    }

    #[test]
    fn heal_scales_with_healing_power() {
        let mut s = stats();
        s.take_damage(300.0);
        s.healing_power = 1.5;
        s.heal(100.0);
        assert_eq!(s.health, 450.0);
    }

    #[test]
    fn kda_guards_zero_deaths() {
        let mut s = stats();
        s.kills = 3;
        s.assists = 2;
        assert_eq!(s.kda(), 5.0);
        s.deaths = 2;
        assert_eq!(s.kda(), 2.5);
    }

    #[test]
    fn tilt_clamped_to_one() {
        let mut h = HiddenStats {
            mechanics: 0.5,
            game_sense: 0.5,
            tilt_resistance: 0.5,
            tilt: 0.9,
            power_curve: PowerCurve::Mid,
        };
        h.add_tilt(0.5);
        assert_eq!(h.tilt, 1.0);
    }

    #[test]
    fn role_lane_assignment() {
        assert_eq!(Role::Top.lane(), Some(LaneId::Top));
        assert_eq!(Role::Mid.lane(), Some(LaneId::Mid));
        assert_eq!(Role::Marksman.lane(), Some(LaneId::Bot));
        assert_eq!(Role::Jungle.lane(), None);
        assert_eq!(Role::Support.lane(), None);
    }

    #[test]
    fn team_opponent_flips() {
        assert_eq!(TeamId::Blue.opponent(), TeamId::Red);
        assert_eq!(TeamId::Red.opponent(), TeamId::Blue);
    }

    #[test]
    fn team_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&TeamId::Blue).unwrap(), "\"blue\"");
        assert_eq!(
            serde_json::to_string(&Role::Marksman).unwrap(),
            "\"marksman\""
        );
    }
}
