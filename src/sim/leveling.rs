use super::context::TickContext;
use super::system::GameSystem;
use crate::model::champion::{Champion, PowerCurve};
use crate::model::event::EventKind;

// ---------------------------------------------------------------------------
// XP awards (staged by other systems, drained here)
// ---------------------------------------------------------------------------

/// XP per last-hit minion.
pub const CS_XP: u32 = 25;
/// XP for a champion kill.
pub const KILL_XP: u32 = 150;
/// XP for an assist.
pub const ASSIST_XP: u32 = 75;
/// XP for an objective take (tower).
pub const OBJECTIVE_XP: u32 = 100;

// ---------------------------------------------------------------------------
// Level-up grants
// ---------------------------------------------------------------------------

const HEALTH_PER_LEVEL: f64 = 85.0;
const AD_PER_LEVEL: f64 = 3.0;
const AP_PER_LEVEL: f64 = 4.0;
const ARMOR_PER_LEVEL: f64 = 2.0;
const MR_PER_LEVEL: f64 = 1.5;

pub const MAX_LEVEL: u8 = 18;

/// Levels at which ability slots unlock, slot index = position.
const ABILITY_UNLOCK_LEVELS: [u8; 4] = [2, 4, 6, 11];

/// Levels flagged as power spikes in the broadcast feed.
const POWER_SPIKE_LEVELS: [u8; 3] = [6, 11, 16];

// ---------------------------------------------------------------------------
// Cumulative XP table
// ---------------------------------------------------------------------------

/// `XP_TABLE[l]` = total XP required to hold level `l`. Level 1 is free; each
/// step costs 280 plus 100 per level already climbed past 2.
const XP_TABLE: [u32; (MAX_LEVEL + 1) as usize] = build_xp_table();

const fn build_xp_table() -> [u32; (MAX_LEVEL + 1) as usize] {
    let mut table = [0u32; (MAX_LEVEL + 1) as usize];
    let mut level = 2;
    while level <= MAX_LEVEL as usize {
        table[level] = table[level - 1] + 280 + 100 * (level as u32 - 2);
        level += 1;
    }
    table
}

pub fn xp_required(level: u8) -> u32 {
    XP_TABLE[level.min(MAX_LEVEL) as usize]
}

// ---------------------------------------------------------------------------
// Award helpers
// ---------------------------------------------------------------------------

pub fn award_cs(champion: &mut Champion, count: u32) {
    champion.leveling.pending_xp += CS_XP * count;
}

pub fn award_kill(champion: &mut Champion) {
    champion.leveling.pending_xp += KILL_XP;
}

pub fn award_assist(champion: &mut Champion) {
    champion.leveling.pending_xp += ASSIST_XP;
}

pub fn award_objective(champion: &mut Champion) {
    champion.leveling.pending_xp += OBJECTIVE_XP;
}

// ---------------------------------------------------------------------------
// LevelingSystem
// ---------------------------------------------------------------------------

pub struct LevelingSystem;

impl GameSystem for LevelingSystem {
    fn name(&self) -> &str {
        "leveling"
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let tick = ctx.world.tick;
        for id in ctx.world.champion_ids() {
            let Some(champion) = ctx.world.champion_mut(id) else {
                continue;
            };

            // Drain the buffer staged by other systems this tick.
            let pending = champion.leveling.pending_xp;
            champion.leveling.pending_xp = 0;
            champion.leveling.xp += pending;

            // At most one level-up per tick, even when a large grant crosses
            // two thresholds; the surplus carries and levels again next tick.
            if champion.leveling.level >= MAX_LEVEL {
                continue;
            }
            let next = champion.leveling.level + 1;
            if champion.leveling.xp < xp_required(next) {
                continue;
            }

            champion.leveling.level = next;
            champion.stats.base.attack_damage += AD_PER_LEVEL;
            champion.stats.base.ability_power += AP_PER_LEVEL;
            champion.stats.base.armor += ARMOR_PER_LEVEL;
            champion.stats.base.magic_resist += MR_PER_LEVEL;
            champion.stats.base_max_health += HEALTH_PER_LEVEL;
            champion.stats.max_health += HEALTH_PER_LEVEL;
            champion.stats.health =
                (champion.stats.health + HEALTH_PER_LEVEL).min(champion.stats.max_health);

            let slot = ABILITY_UNLOCK_LEVELS.iter().position(|l| *l == next);
            if let Some(slot) = slot {
                champion.abilities.unlocked[slot] = true;
            }

            let spike = POWER_SPIKE_LEVELS.contains(&next);
            let name = champion.identity.name.clone();
            let description = if spike {
                spike_description(&name, next, champion.hidden.power_curve)
            } else {
                format!("{name} reaches level {next}")
            };

            ctx.events.log(
                tick,
                description,
                EventKind::LevelUp {
                    champion: id,
                    level: next,
                    power_spike: spike,
                    ability_unlocked: slot.map(|s| s as u8),
                },
            );
        }
    }
}

fn spike_description(name: &str, level: u8, curve: PowerCurve) -> String {
    match curve {
        PowerCurve::Early => {
            format!("{name} spikes at level {level} and wants to fight right now")
        }
        PowerCurve::Mid => format!("{name} spikes at level {level}, right on schedule"),
        PowerCurve::Late => {
            format!("{name} spikes at level {level} and is only getting started")
        }
    }
}
