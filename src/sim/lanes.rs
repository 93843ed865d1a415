use super::context::TickContext;
use super::helpers;
use super::leveling;
use super::system::{GameSystem, MatchPhase};
use crate::model::champion::TeamId;
use crate::model::event::EventKind;
use crate::model::lane::LaneId;
use crate::rng::RngStream;

// ---------------------------------------------------------------------------
// Wave parameters
// ---------------------------------------------------------------------------

/// Ticks between minion wave spawns.
const WAVE_INTERVAL: u64 = 10;
/// Minions per spawned wave.
const WAVE_BATCH: u32 = 6;
/// Max minions each side loses to mutual annihilation per tick.
const ANNIHILATION_CAP: u32 = 2;
/// Push-position change per tick for the side with the larger wave.
const PUSH_RATE: f64 = 0.02;

// ---------------------------------------------------------------------------
// CS parameters
// ---------------------------------------------------------------------------

/// Gold per last hit.
const CS_GOLD: u32 = 20;
/// Mechanics above this last-hit two minions at once.
const DOUBLE_CS_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// Trade parameters
// ---------------------------------------------------------------------------

const TRADE_BASE_DAMAGE: f64 = 80.0;
const TRADE_BASE_PROB: f64 = 0.30;
const TRADE_PROB_PER_SKILL_GAP: f64 = 0.20;
/// Ticks the initiator must wait between trades.
const TRADE_COOLDOWN_TICKS: u64 = 8;
/// Passive health regeneration per tick while laning. Scaled by the
/// holder's healing-power multiplier through `Stats::heal`.
const LANE_REGEN: f64 = 2.0;

// ---------------------------------------------------------------------------
// Pressure weights
// ---------------------------------------------------------------------------

const PRESSURE_WAVE_WEIGHT: f64 = 0.05;
const PRESSURE_CS_WEIGHT: f64 = 0.02;
const PRESSURE_HEALTH_WEIGHT: f64 = 0.001;

/// Laning: wave bookkeeping, CS contests, trades, and the per-lane pressure
/// export consumed by the objective system.
pub struct LaneSystem;

impl GameSystem for LaneSystem {
    fn name(&self) -> &str {
        "lanes"
    }

    /// Laning only happens in the early and mid phases.
    fn active_in(&self, phase: MatchPhase) -> bool {
        phase < MatchPhase::Late
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let mut rng = ctx.rng.fork("lanes");

        if ctx.world.tick % WAVE_INTERVAL == 0 {
            for lane in LaneId::ALL {
                let state = ctx.world.lane_mut(lane);
                state.blue.minions += WAVE_BATCH;
                state.red.minions += WAVE_BATCH;
            }
        }

        for lane in LaneId::ALL {
            let blue = ctx.world.laners(TeamId::Blue, lane);
            let red = ctx.world.laners(TeamId::Red, lane);
            // Lane mechanics need exactly one champion per side.
            let ([blue_id], [red_id]) = (blue.as_slice(), red.as_slice()) else {
                continue;
            };
            contest_cs(ctx, &mut rng, lane, *blue_id, TeamId::Red);
            contest_cs(ctx, &mut rng, lane, *red_id, TeamId::Blue);
            trade(ctx, &mut rng, lane, *blue_id, *red_id);
            regen(ctx, *blue_id);
            regen(ctx, *red_id);
            export_pressure(ctx, lane, *blue_id, *red_id);
            resolve_waves(ctx, lane);
        }
    }
}

/// Trade damage: base scaled by attack damage above 60, mitigated by armor.
pub(crate) fn trade_damage(attack_damage: f64, armor: f64) -> u32 {
    (TRADE_BASE_DAMAGE * (1.0 + (attack_damage - 60.0) / 100.0) * 100.0 / (100.0 + armor)).floor()
        as u32
}

/// One champion's last-hit attempt against the opposing wave.
fn contest_cs(
    ctx: &mut TickContext,
    rng: &mut RngStream,
    lane: LaneId,
    champion_id: u64,
    enemy: TeamId,
) {
    let tick = ctx.world.tick;
    let Some(champion) = ctx.world.champion(champion_id) else {
        return;
    };
    let mechanics = champion.hidden.mechanics;
    // Roll first, gate after: the draw sequence stays input-invariant.
    let hit = rng.chance(mechanics);
    if !hit {
        return;
    }
    let available = ctx.world.lane(lane).side(enemy).minions;
    if available == 0 {
        return;
    }
    let wanted = if mechanics > DOUBLE_CS_THRESHOLD { 2 } else { 1 };
    let gained = wanted.min(available);

    ctx.world.lane_mut(lane).side_mut(enemy).minions -= gained;
    let Some(champion) = ctx.world.champion_mut(champion_id) else {
        return;
    };
    champion.stats.cs += gained;
    let gold = CS_GOLD * gained;
    champion.stats.earn_gold(gold);
    leveling::award_cs(champion, gained);
    let total = champion.stats.cs;
    let name = champion.identity.name.clone();
    ctx.events.log(
        tick,
        format!("{name} last-hits {gained} ({total} cs)"),
        EventKind::LaneCs {
            champion: champion_id,
            lane,
            gained,
            total,
            gold,
        },
    );
}

/// A possible trade between the two laners. The higher combined skill
/// initiates; the gap scales the occurrence probability.
fn trade(ctx: &mut TickContext, rng: &mut RngStream, lane: LaneId, blue_id: u64, red_id: u64) {
    let tick = ctx.world.tick;
    let (Some(blue), Some(red)) = (ctx.world.champion(blue_id), ctx.world.champion(red_id))
    else {
        return;
    };
    let blue_skill = blue.hidden.combined_skill();
    let red_skill = red.hidden.combined_skill();
    let (attacker_id, defender_id) = if blue_skill > red_skill {
        (blue_id, red_id)
    } else if red_skill > blue_skill {
        (red_id, blue_id)
    } else if blue_id < red_id {
        // Equal skill: lower id initiates (canonical ordering).
        (blue_id, red_id)
    } else {
        (red_id, blue_id)
    };

    let gap = (blue_skill - red_skill).abs();
    let probability = TRADE_BASE_PROB + TRADE_PROB_PER_SKILL_GAP * gap;
    let occurs = rng.chance(probability);
    if !occurs {
        return;
    }

    let off_cooldown = ctx
        .world
        .champion(attacker_id)
        .and_then(|c| c.stats.last_trade_tick)
        .is_none_or(|last| tick.saturating_sub(last) >= TRADE_COOLDOWN_TICKS);
    if !off_cooldown {
        return;
    }

    let attack_damage = match ctx.world.champion(attacker_id) {
        Some(c) => c.stats.effective.attack_damage,
        None => return,
    };
    let armor = match ctx.world.champion(defender_id) {
        Some(c) => c.stats.effective.armor,
        None => return,
    };
    let damage = trade_damage(attack_damage, armor);

    if let Some(attacker) = ctx.world.champion_mut(attacker_id) {
        attacker.stats.last_trade_tick = Some(tick);
    }
    let Some(defender) = ctx.world.champion_mut(defender_id) else {
        return;
    };
    defender.stats.take_damage(damage as f64);
    let defender_health = defender.stats.health;
    let dead = defender_health <= 0.0;

    let attacker_name = helpers::champion_name(ctx.world, attacker_id);
    let defender_name = helpers::champion_name(ctx.world, defender_id);
    ctx.events.log(
        tick,
        format!("{attacker_name} trades onto {defender_name} for {damage}"),
        EventKind::LaneTrade {
            lane,
            attacker: attacker_id,
            defender: defender_id,
            damage,
            defender_health,
        },
    );

    if dead
        && let Some(credit) = helpers::credit_kill(ctx.world, attacker_id, defender_id, 1.0)
    {
        ctx.events.log(
            tick,
            format!("{attacker_name} kills {defender_name} in {} lane", lane.as_str()),
            EventKind::LaneKill {
                lane,
                killer: attacker_id,
                victim: defender_id,
                gold: credit.gold,
                streak: credit.streak,
            },
        );
    }
}

fn regen(ctx: &mut TickContext, champion_id: u64) {
    if let Some(champion) = ctx.world.champion_mut(champion_id) {
        champion.stats.heal(LANE_REGEN);
    }
}

/// Weighted sum of wave, CS, and health differentials, clamped to [-1, 1],
/// blue-positive. Written to lane state and to the metadata channel for the
/// objective system.
fn export_pressure(ctx: &mut TickContext, lane: LaneId, blue_id: u64, red_id: u64) {
    let state = ctx.world.lane(lane);
    let wave_diff = state.blue.minions as f64 - state.red.minions as f64;
    let (blue_cs, blue_health) = match ctx.world.champion(blue_id) {
        Some(c) => (c.stats.cs as f64, c.stats.health),
        None => (0.0, 0.0),
    };
    let (red_cs, red_health) = match ctx.world.champion(red_id) {
        Some(c) => (c.stats.cs as f64, c.stats.health),
        None => (0.0, 0.0),
    };
    let raw = wave_diff * PRESSURE_WAVE_WEIGHT
        + (blue_cs - red_cs) * PRESSURE_CS_WEIGHT
        + (blue_health - red_health) * PRESSURE_HEALTH_WEIGHT;
    let pressure = raw.clamp(-1.0, 1.0);
    ctx.world.lane_mut(lane).pressure = pressure;
    ctx.world.set_lane_pressure(lane, pressure);
}

/// Opposing waves grind each other down; the larger wave pushes.
fn resolve_waves(ctx: &mut TickContext, lane: LaneId) {
    let state = ctx.world.lane_mut(lane);
    if state.blue.minions > 0 && state.red.minions > 0 {
        let casualties = ANNIHILATION_CAP
            .min(state.blue.minions)
            .min(state.red.minions);
        state.blue.minions -= casualties;
        state.red.minions -= casualties;
    }
    if state.blue.minions > state.red.minions {
        state.blue.push = (state.blue.push + PUSH_RATE).min(1.0);
        state.red.push = (state.red.push - PUSH_RATE).max(0.0);
    } else if state.red.minions > state.blue.minions {
        state.red.push = (state.red.push + PUSH_RATE).min(1.0);
        state.blue.push = (state.blue.push - PUSH_RATE).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::champion::{HiddenStats, PowerCurve, Role, StatBlock, Stats};
    use crate::model::event_log::EventLog;
    use crate::model::world::World;

    fn laner(world: &mut World, name: &str, team: TeamId, mechanics: f64, game_sense: f64) -> u64 {
        world.add_champion(
            name.to_string(),
            Role::Mid,
            team,
            Stats::new(
                600.0,
                StatBlock {
                    attack_damage: 60.0,
                    ability_power: 0.0,
                    attack_speed: 0.65,
                    armor: 30.0,
                    magic_resist: 30.0,
                },
            ),
            HiddenStats {
                mechanics,
                game_sense,
                tilt_resistance: 0.5,
                tilt: 0.0,
                power_curve: PowerCurve::Mid,
            },
        )
    }

    /// One lane-system tick. The root stream is shared across ticks, exactly
    /// as the simulator advances it, so per-tick forks stay fresh.
    fn tick_at(world: &mut World, rng: &mut RngStream, tick: u64) -> EventLog {
        world.tick = tick;
        let mut events = EventLog::new();
        let mut ctx = TickContext {
            world,
            rng,
            events: &mut events,
            phase: MatchPhase::Early,
        };
        LaneSystem.update(&mut ctx);
        events
    }

    #[test]
    fn trade_damage_reference_case() {
        assert_eq!(trade_damage(60.0, 30.0), 61);
    }

    #[test]
    fn trade_damage_scales_with_ad_and_armor() {
        assert!(trade_damage(100.0, 30.0) > trade_damage(60.0, 30.0));
        assert!(trade_damage(60.0, 100.0) < trade_damage(60.0, 30.0));
    }

    #[test]
    fn waves_spawn_on_interval_only() {
        let mut world = World::new();
        let mut rng = RngStream::from_seed(1);
        tick_at(&mut world, &mut rng, 10);
        let after_spawn = world.lane(LaneId::Top).blue.minions;
        assert!(after_spawn > 0, "wave should spawn on the interval tick");
        let mut world2 = World::new();
        let mut rng = RngStream::from_seed(1);
        tick_at(&mut world2, &mut rng, 11);
        assert_eq!(world2.lane(LaneId::Top).blue.minions, 0);
    }

    #[test]
    fn perfect_mechanics_always_last_hits_two() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 1.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 10);
        let champion = world.champion(blue).unwrap();
        assert_eq!(champion.stats.cs, 2);
        assert_eq!(champion.stats.gold, 2 * CS_GOLD);
        assert_eq!(champion.leveling.pending_xp, 2 * leveling::CS_XP);
    }

    #[test]
    fn cs_capped_by_available_minions() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 1.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        world.lane_mut(LaneId::Mid).red.minions = 1;
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 1);
        assert_eq!(world.champion(blue).unwrap().stats.cs, 1);
        assert_eq!(world.lane(LaneId::Mid).red.minions, 0);
    }

    #[test]
    fn no_cs_with_empty_enemy_wave() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 1.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 1);
        assert_eq!(world.champion(blue).unwrap().stats.cs, 0);
    }

    #[test]
    fn lane_without_both_sides_is_skipped() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 1.0, 0.0);
        world.lane_mut(LaneId::Mid).red.minions = 10;
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 1);
        assert_eq!(world.champion(blue).unwrap().stats.cs, 0);
        assert_eq!(world.lane(LaneId::Mid).pressure, 0.0);
    }

    #[test]
    fn trades_eventually_kill_and_reset() {
        let mut world = World::new();
        let blue = laner(&mut world, "Smurf", TeamId::Blue, 1.0, 1.0);
        let red = laner(&mut world, "Feeder", TeamId::Red, 0.0, 0.0);
        let mut killed = false;
        let mut rng = RngStream::from_seed(99);
        for tick in 1..300 {
            let events = tick_at(&mut world, &mut rng, tick);
            for event in events.iter() {
                if let EventKind::LaneKill {
                    killer,
                    victim,
                    gold,
                    ..
                } = event.kind
                {
                    killed = true;
                    assert_eq!(killer, blue);
                    assert_eq!(victim, red);
                    assert!(gold >= 300);
                }
            }
            if killed {
                break;
            }
        }
        assert!(killed, "stronger laner should eventually secure a kill");
        let victim = world.champion(red).unwrap();
        assert_eq!(victim.stats.deaths, 1);
        assert_eq!(victim.stats.health, victim.stats.max_health);
        assert!(victim.hidden.tilt > 0.0);
        let killer = world.champion(blue).unwrap();
        assert_eq!(killer.stats.kills, 1);
    }

    #[test]
    fn trade_respects_cooldown() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 1.0, 1.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        // Force the cooldown window and count trades inside it.
        let mut trades = 0;
        let mut rng = RngStream::from_seed(7);
        for tick in 1..=TRADE_COOLDOWN_TICKS {
            let events = tick_at(&mut world, &mut rng, tick);
            trades += events
                .iter()
                .filter(|e| matches!(e.kind, EventKind::LaneTrade { .. }))
                .count();
        }
        assert!(
            trades <= 1,
            "initiator must wait out the cooldown, saw {trades} trades"
        );
        let _ = blue;
    }

    #[test]
    fn pressure_clamped_for_extreme_inputs() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 0.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        world.champion_mut(blue).unwrap().stats.max_health = 1_000_000.0;
        world.champion_mut(blue).unwrap().stats.health = 1_000_000.0;
        world.lane_mut(LaneId::Mid).blue.minions = 500;
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 1);
        assert_eq!(world.lane(LaneId::Mid).pressure, 1.0);
        assert_eq!(world.lane_pressure(LaneId::Mid), Some(1.0));
    }

    #[test]
    fn waves_annihilate_and_push() {
        let mut world = World::new();
        let _blue = laner(&mut world, "B", TeamId::Blue, 0.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        world.lane_mut(LaneId::Mid).blue.minions = 10;
        world.lane_mut(LaneId::Mid).red.minions = 4;
        let mut rng = RngStream::from_seed(3);
        tick_at(&mut world, &mut rng, 1);
        let state = world.lane(LaneId::Mid);
        // Up to 2 casualties each side (CS may remove more from a wave).
        assert!(state.blue.minions <= 8);
        assert!(state.red.minions <= 2);
        assert!(state.blue.push > 0.0, "larger wave should push forward");
        assert_eq!(state.red.push, 0.0);
    }

    #[test]
    fn laners_regen_while_laning() {
        let mut world = World::new();
        let blue = laner(&mut world, "B", TeamId::Blue, 0.0, 0.0);
        let _red = laner(&mut world, "R", TeamId::Red, 0.0, 0.0);
        world.champion_mut(blue).unwrap().stats.take_damage(100.0);
        let mut rng = RngStream::from_seed(5);
        tick_at(&mut world, &mut rng, 1);
        // Equal skill means blue initiates on the tie, so blue takes no
        // trade damage and ticks up by the regen amount.
        assert_eq!(world.champion(blue).unwrap().stats.health, 502.0);
    }

    #[test]
    fn lane_system_inactive_in_late_phase() {
        let system = LaneSystem;
        assert!(system.active_in(MatchPhase::Early));
        assert!(system.active_in(MatchPhase::Mid));
        assert!(!system.active_in(MatchPhase::Late));
    }
}
