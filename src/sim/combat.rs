//! Skirmish combat between the teams once laning gives way to fights.
//!
//! Integration points: effective stats and the item system's pure
//! on-hit/reflect queries on the attack side, the weather multipliers from
//! world metadata on the scaling side, and the shared kill bookkeeping.

use super::context::TickContext;
use super::system::{GameSystem, MatchPhase};
use super::{helpers, items, leveling};
use crate::model::champion::TeamId;
use crate::model::event::EventKind;
use crate::rng::RngStream;

/// Ticks between skirmish attempts.
const SKIRMISH_INTERVAL: u64 = 6;
/// Weight of attack damage in skirmish output.
const AD_WEIGHT: f64 = 0.9;
/// Weight of ability power in skirmish output.
const AP_WEIGHT: f64 = 0.7;
/// Chance a teammate is credited with an assist on a kill.
const ASSIST_PROB: f64 = 0.5;

pub struct CombatSystem;

impl GameSystem for CombatSystem {
    fn name(&self) -> &str {
        "combat"
    }

    /// Skirmishes start once laning winds down.
    fn active_in(&self, phase: MatchPhase) -> bool {
        phase >= MatchPhase::Mid
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let mut rng = ctx.rng.fork("combat");
        if ctx.world.tick % SKIRMISH_INTERVAL != 0 {
            return;
        }
        let blue = ctx.world.team_champions(TeamId::Blue);
        let red = ctx.world.team_champions(TeamId::Red);
        let (Some(&blue_pick), Some(&red_pick)) = (rng.choice(&blue), rng.choice(&red)) else {
            return;
        };
        let (attacker, defender) = if rng.chance(0.5) {
            (blue_pick, red_pick)
        } else {
            (red_pick, blue_pick)
        };
        skirmish(ctx, &mut rng, attacker, defender);
    }
}

fn skirmish(ctx: &mut TickContext, rng: &mut RngStream, attacker_id: u64, defender_id: u64) {
    let tick = ctx.world.tick;
    let damage_multiplier = ctx.world.damage_multiplier();
    let gold_multiplier = ctx.world.gold_multiplier();

    let (Some(attacker), Some(defender)) = (
        ctx.world.champion(attacker_id),
        ctx.world.champion(defender_id),
    ) else {
        return;
    };

    let offense = attacker.stats.effective;
    let on_hit = items::on_hit_bonus(&attacker.items);
    let reflect = items::reflect_fraction(&defender.items);
    let armor = defender.stats.effective.armor;
    let defender_health = defender.stats.health;

    let raw = (offense.attack_damage * AD_WEIGHT + offense.ability_power * AP_WEIGHT)
        * damage_multiplier;
    let mitigated = raw * 100.0 / (100.0 + armor);
    let total = mitigated + defender_health * on_hit;
    let damage = total.floor() as u32;
    let reflected = (total * reflect).floor() as u32;

    if let Some(defender) = ctx.world.champion_mut(defender_id) {
        defender.stats.take_damage(damage as f64);
    }
    if let Some(attacker) = ctx.world.champion_mut(attacker_id) {
        attacker.stats.take_damage(reflected as f64);
    }

    let attacker_name = helpers::champion_name(ctx.world, attacker_id);
    let defender_name = helpers::champion_name(ctx.world, defender_id);
    ctx.events.log(
        tick,
        format!("{attacker_name} collapses onto {defender_name} for {damage}"),
        EventKind::CombatClash {
            attacker: attacker_id,
            defender: defender_id,
            damage,
            reflected,
        },
    );

    let defender_dead = ctx
        .world
        .champion(defender_id)
        .is_some_and(|c| c.stats.health <= 0.0);
    if defender_dead
        && let Some(credit) = helpers::credit_kill(ctx.world, attacker_id, defender_id, gold_multiplier)
    {
        let assist = pick_assist(ctx, rng, attacker_id);
        ctx.events.log(
            tick,
            format!("{attacker_name} cuts down {defender_name} in a skirmish"),
            EventKind::CombatKill {
                killer: attacker_id,
                victim: defender_id,
                gold: credit.gold,
                streak: credit.streak,
                assist,
            },
        );
    }

    // Thorns can finish the attacker.
    let attacker_dead = ctx
        .world
        .champion(attacker_id)
        .is_some_and(|c| c.stats.health <= 0.0);
    if attacker_dead
        && let Some(credit) = helpers::credit_kill(ctx.world, defender_id, attacker_id, gold_multiplier)
    {
        ctx.events.log(
            tick,
            format!("{attacker_name} is undone by {defender_name}'s thorns"),
            EventKind::CombatKill {
                killer: defender_id,
                victim: attacker_id,
                gold: credit.gold,
                streak: credit.streak,
                assist: None,
            },
        );
    }
}

/// Maybe credit a teammate of the killer with an assist.
fn pick_assist(ctx: &mut TickContext, rng: &mut RngStream, killer_id: u64) -> Option<u64> {
    let team = ctx.world.champion(killer_id)?.team();
    let teammates: Vec<u64> = ctx
        .world
        .team_champions(team)
        .into_iter()
        .filter(|id| *id != killer_id)
        .collect();
    if teammates.is_empty() || !rng.chance(ASSIST_PROB) {
        return None;
    }
    let assist = *rng.choice(&teammates)?;
    let champion = ctx.world.champion_mut(assist)?;
    champion.stats.assists += 1;
    leveling::award_assist(champion);
    Some(assist)
}
