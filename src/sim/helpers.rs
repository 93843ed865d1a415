use crate::model::world::World;

use super::leveling;

/// Flat gold for a kill.
pub(crate) const KILL_GOLD_BASE: u32 = 300;
/// Bounty growth per kill already on the killer's streak.
pub(crate) const KILL_GOLD_PER_STREAK: u32 = 100;
/// Tilt added to the victim of a kill.
pub(crate) const KILL_TILT: f64 = 0.15;

pub(crate) struct KillCredit {
    pub gold: u32,
    /// Killer's streak after this kill.
    pub streak: u32,
}

/// Shared kill bookkeeping for lane and combat kills: KDA counters, streaks,
/// bounty gold, victim tilt and health reset, staged kill xp. Returns `None`
/// (and does nothing) if either champion is missing.
pub(crate) fn credit_kill(
    world: &mut World,
    killer: u64,
    victim: u64,
    gold_multiplier: f64,
) -> Option<KillCredit> {
    world.champion(victim)?;
    let streak_before = world.champion(killer)?.stats.kill_streak;
    let bounty = KILL_GOLD_BASE + KILL_GOLD_PER_STREAK * streak_before;
    let gold = (bounty as f64 * gold_multiplier) as u32;

    let k = world.champion_mut(killer)?;
    k.stats.kills += 1;
    k.stats.kill_streak += 1;
    k.stats.earn_gold(gold);
    leveling::award_kill(k);

    let v = world
        .champion_mut(victim)
        .expect("victim checked above");
    v.stats.deaths += 1;
    v.stats.kill_streak = 0;
    v.hidden.add_tilt(KILL_TILT);
    // Respawn at full current effective max health.
    v.stats.health = v.stats.max_health;

    Some(KillCredit {
        gold,
        streak: streak_before + 1,
    })
}

/// Champion display name with a fallback for missing IDs.
pub(crate) fn champion_name(world: &World, id: u64) -> String {
    world
        .champion(id)
        .map(|c| c.identity.name.clone())
        .unwrap_or_else(|| format!("Champion#{id}"))
}
