use std::collections::BTreeMap;

use super::context::TickContext;
use super::system::GameSystem;
use crate::catalog::items::{self, BuildVariant, ItemPassive};
use crate::model::champion::{BASE_CRIT_DAMAGE, Champion, OwnedItem};
use crate::model::event::EventKind;

/// Economy: automated purchasing along a per-champion build path, plus the
/// idempotent effective-stat recompute every tick.
pub struct ItemSystem {
    /// Build variant per champion, decided once via a stream forked by the
    /// champion id and cached for the rest of the match.
    builds: BTreeMap<u64, &'static BuildVariant>,
}

impl ItemSystem {
    pub fn new() -> Self {
        Self {
            builds: BTreeMap::new(),
        }
    }
}

impl Default for ItemSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for ItemSystem {
    fn name(&self) -> &str {
        "items"
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let mut rng = ctx.rng.fork("items");
        for id in ctx.world.champion_ids() {
            if !self.builds.contains_key(&id) {
                let Some(champion) = ctx.world.champion(id) else {
                    continue;
                };
                let variants = items::build_variants(champion.identity.role);
                if variants.is_empty() {
                    tracing::warn!(champion = id, "no build variants for role, skipping");
                    continue;
                }
                let mut pick = rng.fork(id);
                let index = pick.range(0, variants.len() as u32 - 1) as usize;
                self.builds.insert(id, &variants[index]);
            }
            if let Some(variant) = self.builds.get(&id) {
                try_purchase(ctx, id, variant);
            }
            if let Some(champion) = ctx.world.champion_mut(id) {
                recompute_effective(champion);
            }
        }
    }
}

/// Buy the first unowned item on the path if affordable. At most one
/// purchase per champion per tick.
fn try_purchase(ctx: &mut TickContext, id: u64, variant: &BuildVariant) {
    let tick = ctx.world.tick;
    let Some(champion) = ctx.world.champion_mut(id) else {
        return;
    };
    let Some(next) = variant.items.iter().find(|item| !champion.owns_item(**item)) else {
        return; // build path exhausted
    };
    let Some(def) = items::item_def(*next) else {
        tracing::warn!(item = ?next, "item missing from catalog, skipping purchase");
        return;
    };
    if champion.stats.gold < def.cost {
        return;
    }

    champion.stats.spend_gold(def.cost);
    champion.items.push(OwnedItem {
        id: def.id,
        name: def.name.to_string(),
        cost: def.cost,
        health: def.health,
        stats: def.stats,
        passive: def.passive,
    });
    let remaining = champion.stats.gold;
    let buyer = champion.identity.name.clone();
    ctx.events.log(
        tick,
        format!("{buyer} buys {}", def.name),
        EventKind::ItemPurchase {
            champion: id,
            item: def.id,
            cost: def.cost,
            gold_remaining: remaining,
        },
    );
}

/// Recompute effective stats from base + item bonuses. Recompute, never
/// accumulate: running this any number of times per tick yields the same
/// result. Passives apply on top in inventory order. A max-health increase
/// tops health up by the delta, clamped to the new max.
fn recompute_effective(champion: &mut Champion) {
    let mut effective = champion.stats.base;
    let mut item_health = 0.0;
    for item in &champion.items {
        effective.add(&item.stats);
        item_health += item.health;
    }

    champion.stats.crit_damage = BASE_CRIT_DAMAGE;
    champion.stats.healing_power = 1.0;
    for item in &champion.items {
        match item.passive {
            Some(ItemPassive::ApAmplifier { factor }) => effective.ability_power *= factor,
            Some(ItemPassive::HealingPower { multiplier }) => {
                champion.stats.healing_power = multiplier
            }
            Some(ItemPassive::CritOverride { multiplier }) => {
                champion.stats.crit_damage = multiplier
            }
            Some(ItemPassive::OnHitShred { .. })
            | Some(ItemPassive::DamageReflect { .. })
            | None => {}
        }
    }
    champion.stats.effective = effective;

    let target_max = champion.stats.base_max_health + item_health;
    if target_max > champion.stats.max_health {
        champion.stats.health += target_max - champion.stats.max_health;
    }
    champion.stats.max_health = target_max;
    if champion.stats.health > target_max {
        champion.stats.health = target_max;
    }
}

// ---------------------------------------------------------------------------
// Pure queries for the combat system
// ---------------------------------------------------------------------------

/// On-hit bonus damage as a fraction of the target's current health, from
/// the attacker's inventory. No side effects.
pub fn on_hit_bonus(inventory: &[OwnedItem]) -> f64 {
    inventory
        .iter()
        .find_map(|item| match item.passive {
            Some(ItemPassive::OnHitShred { fraction }) => Some(fraction),
            _ => None,
        })
        .unwrap_or(0.0)
}

/// Fraction of incoming damage reflected back, from the defender's
/// inventory. No side effects.
pub fn reflect_fraction(inventory: &[OwnedItem]) -> f64 {
    inventory
        .iter()
        .find_map(|item| match item.passive {
            Some(ItemPassive::DamageReflect { fraction }) => Some(fraction),
            _ => None,
        })
        .unwrap_or(0.0)
}
