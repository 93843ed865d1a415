//! Item and build-path registry.
//!
//! Definitions live in `const` tables and are read-only to the simulation;
//! champions copy an entry into their inventory at purchase time.

use serde::{Deserialize, Serialize};

use crate::model::champion::{Role, StatBlock};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    BrawlersBlade,
    StormEdge,
    SerratedCleaver,
    Bramblemail,
    ArcanistsRod,
    StarfireCrown,
    GuardianPlate,
    WardensChalice,
    GaleGreaves,
    CrestOfInsight,
    HuntersMachete,
    AegisCore,
}

/// Item passives. Applied on top of summed stat blocks, in inventory order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemPassive {
    /// Multiplies effective ability power by `factor` (> 1).
    ApAmplifier { factor: f64 },
    /// Sets the holder's healing-power multiplier.
    HealingPower { multiplier: f64 },
    /// Overrides the holder's crit damage multiplier.
    CritOverride { multiplier: f64 },
    /// On-hit bonus damage as a fraction of the target's current health.
    OnHitShred { fraction: f64 },
    /// Reflects a fraction of incoming damage back at the attacker.
    DamageReflect { fraction: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    pub cost: u32,
    pub health: f64,
    pub stats: StatBlock,
    pub passive: Option<ItemPassive>,
}

const fn stats(
    attack_damage: f64,
    ability_power: f64,
    attack_speed: f64,
    armor: f64,
    magic_resist: f64,
) -> StatBlock {
    StatBlock {
        attack_damage,
        ability_power,
        attack_speed,
        armor,
        magic_resist,
    }
}

pub const ITEMS: &[ItemDef] = &[
    ItemDef {
        id: ItemId::BrawlersBlade,
        name: "Brawler's Blade",
        cost: 1100,
        health: 0.0,
        stats: stats(20.0, 0.0, 0.0, 0.0, 0.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::StormEdge,
        name: "Storm Edge",
        cost: 3200,
        health: 0.0,
        stats: stats(55.0, 0.0, 0.25, 0.0, 0.0),
        passive: Some(ItemPassive::CritOverride { multiplier: 2.5 }),
    },
    ItemDef {
        id: ItemId::SerratedCleaver,
        name: "Serrated Cleaver",
        cost: 2800,
        health: 0.0,
        stats: stats(35.0, 0.0, 0.1, 0.0, 0.0),
        passive: Some(ItemPassive::OnHitShred { fraction: 0.04 }),
    },
    ItemDef {
        id: ItemId::Bramblemail,
        name: "Bramblemail",
        cost: 2400,
        health: 250.0,
        stats: stats(0.0, 0.0, 0.0, 45.0, 0.0),
        passive: Some(ItemPassive::DamageReflect { fraction: 0.2 }),
    },
    ItemDef {
        id: ItemId::ArcanistsRod,
        name: "Arcanist's Rod",
        cost: 1250,
        health: 0.0,
        stats: stats(0.0, 40.0, 0.0, 0.0, 0.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::StarfireCrown,
        name: "Starfire Crown",
        cost: 3400,
        health: 0.0,
        stats: stats(0.0, 80.0, 0.0, 0.0, 0.0),
        passive: Some(ItemPassive::ApAmplifier { factor: 1.3 }),
    },
    ItemDef {
        id: ItemId::GuardianPlate,
        name: "Guardian Plate",
        cost: 2000,
        health: 300.0,
        stats: stats(0.0, 0.0, 0.0, 40.0, 0.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::WardensChalice,
        name: "Warden's Chalice",
        cost: 2300,
        health: 250.0,
        stats: stats(0.0, 0.0, 0.0, 0.0, 40.0),
        passive: Some(ItemPassive::HealingPower { multiplier: 1.25 }),
    },
    ItemDef {
        id: ItemId::GaleGreaves,
        name: "Gale Greaves",
        cost: 900,
        health: 0.0,
        stats: stats(0.0, 0.0, 0.3, 0.0, 0.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::CrestOfInsight,
        name: "Crest of Insight",
        cost: 1600,
        health: 0.0,
        stats: stats(0.0, 25.0, 0.0, 0.0, 20.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::HuntersMachete,
        name: "Hunter's Machete",
        cost: 1000,
        health: 0.0,
        stats: stats(15.0, 0.0, 0.1, 0.0, 0.0),
        passive: None,
    },
    ItemDef {
        id: ItemId::AegisCore,
        name: "Aegis Core",
        cost: 1200,
        health: 350.0,
        stats: stats(0.0, 0.0, 0.0, 0.0, 0.0),
        passive: None,
    },
];

pub fn item_def(id: ItemId) -> Option<&'static ItemDef> {
    ITEMS.iter().find(|def| def.id == id)
}

/// One ordered purchase sequence for a role.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildVariant {
    pub name: &'static str,
    pub items: &'static [ItemId],
}

const TOP_BUILDS: &[BuildVariant] = &[
    BuildVariant {
        name: "bruiser",
        items: &[
            ItemId::BrawlersBlade,
            ItemId::GuardianPlate,
            ItemId::SerratedCleaver,
            ItemId::StormEdge,
        ],
    },
    BuildVariant {
        name: "juggernaut",
        items: &[
            ItemId::AegisCore,
            ItemId::Bramblemail,
            ItemId::GuardianPlate,
            ItemId::WardensChalice,
        ],
    },
];

const JUNGLE_BUILDS: &[BuildVariant] = &[
    BuildVariant {
        name: "skirmisher",
        items: &[
            ItemId::HuntersMachete,
            ItemId::BrawlersBlade,
            ItemId::SerratedCleaver,
            ItemId::StormEdge,
        ],
    },
    BuildVariant {
        name: "warden",
        items: &[
            ItemId::HuntersMachete,
            ItemId::AegisCore,
            ItemId::Bramblemail,
            ItemId::GuardianPlate,
        ],
    },
];

const MID_BUILDS: &[BuildVariant] = &[
    BuildVariant {
        name: "burst",
        items: &[
            ItemId::ArcanistsRod,
            ItemId::CrestOfInsight,
            ItemId::StarfireCrown,
            ItemId::AegisCore,
        ],
    },
    BuildVariant {
        name: "scaling",
        items: &[
            ItemId::ArcanistsRod,
            ItemId::AegisCore,
            ItemId::StarfireCrown,
            ItemId::WardensChalice,
        ],
    },
];

const MARKSMAN_BUILDS: &[BuildVariant] = &[
    BuildVariant {
        name: "crit",
        items: &[
            ItemId::BrawlersBlade,
            ItemId::GaleGreaves,
            ItemId::StormEdge,
            ItemId::SerratedCleaver,
        ],
    },
    BuildVariant {
        name: "on_hit",
        items: &[
            ItemId::GaleGreaves,
            ItemId::HuntersMachete,
            ItemId::SerratedCleaver,
            ItemId::StormEdge,
        ],
    },
];

const SUPPORT_BUILDS: &[BuildVariant] = &[
    BuildVariant {
        name: "enchanter",
        items: &[
            ItemId::CrestOfInsight,
            ItemId::WardensChalice,
            ItemId::AegisCore,
        ],
    },
    BuildVariant {
        name: "bulwark",
        items: &[
            ItemId::AegisCore,
            ItemId::GuardianPlate,
            ItemId::Bramblemail,
        ],
    },
];

pub fn build_variants(role: Role) -> &'static [BuildVariant] {
    match role {
        Role::Top => TOP_BUILDS,
        Role::Jungle => JUNGLE_BUILDS,
        Role::Mid => MID_BUILDS,
        Role::Marksman => MARKSMAN_BUILDS,
        Role::Support => SUPPORT_BUILDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_resolvable() {
        for def in ITEMS {
            assert_eq!(item_def(def.id).unwrap().id, def.id);
        }
    }

    #[test]
    fn item_ids_unique() {
        for (i, a) in ITEMS.iter().enumerate() {
            for b in &ITEMS[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate item id {:?}", a.id);
            }
        }
    }

    #[test]
    fn every_role_has_variants() {
        for role in [
            Role::Top,
            Role::Jungle,
            Role::Mid,
            Role::Marksman,
            Role::Support,
        ] {
            let variants = build_variants(role);
            assert!(!variants.is_empty(), "{role:?} has no build variants");
            for variant in variants {
                assert!(!variant.items.is_empty());
            }
        }
    }

    #[test]
    fn build_paths_reference_known_items_without_duplicates() {
        for role in [
            Role::Top,
            Role::Jungle,
            Role::Mid,
            Role::Marksman,
            Role::Support,
        ] {
            for variant in build_variants(role) {
                for (i, id) in variant.items.iter().enumerate() {
                    assert!(item_def(*id).is_some(), "unknown item {id:?}");
                    assert!(
                        !variant.items[i + 1..].contains(id),
                        "{:?}/{} lists {id:?} twice",
                        role,
                        variant.name
                    );
                }
            }
        }
    }

    #[test]
    fn capstone_amplifies_ap() {
        let def = item_def(ItemId::StarfireCrown).unwrap();
        match def.passive {
            Some(ItemPassive::ApAmplifier { factor }) => assert!(factor > 1.0),
            other => panic!("expected ApAmplifier, got {other:?}"),
        }
    }

    #[test]
    fn item_id_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ItemId::SerratedCleaver).unwrap(),
            "\"serrated_cleaver\""
        );
    }
}
