//! Ambient weather registry: closed catalog, weighted by rarity tier.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WeatherId {
    ClearSkies,
    Tailwind,
    GoldenDrizzle,
    RollingFog,
    CrimsonEclipse,
    StaticStorm,
    VoidRift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    pub fn weight(self) -> u32 {
        match self {
            Rarity::Common => 6,
            Rarity::Uncommon => 3,
            Rarity::Rare => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDef {
    pub id: WeatherId,
    pub name: &'static str,
    pub rarity: Rarity,
    // Multipliers read by sibling systems through world metadata.
    pub damage: f64,
    pub gold: f64,
    pub speed: f64,
    pub vision: f64,
    // Flags for per-tick stochastic effects.
    pub invisibility: bool,
    pub random_teleport: bool,
    pub stat_corruption: bool,
    pub gold_rain: bool,
    pub tilt_increase: bool,
}

pub const WEATHER: &[WeatherDef] = &[
    WeatherDef {
        id: WeatherId::ClearSkies,
        name: "Clear Skies",
        rarity: Rarity::Common,
        damage: 1.0,
        gold: 1.0,
        speed: 1.0,
        vision: 1.0,
        invisibility: false,
        random_teleport: false,
        stat_corruption: false,
        gold_rain: false,
        tilt_increase: false,
    },
    WeatherDef {
        id: WeatherId::Tailwind,
        name: "Tailwind",
        rarity: Rarity::Common,
        damage: 1.0,
        gold: 1.0,
        speed: 1.2,
        vision: 1.0,
        invisibility: false,
        random_teleport: false,
        stat_corruption: false,
        gold_rain: false,
        tilt_increase: false,
    },
    WeatherDef {
        id: WeatherId::GoldenDrizzle,
        name: "Golden Drizzle",
        rarity: Rarity::Uncommon,
        damage: 1.0,
        gold: 1.25,
        speed: 1.0,
        vision: 1.0,
        invisibility: false,
        random_teleport: false,
        stat_corruption: false,
        gold_rain: true,
        tilt_increase: false,
    },
    WeatherDef {
        id: WeatherId::RollingFog,
        name: "Rolling Fog",
        rarity: Rarity::Uncommon,
        damage: 1.0,
        gold: 1.0,
        speed: 0.9,
        vision: 0.6,
        invisibility: true,
        random_teleport: false,
        stat_corruption: false,
        gold_rain: false,
        tilt_increase: false,
    },
    WeatherDef {
        id: WeatherId::CrimsonEclipse,
        name: "Crimson Eclipse",
        rarity: Rarity::Rare,
        damage: 1.3,
        gold: 1.0,
        speed: 1.0,
        vision: 0.9,
        invisibility: false,
        random_teleport: false,
        stat_corruption: false,
        gold_rain: false,
        tilt_increase: true,
    },
    WeatherDef {
        id: WeatherId::StaticStorm,
        name: "Static Storm",
        rarity: Rarity::Rare,
        damage: 1.15,
        gold: 1.0,
        speed: 0.95,
        vision: 0.8,
        invisibility: false,
        random_teleport: true,
        stat_corruption: false,
        gold_rain: false,
        tilt_increase: false,
    },
    WeatherDef {
        id: WeatherId::VoidRift,
        name: "Void Rift",
        rarity: Rarity::Rare,
        damage: 1.1,
        gold: 1.0,
        speed: 1.0,
        vision: 0.8,
        invisibility: false,
        random_teleport: false,
        stat_corruption: true,
        gold_rain: false,
        tilt_increase: false,
    },
];

pub fn weather_def(id: WeatherId) -> Option<&'static WeatherDef> {
    WEATHER.iter().find(|def| def.id == id)
}
