use std::collections::VecDeque;

use super::context::TickContext;
use super::system::GameSystem;
use crate::catalog::weather::{self, WEATHER, WeatherDef, WeatherId};
use crate::model::event::{EventKind, WeatherEffectKind};
use crate::model::world::{MetaKey, MetaValue};
use crate::rng::RngStream;

// ---------------------------------------------------------------------------
// Forecast parameters
// ---------------------------------------------------------------------------

/// Upcoming weathers kept queued so forecasts shown on `weather.change`
/// stay accurate (the next weather is popped, never re-rolled).
const FORECAST_LEN: usize = 3;
/// Active weather duration window, in ticks.
const DURATION_MIN: u32 = 5;
const DURATION_MAX: u32 = 12;

// ---------------------------------------------------------------------------
// Per-tick effect parameters
// ---------------------------------------------------------------------------

/// Chance per tick that gold-rain weather showers every champion.
const GOLD_RAIN_PROB: f64 = 0.25;
const GOLD_RAIN_MIN: u32 = 10;
const GOLD_RAIN_MAX: u32 = 40;
/// Chance per tick that teleport weather displaces a champion.
const TELEPORT_PROB: f64 = 0.1;
/// Chance per tick that corrupting weather scrambles a champion's stats.
const CORRUPTION_PROB: f64 = 0.1;
/// Tilt bleed per tick under tilting weather, before resistance.
const TILT_PER_TICK: f64 = 0.01;

struct ActiveWeather {
    id: WeatherId,
    remaining: u32,
}

/// Global ambient state. Rolls a rarity-weighted forecast queue, keeps one
/// weather active for a sampled duration, applies its per-tick stochastic
/// effects, and exports the damage/gold multipliers through world metadata.
pub struct WeatherSystem {
    active: Option<ActiveWeather>,
    forecast: VecDeque<WeatherId>,
}

impl WeatherSystem {
    pub fn new() -> Self {
        Self {
            active: None,
            forecast: VecDeque::new(),
        }
    }

    #[cfg(test)]
    fn forecast_len(&self) -> usize {
        self.forecast.len()
    }

    #[cfg(test)]
    fn active_id(&self) -> Option<WeatherId> {
        self.active.as_ref().map(|a| a.id)
    }
}

impl Default for WeatherSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSystem for WeatherSystem {
    fn name(&self) -> &str {
        "weather"
    }

    fn initialize(&mut self, ctx: &mut TickContext) {
        let mut rng = ctx.rng.fork("weather");
        self.refill_forecast(&mut rng);
        self.advance(ctx, &mut rng);
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let mut rng = ctx.rng.fork("weather");

        let expired = match &mut self.active {
            Some(active) => {
                active.remaining = active.remaining.saturating_sub(1);
                active.remaining == 0
            }
            // Not initialized (standalone harness); start a cycle now.
            None => {
                self.refill_forecast(&mut rng);
                true
            }
        };
        if expired {
            self.advance(ctx, &mut rng);
        }

        let Some(def) = self.active.as_ref().and_then(|a| weather::weather_def(a.id)) else {
            return;
        };
        export_multipliers(ctx, def);
        roll_effects(ctx, &mut rng, def);
    }
}

impl WeatherSystem {
    /// Pop the next weather from the forecast queue, sample its duration,
    /// refill the queue, and announce the change.
    fn advance(&mut self, ctx: &mut TickContext, rng: &mut RngStream) {
        let Some(next) = self.forecast.pop_front() else {
            tracing::warn!("weather forecast queue empty, keeping current weather");
            return;
        };
        self.refill_forecast(rng);
        let duration = rng.range(DURATION_MIN, DURATION_MAX);
        self.active = Some(ActiveWeather {
            id: next,
            remaining: duration,
        });

        let Some(def) = weather::weather_def(next) else {
            tracing::warn!(weather = ?next, "weather missing from catalog, no change event");
            return;
        };
        export_multipliers(ctx, def);
        let forecast: Vec<WeatherId> = self.forecast.iter().copied().collect();
        ctx.events.log(
            ctx.world.tick,
            format!("{} settles over the arena", def.name),
            EventKind::WeatherChange {
                weather: next,
                duration,
                forecast,
            },
        );
    }

    fn refill_forecast(&mut self, rng: &mut RngStream) {
        while self.forecast.len() < FORECAST_LEN {
            self.forecast.push_back(roll_weather(rng));
        }
    }
}

/// Rarity-weighted pick from the catalog.
fn roll_weather(rng: &mut RngStream) -> WeatherId {
    let total: u32 = WEATHER.iter().map(|def| def.rarity.weight()).sum();
    let mut roll = rng.range(0, total.saturating_sub(1));
    for def in WEATHER {
        let weight = def.rarity.weight();
        if roll < weight {
            return def.id;
        }
        roll -= weight;
    }
    WeatherId::ClearSkies
}

fn export_multipliers(ctx: &mut TickContext, def: &WeatherDef) {
    ctx.world
        .set_metadata(MetaKey::DamageMultiplier, MetaValue::Scalar(def.damage));
    ctx.world
        .set_metadata(MetaKey::GoldMultiplier, MetaValue::Scalar(def.gold));
}

/// Weather-specific stochastic effects, rolled each tick while active.
/// Teleport and stat corruption are logged here; their mechanical
/// application lives in sibling systems.
fn roll_effects(ctx: &mut TickContext, rng: &mut RngStream, def: &WeatherDef) {
    let tick = ctx.world.tick;

    if def.gold_rain && rng.chance(GOLD_RAIN_PROB) {
        let bonus = rng.range(GOLD_RAIN_MIN, GOLD_RAIN_MAX);
        for id in ctx.world.champion_ids() {
            if let Some(champion) = ctx.world.champion_mut(id) {
                champion.stats.earn_gold(bonus);
            }
        }
        ctx.events.log(
            tick,
            format!("{} showers {bonus} gold on every champion", def.name),
            EventKind::WeatherEffect {
                weather: def.id,
                effect: WeatherEffectKind::GoldRain,
                champion: None,
                gold: Some(bonus),
            },
        );
    }

    if def.random_teleport && rng.chance(TELEPORT_PROB) {
        let ids = ctx.world.champion_ids();
        if let Some(&victim) = rng.choice(&ids) {
            let name = super::helpers::champion_name(ctx.world, victim);
            ctx.events.log(
                tick,
                format!("{} blinks {name} across the map", def.name),
                EventKind::WeatherEffect {
                    weather: def.id,
                    effect: WeatherEffectKind::Teleport,
                    champion: Some(victim),
                    gold: None,
                },
            );
        }
    }

    if def.stat_corruption && rng.chance(CORRUPTION_PROB) {
        let ids = ctx.world.champion_ids();
        if let Some(&victim) = rng.choice(&ids) {
            let name = super::helpers::champion_name(ctx.world, victim);
            ctx.events.log(
                tick,
                format!("{} warps the numbers around {name}", def.name),
                EventKind::WeatherEffect {
                    weather: def.id,
                    effect: WeatherEffectKind::StatCorruption,
                    champion: Some(victim),
                    gold: None,
                },
            );
        }
    }

    if def.tilt_increase {
        for id in ctx.world.champion_ids() {
            if let Some(champion) = ctx.world.champion_mut(id) {
                let resistance = champion.hidden.tilt_resistance;
                champion.hidden.add_tilt(TILT_PER_TICK * (1.0 - resistance));
            }
        }
    }
}
