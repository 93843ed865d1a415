//! Structures and the match win condition.
//!
//! Consumes the per-lane pressure the lane system exports through world
//! metadata: sustained pressure grinds down the defending tower in that
//! lane. A team that loses all three towers loses the match; the winner is
//! published through metadata for the simulator's termination check.

use super::context::TickContext;
use super::leveling;
use super::system::GameSystem;
use crate::model::champion::TeamId;
use crate::model::event::EventKind;
use crate::model::lane::LaneId;

/// Absolute lane pressure below this leaves towers untouched.
const PRESSURE_THRESHOLD: f64 = 0.35;
/// Tower damage per tick at full pressure.
const TOWER_DAMAGE_RATE: f64 = 12.0;
/// Gold paid to every member of the team taking a tower.
const TOWER_GOLD: u32 = 150;

pub struct ObjectiveSystem;

impl GameSystem for ObjectiveSystem {
    fn name(&self) -> &str {
        "objectives"
    }

    fn update(&mut self, ctx: &mut TickContext) {
        let tick = ctx.world.tick;
        for lane in LaneId::ALL {
            let Some(pressure) = ctx.world.lane_pressure(lane) else {
                continue;
            };
            if pressure.abs() < PRESSURE_THRESHOLD {
                continue;
            }
            // Blue-positive pressure grinds the red tower, and vice versa.
            let (defending, attacking) = if pressure > 0.0 {
                (TeamId::Red, TeamId::Blue)
            } else {
                (TeamId::Blue, TeamId::Red)
            };

            let side = ctx.world.lane_mut(lane).side_mut(defending);
            if !side.tower_standing() {
                continue;
            }
            let damage = pressure.abs() * TOWER_DAMAGE_RATE;
            side.tower_health = (side.tower_health - damage).max(0.0);
            let health_remaining = side.tower_health;

            ctx.events.log(
                tick,
                format!(
                    "{} pressure chips the {} {} tower",
                    lane.as_str(),
                    defending.as_str(),
                    lane.as_str()
                ),
                EventKind::TowerDamage {
                    lane,
                    team: defending,
                    damage,
                    health_remaining,
                },
            );

            if health_remaining <= 0.0 {
                tower_fall(ctx, lane, defending, attacking);
            }
        }
    }
}

fn tower_fall(ctx: &mut TickContext, lane: LaneId, defending: TeamId, attacking: TeamId) {
    let tick = ctx.world.tick;
    for id in ctx.world.team_champions(attacking) {
        if let Some(champion) = ctx.world.champion_mut(id) {
            champion.stats.earn_gold(TOWER_GOLD);
            leveling::award_objective(champion);
        }
    }
    ctx.events.log(
        tick,
        format!(
            "the {} {} tower falls",
            defending.as_str(),
            lane.as_str()
        ),
        EventKind::TowerFall {
            lane,
            team: defending,
            credited_team: attacking,
            gold: TOWER_GOLD,
        },
    );

    let all_down = LaneId::ALL
        .iter()
        .all(|l| !ctx.world.lane(*l).side(defending).tower_standing());
    if all_down && ctx.world.winner().is_none() {
        ctx.world.set_winner(attacking);
        tracing::debug!(winner = attacking.as_str(), "all towers down, match decided");
    }
}
