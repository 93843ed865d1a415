mod adapter;
mod combat;
mod context;
mod helpers;
mod items;
mod lanes;
mod leveling;
mod objectives;
mod simulator;
mod system;
mod weather;

pub use adapter::{LiveControl, MatchAdapter};
pub use combat::CombatSystem;
pub use context::TickContext;
pub use items::{ItemSystem, on_hit_bonus, reflect_fraction};
pub use lanes::LaneSystem;
pub use leveling::{
    ASSIST_XP, CS_XP, KILL_XP, LevelingSystem, MAX_LEVEL, OBJECTIVE_XP, award_assist, award_cs,
    award_kill, award_objective, xp_required,
};
pub use objectives::ObjectiveSystem;
pub use simulator::{
    MatchConfig, MatchResult, MatchSimulator, MatchState, default_pipeline,
};
pub use system::{GameSystem, MatchPhase};
pub use weather::WeatherSystem;
