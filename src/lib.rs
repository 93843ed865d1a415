pub mod catalog;
pub mod model;
pub mod replay;
pub mod rng;
pub mod roster;
pub mod scenario;
pub mod sim;
pub mod testutil;

pub use model::{
    Champion, ChampionLine, EventKind, EventLog, GameEvent, LaneId, PowerCurve, Role, TeamId,
    TeamTotals, World,
};
pub use rng::RngStream;
pub use roster::{ChampionSpec, TeamRoster};
pub use sim::{
    GameSystem, LiveControl, MatchAdapter, MatchConfig, MatchPhase, MatchResult, MatchSimulator,
    MatchState,
};
