pub mod champion;
pub mod event;
pub mod event_log;
pub mod lane;
pub mod world;

pub use champion::{
    Abilities, BASE_CRIT_DAMAGE, Champion, HiddenStats, Identity, Leveling, OwnedItem, PowerCurve,
    Role, StatBlock, Stats, TeamId,
};
pub use event::{ChampionLine, EventKind, GameEvent, TeamTotals, WeatherEffectKind};
pub use event_log::EventLog;
pub use lane::{LaneId, LaneSide, LaneState, TOWER_HEALTH};
pub use world::{MetaKey, MetaValue, Tag, World};
