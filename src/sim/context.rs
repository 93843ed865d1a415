use super::system::MatchPhase;
use crate::model::event_log::EventLog;
use crate::model::world::World;
use crate::rng::RngStream;

/// Context passed to each system on every tick.
///
/// Bundled so fields can be added without changing the `GameSystem` trait
/// signature. `rng` is the tick's root stream; systems fork it with their
/// own fixed label rather than drawing from it directly.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut RngStream,
    pub events: &'a mut EventLog,
    pub phase: MatchPhase,
}
