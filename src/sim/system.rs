use super::context::TickContext;

/// Match phase, computed from tick thresholds.
///
/// Ordered early-to-late so phase comparisons read naturally
/// (`phase >= MatchPhase::Mid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchPhase {
    Early,
    Mid,
    Late,
}

impl MatchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPhase::Early => "early",
            MatchPhase::Mid => "mid",
            MatchPhase::Late => "late",
        }
    }
}

/// A pipeline gameplay system.
///
/// Object-safe so the simulator can hold `Box<dyn GameSystem>` in a fixed,
/// hard-coded order. `initialize` runs once during match setup; `update` runs
/// every tick the system's phase gate admits. All randomness must come from
/// forking `ctx.rng` with a fixed, tick-invariant label (one label per
/// system; per-champion sub-forks use the champion id).
pub trait GameSystem {
    fn name(&self) -> &str;

    /// Phase gate. Default: active in every phase.
    fn active_in(&self, phase: MatchPhase) -> bool {
        let _ = phase;
        true
    }

    /// One-time setup hook. Default: no-op.
    fn initialize(&mut self, ctx: &mut TickContext) {
        let _ = ctx;
    }

    fn update(&mut self, ctx: &mut TickContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_ordered_early_to_late() {
        assert!(MatchPhase::Early < MatchPhase::Mid);
        assert!(MatchPhase::Mid < MatchPhase::Late);
    }

    #[test]
    fn default_gate_admits_all_phases() {
        struct Noop;
        impl GameSystem for Noop {
            fn name(&self) -> &str {
                "noop"
            }
            fn update(&mut self, _ctx: &mut TickContext) {}
        }
        let system = Noop;
        for phase in [MatchPhase::Early, MatchPhase::Mid, MatchPhase::Late] {
            assert!(system.active_in(phase));
        }
    }
}
