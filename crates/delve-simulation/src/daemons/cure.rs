use delve_core::Variable;
use tracing::debug;

use crate::context::SimContext;
use crate::daemon::{Daemon, DaemonId, Schedule};
use crate::error::SimResult;
use crate::event::SimEventKind;

/// Turns between healed wounds.
pub const CURE_INTERVAL: u32 = 30;

/// Heals one of the player's wounds every [`CURE_INTERVAL`] turns.
#[derive(Debug, Clone, Default)]
pub struct CureDaemon;

impl Daemon for CureDaemon {
    fn id(&self) -> DaemonId {
        DaemonId::Cure
    }

    fn name(&self) -> &str {
        "cure"
    }

    fn schedule(&self) -> Schedule {
        Schedule::Countdown(CURE_INTERVAL)
    }

    fn fire(&mut self, ctx: &mut SimContext<'_>) -> SimResult<Schedule> {
        if ctx.world.state.variable(Variable::Wounds) > 0 {
            let wounds = ctx.world.state.adjust_variable(Variable::Wounds, -1);
            debug!(turn = ctx.turn, wounds, "healed a wound");
            ctx.emit(SimEventKind::Healed { wounds }, "healed a wound");
        }
        Ok(Schedule::Countdown(CURE_INTERVAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;
    use crate::rng::ScriptedRng;
    use crate::scheduler::Scheduler;
    use delve_core::demo::demo_world;

    #[test]
    fn heals_one_wound_per_interval() {
        let mut world = demo_world().unwrap();
        world.state.set_variable(Variable::Wounds, 2);
        let mut scheduler = Scheduler::new();
        scheduler.register(CureDaemon);

        let mut events = EventLog::new(0);
        let mut rng = ScriptedRng::default();
        let mut output = Vec::new();
        for turn in 1..=(CURE_INTERVAL * 3) {
            let mut ctx = SimContext {
                world: &mut world,
                events: &mut events,
                rng: &mut rng,
                turn,
                output: &mut output,
                death: None,
            };
            scheduler.run(&mut ctx).unwrap();
            if turn == CURE_INTERVAL {
                assert_eq!(ctx.world.state.variable(Variable::Wounds), 1);
            }
        }
        assert_eq!(world.state.variable(Variable::Wounds), 0);
        assert!(output.is_empty());
    }
}
