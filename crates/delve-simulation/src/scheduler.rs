use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::SimContext;
use crate::daemon::{Daemon, DaemonId, Schedule};
use crate::error::{SimError, SimResult};
use crate::event::SimEventKind;

/// Saved state of one daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonSnapshot {
    /// Which daemon.
    pub id: DaemonId,
    /// Its schedule when saved.
    pub schedule: Schedule,
    /// Its internal memory.
    pub memory: u32,
}

#[derive(Debug)]
struct Slot {
    daemon: Box<dyn Daemon>,
    schedule: Schedule,
}

/// Runs daemons once per consumed turn, in registration order.
///
/// Each armed daemon has a countdown that is decremented once per turn; the
/// daemon fires when it runs out and hands back its next schedule. A turn
/// guard makes running the same turn twice a no-op.
#[derive(Debug, Default)]
pub struct Scheduler {
    slots: Vec<Slot>,
    last_turn: Option<u32>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a daemon. Daemons run in registration order.
    pub fn register<D: Daemon + 'static>(&mut self, daemon: D) {
        let schedule = if daemon.starts_armed() {
            daemon.schedule()
        } else {
            Schedule::Disabled
        };
        self.slots.push(Slot {
            daemon: Box::new(daemon),
            schedule,
        });
    }

    /// Number of registered daemons.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no daemons are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The last turn the scheduler ran.
    pub fn last_turn(&self) -> Option<u32> {
        self.last_turn
    }

    fn slot_mut(&mut self, id: DaemonId) -> SimResult<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|s| s.daemon.id() == id)
            .ok_or(SimError::UnknownDaemon(id))
    }

    /// Current schedule of a daemon.
    pub fn schedule_of(&self, id: DaemonId) -> Option<Schedule> {
        self.slots
            .iter()
            .find(|s| s.daemon.id() == id)
            .map(|s| s.schedule)
    }

    /// Whether a daemon is armed.
    pub fn is_enabled(&self, id: DaemonId) -> bool {
        self.schedule_of(id)
            .is_some_and(|s| s != Schedule::Disabled)
    }

    /// Re-arm a daemon from the start of its schedule.
    pub fn arm(&mut self, id: DaemonId) -> SimResult<()> {
        let slot = self.slot_mut(id)?;
        slot.daemon.rearm();
        slot.schedule = slot.daemon.schedule();
        debug!(daemon = %id, schedule = ?slot.schedule, "armed daemon");
        Ok(())
    }

    /// Disable a daemon until it is armed again.
    pub fn disable(&mut self, id: DaemonId) -> SimResult<()> {
        self.slot_mut(id)?.schedule = Schedule::Disabled;
        debug!(daemon = %id, "disabled daemon");
        Ok(())
    }

    /// Run every armed, active daemon for `ctx.turn`.
    ///
    /// Returns `false` without doing anything if this turn has already run.
    pub fn run(&mut self, ctx: &mut SimContext<'_>) -> SimResult<bool> {
        if self.last_turn.is_some_and(|t| t >= ctx.turn) {
            warn!(turn = ctx.turn, "scheduler asked to run a turn twice");
            return Ok(false);
        }
        self.last_turn = Some(ctx.turn);

        for slot in &mut self.slots {
            if slot.schedule == Schedule::Disabled || !slot.daemon.active(ctx.world) {
                continue;
            }
            let due = match slot.schedule {
                Schedule::Disabled => false,
                Schedule::EveryTurn => true,
                Schedule::Countdown(n) if n <= 1 => true,
                Schedule::Countdown(n) => {
                    slot.schedule = Schedule::Countdown(n - 1);
                    false
                }
            };
            if !due {
                continue;
            }
            let id = slot.daemon.id();
            slot.schedule = slot.daemon.fire(ctx)?;
            debug!(turn = ctx.turn, daemon = %id, next = ?slot.schedule, "daemon fired");
            ctx.emit(
                SimEventKind::DaemonFired { daemon: id },
                format!("{} fired", slot.daemon.name()),
            );
        }
        Ok(true)
    }

    /// Save every daemon's schedule and memory.
    pub fn snapshot(&self) -> Vec<DaemonSnapshot> {
        self.slots
            .iter()
            .map(|s| DaemonSnapshot {
                id: s.daemon.id(),
                schedule: s.schedule,
                memory: s.daemon.save(),
            })
            .collect()
    }

    /// Restore saved daemon state, matching daemons by id.
    pub fn restore(&mut self, saved: &[DaemonSnapshot], last_turn: Option<u32>) -> SimResult<()> {
        if saved.len() != self.slots.len() {
            return Err(SimError::Snapshot(format!(
                "{} daemons saved, {} registered",
                saved.len(),
                self.slots.len()
            )));
        }
        for entry in saved {
            let slot = self
                .slot_mut(entry.id)
                .map_err(|_| SimError::Snapshot(format!("unknown daemon {}", entry.id)))?;
            slot.schedule = entry.schedule;
            slot.daemon.load(entry.memory);
        }
        self.last_turn = last_turn;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;
    use crate::rng::ScriptedRng;
    use delve_core::World;
    use delve_core::demo::demo_world;

    #[derive(Debug)]
    struct Counter {
        id: DaemonId,
        schedule: Schedule,
        fired: u32,
    }

    impl Daemon for Counter {
        fn id(&self) -> DaemonId {
            self.id
        }
        fn name(&self) -> &str {
            "counter"
        }
        fn schedule(&self) -> Schedule {
            self.schedule
        }
        fn fire(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<Schedule> {
            self.fired += 1;
            Ok(self.schedule)
        }
        fn save(&self) -> u32 {
            self.fired
        }
        fn load(&mut self, memory: u32) {
            self.fired = memory;
        }
    }

    fn run_turn(scheduler: &mut Scheduler, world: &mut World, turn: u32) -> bool {
        let mut events = EventLog::new(0);
        let mut rng = ScriptedRng::default();
        let mut output = Vec::new();
        let mut ctx = SimContext {
            world,
            events: &mut events,
            rng: &mut rng,
            turn,
            output: &mut output,
            death: None,
        };
        scheduler.run(&mut ctx).unwrap()
    }

    fn fired(scheduler: &Scheduler, id: DaemonId) -> u32 {
        scheduler
            .snapshot()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.memory)
            .unwrap()
    }

    #[test]
    fn every_turn_daemons_fire_each_turn() {
        let mut world = demo_world().unwrap();
        let mut scheduler = Scheduler::new();
        scheduler.register(Counter {
            id: DaemonId::SwordGlow,
            schedule: Schedule::EveryTurn,
            fired: 0,
        });
        for turn in 1..=5 {
            run_turn(&mut scheduler, &mut world, turn);
        }
        assert_eq!(fired(&scheduler, DaemonId::SwordGlow), 5);
    }

    #[test]
    fn countdown_daemons_fire_when_due() {
        let mut world = demo_world().unwrap();
        let mut scheduler = Scheduler::new();
        scheduler.register(Counter {
            id: DaemonId::Cure,
            schedule: Schedule::Countdown(3),
            fired: 0,
        });
        for turn in 1..=2 {
            run_turn(&mut scheduler, &mut world, turn);
        }
        assert_eq!(fired(&scheduler, DaemonId::Cure), 0);
        run_turn(&mut scheduler, &mut world, 3);
        assert_eq!(fired(&scheduler, DaemonId::Cure), 1);
        for turn in 4..=6 {
            run_turn(&mut scheduler, &mut world, turn);
        }
        assert_eq!(fired(&scheduler, DaemonId::Cure), 2);
    }

    #[test]
    fn a_turn_never_runs_twice() {
        let mut world = demo_world().unwrap();
        let mut scheduler = Scheduler::new();
        scheduler.register(Counter {
            id: DaemonId::SwordGlow,
            schedule: Schedule::EveryTurn,
            fired: 0,
        });
        assert!(run_turn(&mut scheduler, &mut world, 1));
        assert!(!run_turn(&mut scheduler, &mut world, 1));
        assert_eq!(fired(&scheduler, DaemonId::SwordGlow), 1);
    }

    #[test]
    fn disabled_daemons_stay_quiet_until_armed() {
        let mut world = demo_world().unwrap();
        let mut scheduler = Scheduler::new();
        scheduler.register(Counter {
            id: DaemonId::Lamp,
            schedule: Schedule::EveryTurn,
            fired: 0,
        });
        scheduler.disable(DaemonId::Lamp).unwrap();
        run_turn(&mut scheduler, &mut world, 1);
        assert_eq!(fired(&scheduler, DaemonId::Lamp), 0);
        assert!(!scheduler.is_enabled(DaemonId::Lamp));

        scheduler.arm(DaemonId::Lamp).unwrap();
        run_turn(&mut scheduler, &mut world, 2);
        assert_eq!(fired(&scheduler, DaemonId::Lamp), 1);
    }

    #[test]
    fn unknown_daemon_is_an_error() {
        let mut scheduler = Scheduler::new();
        assert_eq!(
            scheduler.arm(DaemonId::Cure),
            Err(SimError::UnknownDaemon(DaemonId::Cure))
        );
    }

    #[test]
    fn snapshot_round_trip_restores_countdowns() {
        let mut world = demo_world().unwrap();
        let make = || {
            let mut s = Scheduler::new();
            s.register(Counter {
                id: DaemonId::Cure,
                schedule: Schedule::Countdown(4),
                fired: 0,
            });
            s
        };
        let mut scheduler = make();
        run_turn(&mut scheduler, &mut world, 1);
        let saved = scheduler.snapshot();

        let mut restored = make();
        restored.restore(&saved, scheduler.last_turn()).unwrap();
        assert_eq!(restored.schedule_of(DaemonId::Cure), Some(Schedule::Countdown(3)));
        assert_eq!(restored.last_turn(), Some(1));
    }
}
