use delve_core::{ObjectFlags, ObjectId, World};
use tracing::info;

use crate::context::SimContext;
use crate::daemon::{Daemon, DaemonId, Schedule};
use crate::error::SimResult;
use crate::event::SimEventKind;

/// Turns of light left at each stage of the brass lantern.
pub const LAMP_STAGES: [u32; 4] = [100, 70, 15, 0];

/// Burns a light source down through a table of stages.
///
/// Armed at stage 0 when the light is first lit. Each firing moves one stage
/// on and warns the player; firing at the last stage puts the light out for
/// good and disables the daemon. A table of N stages therefore goes dark on
/// the Nth firing. While the light is switched off the countdown is frozen.
#[derive(Debug, Clone)]
pub struct LightDaemon {
    object: ObjectId,
    stages: Vec<u32>,
    stage: usize,
}

impl LightDaemon {
    /// A daemon for `object` with the given stage table.
    pub fn new(object: ObjectId, stages: Vec<u32>) -> Self {
        Self {
            object,
            stages,
            stage: 0,
        }
    }

    /// A daemon with the lantern's stage table.
    pub fn lamp(object: ObjectId) -> Self {
        Self::new(object, LAMP_STAGES.to_vec())
    }

    /// The light source this daemon burns down.
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Current stage index.
    pub fn stage(&self) -> usize {
        self.stage
    }

    fn countdown(&self) -> Schedule {
        match self.stages.get(self.stage) {
            Some(&ticks) => Schedule::Countdown(ticks.max(1)),
            None => Schedule::Disabled,
        }
    }

    fn warning(&self, name: &str) -> String {
        if self.stage + 1 == self.stages.len() {
            format!("The {name} is nearly out.")
        } else if self.stage == 1 {
            format!("The {name} appears a bit dimmer.")
        } else {
            format!("The {name} is definitely dimmer now.")
        }
    }
}

fn player_can_see(world: &World, object: ObjectId) -> bool {
    world.room_of(object) == Some(world.state.current_room)
}

impl Daemon for LightDaemon {
    fn id(&self) -> DaemonId {
        DaemonId::Lamp
    }

    fn name(&self) -> &str {
        "light"
    }

    fn schedule(&self) -> Schedule {
        self.countdown()
    }

    fn starts_armed(&self) -> bool {
        false
    }

    fn active(&self, world: &World) -> bool {
        world
            .object(self.object)
            .is_ok_and(|o| o.is(ObjectFlags::LIT))
    }

    fn fire(&mut self, ctx: &mut SimContext<'_>) -> SimResult<Schedule> {
        let object = ctx.world.object(self.object)?;
        if !object.is(ObjectFlags::LIT) {
            return Ok(self.countdown());
        }
        let name = object.name.clone();
        let visible = player_can_see(ctx.world, self.object);

        if self.stage + 1 >= self.stages.len() {
            let object = ctx.world.object_mut(self.object)?;
            object.flags.remove(ObjectFlags::LIT);
            object.flags.insert(ObjectFlags::BURNED_OUT);
            if visible {
                ctx.say(format!("The {name} has run out of power."));
            }
            info!(turn = ctx.turn, object = %self.object, "light source exhausted");
            ctx.emit(
                SimEventKind::LightExhausted {
                    object: self.object,
                },
                format!("the {name} went out"),
            );
            return Ok(Schedule::Disabled);
        }

        self.stage += 1;
        if visible {
            let warning = self.warning(&name);
            ctx.say(warning);
        }
        ctx.emit(
            SimEventKind::LightDimmed {
                object: self.object,
                stage: self.stage,
            },
            format!("the {name} dimmed"),
        );
        Ok(self.countdown())
    }

    fn rearm(&mut self) {
        self.stage = 0;
    }

    fn save(&self) -> u32 {
        u32::try_from(self.stage).unwrap_or(u32::MAX)
    }

    fn load(&mut self, memory: u32) {
        self.stage = memory as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLog;
    use crate::rng::ScriptedRng;
    use crate::scheduler::Scheduler;
    use delve_core::Location;
    use delve_core::demo::demo_world;

    fn with_ctx<R>(world: &mut World, turn: u32, f: impl FnOnce(&mut SimContext<'_>) -> R) -> (R, Vec<String>) {
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
        let result = f(&mut ctx);
        (result, output)
    }

    fn lit_lamp_world() -> (World, ObjectId) {
        let mut world = demo_world().unwrap();
        let lamp = world.object_id("lamp").unwrap();
        world.move_object(lamp, Location::Player).unwrap();
        world.object_mut(lamp).unwrap().flags.insert(ObjectFlags::LIT);
        (world, lamp)
    }

    #[test]
    fn n_stages_go_dark_after_n_firings() {
        let (mut world, lamp) = lit_lamp_world();
        let mut daemon = LightDaemon::lamp(lamp);
        for i in 0..LAMP_STAGES.len() {
            assert!(world.object(lamp).unwrap().is(ObjectFlags::LIT), "went dark early at {i}");
            let (next, _) = with_ctx(&mut world, 1, |ctx| daemon.fire(ctx).unwrap());
            if i + 1 < LAMP_STAGES.len() {
                assert_ne!(next, Schedule::Disabled);
            } else {
                assert_eq!(next, Schedule::Disabled);
            }
        }
        let lamp = world.object(lamp).unwrap();
        assert!(!lamp.is(ObjectFlags::LIT));
        assert!(lamp.is(ObjectFlags::BURNED_OUT));
    }

    #[test]
    fn firing_an_unlit_lamp_changes_nothing() {
        let mut world = demo_world().unwrap();
        let lamp = world.object_id("lamp").unwrap();
        let mut daemon = LightDaemon::lamp(lamp);
        let before = world.object(lamp).unwrap().flags;
        let (next, said) = with_ctx(&mut world, 1, |ctx| daemon.fire(ctx).unwrap());
        assert_eq!(next, Schedule::Countdown(100));
        assert_eq!(daemon.stage(), 0);
        assert!(said.is_empty());
        assert_eq!(world.object(lamp).unwrap().flags, before);
        assert!(!daemon.active(&world));
    }

    #[test]
    fn warnings_are_heard_when_carried() {
        let (mut world, lamp) = lit_lamp_world();
        let mut daemon = LightDaemon::lamp(lamp);
        let (_, said) = with_ctx(&mut world, 1, |ctx| daemon.fire(ctx).unwrap());
        assert_eq!(said, vec!["The brass lantern appears a bit dimmer.".to_string()]);
    }

    #[test]
    fn scheduled_lamp_lasts_the_sum_of_its_stages() {
        let (mut world, lamp) = lit_lamp_world();
        let mut scheduler = Scheduler::new();
        scheduler.register(LightDaemon::lamp(lamp));
        scheduler.arm(DaemonId::Lamp).unwrap();

        let lifetime: u32 = LAMP_STAGES.iter().map(|&t| t.max(1)).sum();
        for turn in 1..lifetime {
            with_ctx(&mut world, turn, |ctx| scheduler.run(ctx).unwrap());
        }
        assert!(world.object(lamp).unwrap().is(ObjectFlags::LIT));
        with_ctx(&mut world, lifetime, |ctx| scheduler.run(ctx).unwrap());
        assert!(!world.object(lamp).unwrap().is(ObjectFlags::LIT));
        assert!(!scheduler.is_enabled(DaemonId::Lamp));
    }

    #[test]
    fn countdown_freezes_while_switched_off() {
        let (mut world, lamp) = lit_lamp_world();
        let mut scheduler = Scheduler::new();
        scheduler.register(LightDaemon::lamp(lamp));
        scheduler.arm(DaemonId::Lamp).unwrap();

        with_ctx(&mut world, 1, |ctx| scheduler.run(ctx).unwrap());
        world.object_mut(lamp).unwrap().flags.remove(ObjectFlags::LIT);
        for turn in 2..50 {
            with_ctx(&mut world, turn, |ctx| scheduler.run(ctx).unwrap());
        }
        assert_eq!(scheduler.schedule_of(DaemonId::Lamp), Some(Schedule::Countdown(99)));
    }

    #[test]
    fn rearming_starts_over() {
        let (mut world, lamp) = lit_lamp_world();
        let mut daemon = LightDaemon::lamp(lamp);
        with_ctx(&mut world, 1, |ctx| daemon.fire(ctx).unwrap());
        assert_eq!(daemon.stage(), 1);
        daemon.rearm();
        assert_eq!(daemon.stage(), 0);
        assert_eq!(daemon.schedule(), Schedule::Countdown(100));
    }
}
