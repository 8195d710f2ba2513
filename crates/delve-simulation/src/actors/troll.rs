use delve_core::{GameFlag, Location, ObjectFlags, ObjectId, World};
use tracing::info;

use super::{announce_blow, strike_player};
use crate::actor::{Actor, ActorCore, ActorState};
use crate::combat::{BlowOutcome, attack_strength, resolve_blow};
use crate::context::SimContext;
use crate::error::SimResult;

/// The troll's strength when fresh.
pub const TROLL_STRENGTH: u32 = 3;
/// Turns the troll stays out after being knocked unconscious.
pub const TROLL_SLEEP_TURNS: u32 = 3;

/// Guards the passage east of its room.
///
/// Picks a fight with anyone who lingers, and while it is unconscious or
/// dead the way past is open. The timer counts the turns left asleep.
#[derive(Debug, Clone)]
pub struct Troll {
    core: ActorCore,
    axe: Option<ObjectId>,
}

impl Troll {
    /// A troll animating `object`, dropping `axe` when it dies.
    pub fn new(object: ObjectId, name: impl Into<String>, axe: Option<ObjectId>) -> Self {
        Self {
            core: ActorCore::new(object, name, TROLL_STRENGTH),
            axe,
        }
    }

    fn knock_out(&mut self, ctx: &mut SimContext<'_>) {
        self.core.timer = TROLL_SLEEP_TURNS;
        ctx.world.state.set_flag(GameFlag::TrollDefeated);
    }

    fn wake(&mut self, ctx: &mut SimContext<'_>) {
        self.core.stats.strength = self.core.stats.max_strength;
        ctx.world.state.clear_flag(GameFlag::TrollDefeated);
        if self.core.with_player(ctx.world) {
            ctx.say(format!(
                "The {} stirs, quickly resuming a fighting stance.",
                self.core.name
            ));
        }
    }

    fn die(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.core.stats.strength = 0;
        self.core.timer = 0;
        if let (Some(axe), Some(room)) = (self.axe, ctx.world.room_of(self.core.object)) {
            ctx.world.move_object(axe, Location::Room(room))?;
        }
        ctx.world.move_object(self.core.object, Location::Nowhere)?;
        ctx.world.state.set_flag(GameFlag::TrollDefeated);
        info!(turn = ctx.turn, actor = %self.core.object, "troll killed");
        ctx.say(
            "Almost as soon as the troll breathes his last breath, a cloud of sinister black \
             fog envelops him, and when the fog lifts, the carcass has disappeared.",
        );
        Ok(())
    }
}

impl Actor for Troll {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn execute_turn(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        match self.core.state {
            ActorState::Sleeping => {
                self.core.timer = self.core.timer.saturating_sub(1);
                if self.core.timer == 0 {
                    self.wake(ctx);
                }
            }
            ActorState::Fighting if self.core.with_player(ctx.world) => {
                let strength = self.core.stats.strength;
                strike_player(ctx, self.core.object, &self.core.name, strength);
            }
            _ => {}
        }
        Ok(())
    }

    fn on_attacked(&mut self, ctx: &mut SimContext<'_>, weapon: Option<ObjectId>) -> SimResult<()> {
        let outcome = if self.core.state == ActorState::Sleeping {
            BlowOutcome::Killed
        } else {
            let attack = attack_strength(ctx.world, weapon);
            resolve_blow(attack, self.core.stats.strength, &mut *ctx.rng)
        };
        announce_blow(ctx, self.core.object, &self.core.name, outcome);
        self.core.stats.strength = outcome.apply(self.core.stats.strength);
        match outcome {
            BlowOutcome::Killed => self.die(ctx)?,
            BlowOutcome::Unconscious => self.knock_out(ctx),
            _ => {}
        }
        Ok(())
    }

    fn on_receive_item(&mut self, ctx: &mut SimContext<'_>, item: ObjectId) -> SimResult<()> {
        let here = ctx.world.room_of(self.core.object);
        let object = ctx.world.object(item)?;
        let name = object.name.clone();
        let weapon = object.is(ObjectFlags::WEAPON);

        if self.core.state == ActorState::Sleeping || weapon {
            let floor = here.map_or(Location::Nowhere, Location::Room);
            ctx.world.move_object(item, floor)?;
            if weapon && self.core.state != ActorState::Sleeping {
                ctx.say(format!(
                    "The {}, who is remarkably coordinated, catches the {name} and throws it to the floor.",
                    self.core.name
                ));
            } else {
                ctx.say(format!("The {name} falls to the floor."));
            }
        } else {
            ctx.world.move_object(item, Location::Nowhere)?;
            ctx.say(format!(
                "The {}, who is not overly proud, graciously accepts the gift and eats it hungrily.",
                self.core.name
            ));
        }
        Ok(())
    }

    fn transition_state(&self, world: &World) -> ActorState {
        if self.core.stats.strength == 0 {
            ActorState::Dead
        } else if self.core.timer > 0 {
            ActorState::Sleeping
        } else if self.core.with_player(world) {
            ActorState::Fighting
        } else {
            ActorState::Normal
        }
    }
}
