use delve_core::{ObjectFlags, ObjectId, RoomId, World};

use crate::context::SimContext;
use crate::daemon::{Daemon, DaemonId, Schedule};
use crate::error::SimResult;

/// Makes a carried sword glow when hostile actors are near.
///
/// Glow level 2 means an actor shares the player's room, 1 means one is in a
/// room an exit leads to. The player is only told when the level changes.
#[derive(Debug, Clone)]
pub struct SwordGlowDaemon {
    sword: ObjectId,
    level: u32,
}

impl SwordGlowDaemon {
    /// A daemon watching `sword`.
    pub fn new(sword: ObjectId) -> Self {
        Self { sword, level: 0 }
    }

    /// The glow level last announced.
    pub fn level(&self) -> u32 {
        self.level
    }
}

fn hostile_in(world: &World, room: RoomId) -> bool {
    world
        .objects()
        .any(|o| o.is(ObjectFlags::ACTOR) && world.room_of(o.id) == Some(room))
}

/// How strongly a sword would glow for a player standing in `room`.
pub fn glow_level(world: &World, room: RoomId) -> u32 {
    if hostile_in(world, room) {
        return 2;
    }
    let adjacent = world
        .room(room)
        .map(|r| r.exits.iter().filter_map(|e| e.destination).collect::<Vec<_>>())
        .unwrap_or_default();
    if adjacent.into_iter().any(|r| hostile_in(world, r)) {
        1
    } else {
        0
    }
}

impl Daemon for SwordGlowDaemon {
    fn id(&self) -> DaemonId {
        DaemonId::SwordGlow
    }

    fn name(&self) -> &str {
        "sword glow"
    }

    fn schedule(&self) -> Schedule {
        Schedule::EveryTurn
    }

    fn fire(&mut self, ctx: &mut SimContext<'_>) -> SimResult<Schedule> {
        if !ctx.world.player.has_item(self.sword) {
            self.level = 0;
            return Ok(Schedule::EveryTurn);
        }
        let level = glow_level(ctx.world, ctx.world.state.current_room);
        if level != self.level {
            self.level = level;
            let name = &ctx.world.object(self.sword)?.name;
            let text = match level {
                2 => format!("Your {name} has begun to glow very brightly."),
                1 => format!("Your {name} is glowing with a faint blue glow."),
                _ => format!("Your {name} is no longer glowing."),
            };
            ctx.say(text);
        }
        Ok(Schedule::EveryTurn)
    }

    fn save(&self) -> u32 {
        self.level
    }

    fn load(&mut self, memory: u32) {
        self.level = memory;
    }
}
