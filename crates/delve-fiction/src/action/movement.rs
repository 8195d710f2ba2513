//! Looking around and walking.

use tracing::{debug, info};

use super::{ActionContext, ActionOutcome, StateChange};
use crate::error::FictionResult;
use crate::parser::Command;

/// Said when the grue gets you.
pub const GRUE_ATTACK: &str = "Oh, no! You have walked into the slavering fangs of a lurking grue!";

/// LOOK: always the full description.
pub fn look(ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    let world = ctx.sim.world();
    let text = ctx.narrator.describe_room(world, world.state.current_room, true)?;
    Ok(ActionOutcome::success(text))
}

/// GO: follow an exit.
///
/// Missing and blocked exits refuse without moving anything. Leaving a dark
/// room risks the grue; otherwise the player arrives, the room is marked
/// visited and described per the verbosity setting.
pub fn go(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let Some(direction) = command.direction else {
        return Ok(ActionOutcome::failure("Where do you want to go?"));
    };
    let world = ctx.world();
    let from = world.state.current_room;
    let Some(exit) = world.room(from)?.exit(direction) else {
        return Ok(ActionOutcome::failure("You can't go that way."));
    };
    let Some(to) = exit.passable(world) else {
        return Ok(ActionOutcome::failure(exit.blocked_message()));
    };

    if !world.player_has_light() {
        let chance = ctx.sim.mortality().grue_chance;
        if ctx.sim.rng().chance(chance) {
            let cause = "eaten by a grue";
            info!(turn = ctx.world().state.moves, "grue attack");
            let report = ctx.sim.kill_player(cause)?;
            let mut lines = vec![GRUE_ATTACK.to_string()];
            ctx.narrate_death(&report, &mut lines)?;
            return Ok(ActionOutcome::success(lines.join("\n\n")).with_change(StateChange::PlayerDied {
                cause: cause.to_string(),
            }));
        }
    }

    let world = ctx.world_mut();
    world.state.current_room = to;
    let room = world.room_mut(to)?;
    let first_visit = !room.visited;
    room.visited = true;
    debug!(from = %from, to = %to, direction = direction.name(), "player moved");

    let text = ctx.narrator.describe_arrival(ctx.sim.world(), first_visit)?;
    Ok(ActionOutcome::success(text).with_change(StateChange::PlayerMoved { from, to }))
}
