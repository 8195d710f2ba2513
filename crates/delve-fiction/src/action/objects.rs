//! Handlers for verbs that act on objects.

use delve_core::demo::TROPHY_CASE;
use delve_core::{Location, ObjectFlags, ObjectId, World};
use delve_simulation::{DaemonId, scoring};

use super::{ActionContext, ActionOutcome, StateChange, join_names};
use crate::error::FictionResult;
use crate::parser::{Command, Verb};

const YUKS: [&str; 4] = [
    "A valiant attempt.",
    "You can't be serious.",
    "An interesting idea...",
    "What a concept!",
];

/// The direct object, or a refusal for a command that arrived without one.
fn direct(command: &Command) -> Result<ObjectId, ActionOutcome> {
    command
        .direct
        .ok_or_else(|| ActionOutcome::failure(format!("What do you want to {}?", command.verb)))
}

/// Name of the first closed container between the player and `id`.
fn closed_holder(world: &World, id: ObjectId) -> Option<String> {
    let mut location = world.object(id).ok()?.location;
    while let Location::Object(holder) = location {
        let holder = world.object(holder).ok()?;
        if !holder.is_open_container() {
            return Some(holder.name.clone());
        }
        location = holder.location;
    }
    None
}

/// A refusal if `id` is in scope but sealed away from the player's hands.
fn out_of_reach(world: &World, id: ObjectId) -> FictionResult<Option<ActionOutcome>> {
    if world.is_reachable(id) {
        return Ok(None);
    }
    let message = match closed_holder(world, id) {
        Some(holder) => format!("The {holder} is closed."),
        None => format!("You can't reach the {}.", world.object(id)?.name),
    };
    Ok(Some(ActionOutcome::failure(message)))
}

fn trophy_case(world: &World) -> Option<ObjectId> {
    world.object_by_key(TROPHY_CASE).map(|o| o.id)
}

/// Run a single-object handler over every target of an `all` command,
/// prefixing each result with the object's name.
fn each_target(
    ctx: &mut ActionContext<'_>,
    command: &Command,
    one: fn(&mut ActionContext<'_>, ObjectId, &Command) -> FictionResult<ActionOutcome>,
) -> FictionResult<ActionOutcome> {
    if !command.is_multiple() {
        return match direct(command) {
            Ok(id) => one(ctx, id, command),
            Err(refusal) => Ok(refusal),
        };
    }
    let targets = command.targets();
    if targets.is_empty() {
        return Ok(ActionOutcome::failure(format!(
            "There is nothing here to {}.",
            command.verb
        )));
    }
    let mut combined = ActionOutcome::failure("");
    let mut lines = Vec::new();
    for id in targets {
        let outcome = one(ctx, id, command)?;
        lines.push(format!("{}: {}", ctx.name(id)?, outcome.message));
        combined.success |= outcome.success;
        combined.changes.extend(outcome.changes);
    }
    combined.message = lines.join("\n");
    Ok(combined)
}

/// TAKE.
pub fn take(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    each_target(ctx, command, take_one)
}

fn take_one(ctx: &mut ActionContext<'_>, id: ObjectId, command: &Command) -> FictionResult<ActionOutcome> {
    let world = ctx.world();
    let object = world.object(id)?;
    let name = object.name.clone();

    if world.player.has_item(id) {
        return Ok(ActionOutcome::failure("You already have that!"));
    }
    if object.is(ObjectFlags::ACTOR) || object.is(ObjectFlags::FIXED) || !object.is(ObjectFlags::TAKEABLE) {
        let pick = ctx.sim.rng().pick_index(YUKS.len()).unwrap_or(0);
        return Ok(ActionOutcome::failure(YUKS[pick]));
    }
    if let Some(container) = command.indirect {
        if !world.is_within(id, container) {
            let container = world.object(container)?.name.clone();
            return Ok(ActionOutcome::failure(format!("The {name} isn't in the {container}.")));
        }
    }
    if let Some(refusal) = out_of_reach(world, id)? {
        return Ok(refusal);
    }
    if !world.can_carry(id)? {
        return Ok(ActionOutcome::failure("Your load is too heavy."));
    }

    let from_case = trophy_case(world).is_some_and(|case| object.location == Location::Object(case));
    let mut outcome = ActionOutcome::success("Taken.");
    ctx.move_object(id, Location::Player, &mut outcome)?;
    ctx.set_flags(id, ObjectFlags::TOUCHED, &mut outcome)?;
    let mut delta = scoring::claim(ctx.world_mut(), id)?;
    if from_case {
        delta -= scoring::withdraw(ctx.world_mut(), id)?;
    }
    if delta != 0 {
        outcome.changes.push(StateChange::ScoreChanged { delta });
    }
    Ok(outcome)
}

/// DROP.
pub fn drop(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    each_target(ctx, command, drop_one)
}

fn drop_one(ctx: &mut ActionContext<'_>, id: ObjectId, _command: &Command) -> FictionResult<ActionOutcome> {
    if !ctx.world().is_held(id) {
        return Ok(ActionOutcome::failure("You don't have that!"));
    }
    let room = ctx.world().state.current_room;
    let mut outcome = ActionOutcome::success("Dropped.");
    ctx.move_object(id, Location::Room(room), &mut outcome)?;
    Ok(outcome)
}

/// PUT X IN/ON Y.
pub fn put(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    each_target(ctx, command, put_one)
}

fn put_one(ctx: &mut ActionContext<'_>, id: ObjectId, command: &Command) -> FictionResult<ActionOutcome> {
    let Some(container) = command.indirect else {
        return Ok(ActionOutcome::failure("What do you want to put it in?"));
    };
    let world = ctx.world();
    if id == container || world.is_within(container, id) {
        return Ok(ActionOutcome::failure("How can you do that?"));
    }
    if !world.is_held(id) {
        return Ok(ActionOutcome::failure("You don't have that!"));
    }
    let holder = world.object(container)?;
    let holder_name = holder.name.clone();
    if !holder.is(ObjectFlags::CONTAINER) || holder.is(ObjectFlags::ACTOR) {
        return Ok(ActionOutcome::failure(format!("You can't put things in the {holder_name}.")));
    }
    if !holder.is_open_container() {
        return Ok(ActionOutcome::failure(format!("The {holder_name} is closed.")));
    }
    if world.object(id)?.location == Location::Object(container) {
        return Ok(ActionOutcome::failure(format!(
            "The {} is already in the {holder_name}.",
            world.object(id)?.name
        )));
    }
    if !world.fits_in(id, container)? {
        return Ok(ActionOutcome::failure("There's no room."));
    }

    let into_case = trophy_case(world) == Some(container);
    let mut outcome = ActionOutcome::success("Done.");
    ctx.move_object(id, Location::Object(container), &mut outcome)?;
    if into_case {
        let delta = scoring::deposit(ctx.world_mut(), id)?;
        if delta != 0 {
            outcome.changes.push(StateChange::ScoreChanged { delta });
        }
    }
    Ok(outcome)
}

/// OPEN.
pub fn open(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    let world = ctx.world();
    if let Some(refusal) = out_of_reach(world, id)? {
        return Ok(refusal);
    }
    let object = world.object(id)?;
    let name = object.name.clone();
    if !object.is(ObjectFlags::OPENABLE) {
        return Ok(ActionOutcome::failure(format!(
            "You must tell me how to do that to {}.",
            object.a_name()
        )));
    }
    if object.is(ObjectFlags::OPEN) {
        return Ok(ActionOutcome::failure("It is already open."));
    }

    let revealed: Vec<String> = if object.is(ObjectFlags::CONTAINER) && !object.is(ObjectFlags::TRANSPARENT) {
        object
            .contents
            .iter()
            .filter_map(|&inner| world.object(inner).ok())
            .filter(|o| !o.is(ObjectFlags::INVISIBLE))
            .map(|o| o.a_name())
            .collect()
    } else {
        Vec::new()
    };
    let message = if revealed.is_empty() {
        "Opened.".to_string()
    } else {
        format!("Opening the {name} reveals {}.", join_names(&revealed))
    };
    let mut outcome = ActionOutcome::success(message);
    ctx.set_flags(id, ObjectFlags::OPEN, &mut outcome)?;
    Ok(outcome)
}

/// CLOSE.
pub fn close(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    if let Some(refusal) = out_of_reach(ctx.world(), id)? {
        return Ok(refusal);
    }
    let object = ctx.world().object(id)?;
    if !object.is(ObjectFlags::OPENABLE) {
        return Ok(ActionOutcome::failure(format!(
            "You must tell me how to do that to {}.",
            object.a_name()
        )));
    }
    if !object.is(ObjectFlags::OPEN) {
        return Ok(ActionOutcome::failure("It is already closed."));
    }
    let mut outcome = ActionOutcome::success("Closed.");
    ctx.clear_flags(id, ObjectFlags::OPEN, &mut outcome)?;
    Ok(outcome)
}

/// EXAMINE.
pub fn examine(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    let text = ctx.narrator.describe_object(ctx.sim.world(), id)?;
    Ok(ActionOutcome::success(text))
}

/// READ.
pub fn read(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    let world = ctx.world();
    let object = world.object(id)?;
    if !object.is(ObjectFlags::READABLE) {
        return Ok(ActionOutcome::failure(format!("How does one read {}?", object.a_name())));
    }
    if !world.player_has_light() {
        return Ok(ActionOutcome::failure("It is impossible to read in the dark."));
    }
    let text = object
        .text
        .clone()
        .unwrap_or_else(|| object.describe(world).to_string());
    Ok(ActionOutcome::success(text))
}

/// INVENTORY.
pub fn inventory(ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    let text = ctx.narrator.inventory(ctx.sim.world())?;
    Ok(ActionOutcome::success(text))
}

/// LIGHT.
///
/// Lighting the lamp while its fuel daemon is disabled arms the daemon at
/// its first stage: on the first lighting, and again after it burned out.
/// While the daemon runs, switching the lamp off and on leaves it where it
/// stopped. Other burned-out lights stay dark.
pub fn light(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    let world = ctx.world();
    if let Some(refusal) = out_of_reach(world, id)? {
        return Ok(refusal);
    }
    let object = world.object(id)?;
    let name = object.name.clone();
    let is_lamp = object.key == "lamp";
    if !object.is(ObjectFlags::LIGHT_SOURCE) {
        return Ok(ActionOutcome::failure("You can't turn that on."));
    }
    if object.is(ObjectFlags::BURNED_OUT) && !is_lamp {
        return Ok(ActionOutcome::failure(format!("The {name} has burned out and won't light.")));
    }
    if object.is(ObjectFlags::LIT) {
        return Ok(ActionOutcome::failure("It is already on."));
    }
    let was_dark = !world.player_has_light();
    let burned_out = object.is(ObjectFlags::BURNED_OUT);

    let mut outcome = ActionOutcome::success(format!("The {name} is now on."));
    if burned_out {
        ctx.clear_flags(id, ObjectFlags::BURNED_OUT, &mut outcome)?;
    }
    ctx.set_flags(id, ObjectFlags::LIT, &mut outcome)?;
    if is_lamp && !ctx.sim.scheduler().is_enabled(DaemonId::Lamp) {
        ctx.sim.arm_daemon(DaemonId::Lamp)?;
        outcome.changes.push(StateChange::DaemonArmed {
            daemon: DaemonId::Lamp,
        });
    }
    let world = ctx.sim.world();
    if was_dark && world.player_has_light() {
        let room = ctx.narrator.describe_room(world, world.state.current_room, true)?;
        outcome.message = format!("{}\n\n{room}", outcome.message);
    }
    Ok(outcome)
}

/// EXTINGUISH.
pub fn extinguish(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    if let Some(refusal) = out_of_reach(ctx.world(), id)? {
        return Ok(refusal);
    }
    let object = ctx.world().object(id)?;
    let name = object.name.clone();
    if !object.is(ObjectFlags::LIGHT_SOURCE) {
        return Ok(ActionOutcome::failure("You can't turn that off."));
    }
    if !object.is(ObjectFlags::LIT) {
        return Ok(ActionOutcome::failure("It is already off."));
    }
    let mut outcome = ActionOutcome::success(format!("The {name} is now off."));
    ctx.clear_flags(id, ObjectFlags::LIT, &mut outcome)?;
    if !ctx.world().player_has_light() {
        outcome.message.push_str("\nIt is now pitch black.");
    }
    Ok(outcome)
}

/// MOVE, PUSH, PULL.
pub fn shift(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let id = match direct(command) {
        Ok(id) => id,
        Err(refusal) => return Ok(refusal),
    };
    if let Some(refusal) = out_of_reach(ctx.world(), id)? {
        return Ok(refusal);
    }
    if ctx.specials.has(Verb::Move, id) {
        return Ok(ActionOutcome::success("Done."));
    }
    let object = ctx.world().object(id)?;
    if object.is(ObjectFlags::TAKEABLE) {
        Ok(ActionOutcome::success(format!("Moving the {} reveals nothing.", object.name)))
    } else {
        Ok(ActionOutcome::failure(format!("You can't move the {}.", object.name)))
    }
}
