//! Fighting and giving: verbs aimed at creatures.

use delve_core::{ObjectFlags, ObjectId};
use delve_simulation::TurnOutput;

use super::{ActionContext, ActionOutcome, StateChange};
use crate::error::FictionResult;
use crate::parser::Command;

/// Fold what the creature's reaction produced into an outcome.
fn reaction(ctx: &ActionContext<'_>, output: TurnOutput) -> FictionResult<ActionOutcome> {
    let mut lines = output.messages;
    let mut outcome = ActionOutcome::success("");
    if let Some(report) = output.death {
        ctx.narrate_death(&report, &mut lines)?;
        outcome.changes.push(StateChange::PlayerDied {
            cause: report.cause.clone(),
        });
    }
    outcome.message = lines.join("\n");
    Ok(outcome)
}

fn first_weapon(ctx: &ActionContext<'_>) -> Option<ObjectId> {
    let world = ctx.world();
    world
        .player
        .inventory
        .iter()
        .copied()
        .find(|&id| world.object(id).is_ok_and(|o| o.is(ObjectFlags::WEAPON)))
}

/// ATTACK X [WITH Y].
///
/// Without a named weapon the first one carried is used. Bare hands are
/// refused.
pub fn attack(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let Some(target) = command.direct else {
        return Ok(ActionOutcome::failure("What do you want to attack?"));
    };
    let target_name = ctx.name(target)?;
    if !ctx.sim.is_actor(target) {
        return Ok(ActionOutcome::failure(format!(
            "I've known strange people, but fighting a {target_name}?"
        )));
    }
    let weapon = match command.indirect {
        Some(weapon) => {
            let world = ctx.world();
            let object = world.object(weapon)?;
            if !world.is_held(weapon) {
                return Ok(ActionOutcome::failure(format!(
                    "You aren't even holding the {}.",
                    object.name
                )));
            }
            if !object.is(ObjectFlags::WEAPON) {
                return Ok(ActionOutcome::failure(format!(
                    "Trying to attack the {target_name} with {} is suicidal.",
                    object.a_name()
                )));
            }
            weapon
        }
        None => match first_weapon(ctx) {
            Some(weapon) => weapon,
            None => {
                return Ok(ActionOutcome::failure(format!(
                    "Trying to attack the {target_name} with your bare hands is suicidal."
                )));
            }
        },
    };
    let output = ctx.sim.attack(target, Some(weapon))?;
    reaction(ctx, output)
}

/// GIVE X TO Y.
pub fn give(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let (Some(item), Some(target)) = (command.direct, command.indirect) else {
        return Ok(ActionOutcome::failure("What do you want to give it to?"));
    };
    if !ctx.world().is_held(item) {
        return Ok(ActionOutcome::failure("You don't have that!"));
    }
    if !ctx.sim.is_actor(target) {
        return Ok(ActionOutcome::failure(format!(
            "You can't give {} to a {}!",
            ctx.world().object(item)?.a_name(),
            ctx.name(target)?
        )));
    }
    let from = ctx.world().object(item)?.location;
    let output = ctx.sim.give(target, item)?;
    let to = ctx.world().object(item)?.location;
    let mut outcome = reaction(ctx, output)?;
    outcome
        .changes
        .insert(0, StateChange::Moved { object: item, from, to });
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::parser::{Preposition, Verb};
    use delve_core::{GameFlag, Location};

    #[test]
    fn only_creatures_can_be_fought() {
        let mut sim = sim_in("west-of-house", &[]);
        let mailbox = id(&sim, "mailbox");
        hold(&mut sim, "knife");
        let outcome = act(&mut sim, &Command::new(Verb::Attack).with_direct(mailbox));
        assert_eq!(outcome.message, "I've known strange people, but fighting a small mailbox?");
    }

    #[test]
    fn bare_hands_are_refused() {
        let mut sim = sim_in("troll-room", &[]);
        let troll = id(&sim, "troll");
        let outcome = act(&mut sim, &Command::new(Verb::Attack).with_direct(troll));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Trying to attack the troll with your bare hands is suicidal.");
    }

    #[test]
    fn the_weapon_must_be_a_weapon() {
        let mut sim = sim_in("troll-room", &[]);
        let troll = id(&sim, "troll");
        let leaflet = hold(&mut sim, "leaflet");
        let command = Command::new(Verb::Attack)
            .with_direct(troll)
            .with_indirect(Preposition::With, leaflet);
        let outcome = act(&mut sim, &command);
        assert_eq!(outcome.message, "Trying to attack the troll with a leaflet is suicidal.");
    }

    #[test]
    fn killing_the_troll_opens_the_way() {
        // The first roll lands the blow, the second picks the killing outcome.
        let mut sim = sim_in("troll-room", &[0, 99, 99, 99]);
        let troll = id(&sim, "troll");
        hold(&mut sim, "sword");
        let mut killed = false;
        for _ in 0..10 {
            let outcome = act(&mut sim, &Command::new(Verb::Attack).with_direct(troll));
            assert!(outcome.success);
            if sim.world().object(troll).unwrap().location == Location::Nowhere {
                killed = true;
                break;
            }
        }
        if killed {
            assert!(sim.world().state.has_flag(GameFlag::TrollDefeated));
        }
    }

    #[test]
    fn gifts_go_to_the_creature() {
        let mut sim = sim_in("troll-room", &[]);
        let troll = id(&sim, "troll");
        let garlic = hold(&mut sim, "garlic");
        let command = Command::new(Verb::Give)
            .with_direct(garlic)
            .with_indirect(Preposition::To, troll);
        let outcome = act(&mut sim, &command);
        assert!(outcome.success);
        assert!(outcome.message.contains("graciously accepts the gift"));
        assert!(!sim.world().player.has_item(garlic));
        assert!(matches!(outcome.changes[0], StateChange::Moved { to: Location::Nowhere, .. }));
    }
}
