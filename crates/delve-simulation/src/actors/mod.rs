//! The non-player characters of the demo world.

use delve_core::ObjectId;

use crate::combat::{
    BlowOutcome, blow_against_player_message, player_blow_message, player_strength, resolve_blow,
    wound_player,
};
use crate::context::SimContext;
use crate::event::SimEventKind;

/// The thief.
pub mod thief;
/// The troll.
pub mod troll;

pub use thief::Thief;
pub use troll::Troll;

/// `attacker` swings at the player with the given strength.
pub(crate) fn strike_player(ctx: &mut SimContext<'_>, attacker: ObjectId, name: &str, strength: u32) {
    let defense = player_strength(ctx.world);
    let outcome = resolve_blow(strength, defense, &mut *ctx.rng);
    ctx.say(blow_against_player_message(name, outcome));
    ctx.emit(
        SimEventKind::Blow {
            attacker: Some(attacker),
            defender: None,
            outcome,
        },
        format!("the {name} struck the player"),
    );
    if wound_player(ctx.world, outcome) {
        ctx.kill_player(format!("slain by the {name}"));
    }
}

/// Tell the player how their blow against `defender` went.
pub(crate) fn announce_blow(ctx: &mut SimContext<'_>, defender: ObjectId, name: &str, outcome: BlowOutcome) {
    ctx.say(player_blow_message(name, outcome));
    ctx.emit(
        SimEventKind::Blow {
            attacker: None,
            defender: Some(defender),
            outcome,
        },
        format!("the player struck the {name}"),
    );
}
