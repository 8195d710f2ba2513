//! Verbs about the game rather than the world.

use delve_core::Variable;
use delve_simulation::scoring;

use super::{ActionContext, ActionOutcome};
use crate::error::FictionResult;
use crate::narrator::Verbosity;
use crate::parser::{Command, Verb};

const HELP: &str = "\
Tell me what to do in plain English: TAKE LAMP, OPEN THE MAILBOX, PUT EGG IN CASE.
Move with compass directions (NORTH or just N, UP, DOWN, IN, OUT).
Useful commands: LOOK, INVENTORY (I), EXAMINE, READ, WAIT (Z), SCORE, DIAGNOSE, AGAIN (G).
VERBOSE, BRIEF and SUPERBRIEF change how much rooms are described.
Several commands can be given at once, separated by periods or THEN.";

/// WAIT.
pub fn wait(_ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    Ok(ActionOutcome::success("Time passes..."))
}

/// SCORE.
pub fn score(ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    Ok(ActionOutcome::success(scoring::score_report(ctx.world())))
}

/// DIAGNOSE: wounds and deaths so far.
pub fn diagnose(ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    let state = &ctx.world().state;
    let wounds = state.variable(Variable::Wounds);
    let mut text = match wounds {
        w if w <= 0 => "You are in perfect health.".to_string(),
        1 => "You have a light wound.".to_string(),
        w => format!("You have {w} wounds."),
    };
    match state.deaths {
        0 => {}
        1 => text.push_str("\nYou have been killed once."),
        2 => text.push_str("\nYou have been killed twice."),
        n => text.push_str(&format!("\nYou have been killed {n} times.")),
    }
    Ok(ActionOutcome::success(text))
}

/// VERBOSE, BRIEF, SUPERBRIEF.
pub fn verbosity(ctx: &mut ActionContext<'_>, command: &Command) -> FictionResult<ActionOutcome> {
    let level = match command.verb {
        Verb::Verbose => Verbosity::Verbose,
        Verb::Superbrief => Verbosity::Superbrief,
        _ => Verbosity::Brief,
    };
    ctx.narrator.set_verbosity(level);
    Ok(ActionOutcome::success(level.announcement()))
}

/// QUIT: the final score, and a request to stop.
pub fn quit(ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    ctx.quit = true;
    Ok(ActionOutcome::success(scoring::score_report(ctx.world())))
}

/// HELP.
pub fn help(_ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    Ok(ActionOutcome::success(HELP))
}

/// AGAIN outside a session, which repeats commands itself.
pub fn again(_ctx: &mut ActionContext<'_>, _command: &Command) -> FictionResult<ActionOutcome> {
    Ok(ActionOutcome::failure("There is nothing to repeat."))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn diagnose_counts_wounds_and_deaths() {
        let mut sim = sim_in("west-of-house", &[]);
        let outcome = act(&mut sim, &Command::new(Verb::Diagnose));
        assert_eq!(outcome.message, "You are in perfect health.");

        sim.world_mut().state.set_variable(Variable::Wounds, 3);
        sim.world_mut().state.deaths = 2;
        let outcome = act(&mut sim, &Command::new(Verb::Diagnose));
        assert_eq!(outcome.message, "You have 3 wounds.\nYou have been killed twice.");
    }

    #[test]
    fn score_reports_rank() {
        let mut sim = sim_in("west-of-house", &[]);
        let outcome = act(&mut sim, &Command::new(Verb::Score));
        assert!(outcome.message.starts_with("Your score is 0"));
        assert!(outcome.message.ends_with("This gives you the rank of Beginner."));
    }

    #[test]
    fn waiting_and_help_always_succeed() {
        let mut sim = sim_in("west-of-house", &[]);
        assert_eq!(act(&mut sim, &Command::new(Verb::Wait)).message, "Time passes...");
        assert!(act(&mut sim, &Command::new(Verb::Help)).message.contains("INVENTORY"));
    }

    #[test]
    fn again_without_history_refuses() {
        let mut sim = sim_in("west-of-house", &[]);
        let outcome = act(&mut sim, &Command::new(Verb::Again));
        assert!(!outcome.success);
    }
}
