//! The interactive read-eval-print loop.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use delve_fiction::Verbosity;

/// Commands the loop answers itself instead of passing to the game.
enum LoopCommand<'a> {
    Save(&'a Path),
    Restore(&'a Path),
}

fn loop_command(line: &str) -> Option<LoopCommand<'_>> {
    let (word, rest) = line.split_once(char::is_whitespace)?;
    let path = Path::new(rest.trim());
    match word.to_ascii_lowercase().as_str() {
        "save" => Some(LoopCommand::Save(path)),
        "restore" => Some(LoopCommand::Restore(path)),
        _ => None,
    }
}

/// Play on stdin until the player quits, the game ends or input runs out.
pub fn run(seed: u64, verbose: bool, load: Option<&Path>) -> Result<(), String> {
    let verbosity = if verbose { Verbosity::Verbose } else { Verbosity::default() };
    let mut session = super::new_session(seed, verbosity)?;
    match load {
        Some(path) => {
            super::load_session(&mut session, path)?;
            println!("{}\n", "Restored.".dimmed());
            println!("{}\n", session.describe_here().map_err(|e| e.to_string())?);
        }
        None => println!("{}\n", session.intro().map_err(|e| e.to_string())?),
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    loop {
        print!("{} ", ">".bold());
        stdout.flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            println!();
            break;
        }
        let line = line.trim();

        match loop_command(line) {
            Some(LoopCommand::Save(path)) => match super::save_session(&session, path) {
                Ok(()) => println!("Saved to {}.\n", path.display()),
                Err(e) => println!("{}\n", e.red()),
            },
            Some(LoopCommand::Restore(path)) => match super::load_session(&mut session, path) {
                Ok(()) => match session.describe_here() {
                    Ok(room) => println!("Restored.\n\n{room}\n"),
                    Err(e) => println!("{}\n", e.to_string().red()),
                },
                Err(e) => println!("{}\n", e.red()),
            },
            None => {
                println!("{}\n", session.process_command(line));
                if session.wants_quit() || session.is_over() {
                    break;
                }
            }
        }
    }
    Ok(())
}
