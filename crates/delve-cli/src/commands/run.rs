//! Replay a command file.

use std::fs;
use std::path::Path;

use colored::Colorize;
use delve_fiction::Verbosity;
use tracing::info;

/// Replay `script` line by line. Blank lines and lines starting with `#`
/// are skipped.
pub fn run(script: &Path, seed: u64) -> Result<(), String> {
    let text = fs::read_to_string(script).map_err(|e| format!("could not read {}: {e}", script.display()))?;
    let mut session = super::new_session(seed, Verbosity::default())?;
    println!("{}\n", session.intro().map_err(|e| e.to_string())?);

    let mut count = 0;
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        count += 1;
        println!("{}", format!("> {line}").bold());
        println!("{}\n", session.process_command(line));
        if session.wants_quit() || session.is_over() {
            break;
        }
    }
    info!(commands = count, moves = session.world().state.moves, "script finished");
    Ok(())
}
