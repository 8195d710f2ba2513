pub mod play;
pub mod run;

use std::fs;
use std::path::Path;

use delve_fiction::{Session, SessionConfig, SessionSnapshot, Verbosity};

/// Start a session in the demo world.
fn new_session(seed: u64, verbosity: Verbosity) -> Result<Session, String> {
    let config = SessionConfig::default()
        .with_seed(seed)
        .with_verbosity(verbosity);
    Session::demo(config).map_err(|e| format!("could not start the game: {e}"))
}

/// Write the session to `path` as JSON.
fn save_session(session: &Session, path: &Path) -> Result<(), String> {
    let json = session
        .snapshot()
        .to_json()
        .map_err(|e| format!("could not save: {e}"))?;
    fs::write(path, json).map_err(|e| format!("could not write {}: {e}", path.display()))
}

/// Replace the session's state with the one saved at `path`.
fn load_session(session: &mut Session, path: &Path) -> Result<(), String> {
    let json = fs::read_to_string(path).map_err(|e| format!("could not read {}: {e}", path.display()))?;
    let snapshot = SessionSnapshot::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
    session
        .restore(&snapshot)
        .map_err(|e| format!("could not restore {}: {e}", path.display()))
}
