use delve_core::{ObjectId, WorldError};

use crate::daemon::DaemonId;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while running a turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The world model refused a mutation.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A daemon was addressed that is not registered.
    #[error("no daemon registered as {0}")]
    UnknownDaemon(DaemonId),

    /// An actor was addressed that is not registered.
    #[error("no actor animates {0}")]
    UnknownActor(ObjectId),

    /// Saved simulation state does not fit the registered daemons and actors.
    #[error("snapshot mismatch: {0}")]
    Snapshot(String),
}
