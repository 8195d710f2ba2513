//! Core world model for Delve: rooms, objects, the inventory, and global state.
//!
//! This crate owns every piece of mutable game state and the invariants that
//! bind it together. It knows nothing about parsing or turns; you can build a
//! [`World`] from content records, move things around, and snapshot it.

/// Content records and the two-pass world builder.
pub mod builder;
/// Declarative conditions evaluated against the world.
pub mod condition;
/// Built-in demo content.
pub mod demo;
/// Directions of travel.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Closed flag sets and named variables.
pub mod flags;
/// Room and object identifiers.
pub mod id;
/// Game objects and their locations.
pub mod object;
/// The player's inventory.
pub mod player;
/// Plain content records.
pub mod records;
/// Rooms, exits, and conditional text.
pub mod room;
/// Snapshots of mutable world state.
pub mod snapshot;
/// Global game state.
pub mod state;
/// The central world model.
pub mod world;

/// Re-export the builder.
pub use builder::WorldBuilder;
/// Re-export conditions.
pub use condition::Condition;
/// Re-export directions.
pub use direction::Direction;
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export flag types.
pub use flags::{GameFlag, ObjectFlags, RoomFlags, Variable};
/// Re-export identifiers.
pub use id::{ObjectId, RoomId};
/// Re-export object types.
pub use object::{GameObject, Location};
/// Re-export content records.
pub use records::{ExitRecord, ObjectRecord, Placement, RoomRecord, WorldRecords};
/// Re-export room types.
pub use room::{ConditionalText, Exit, Room};
/// Re-export snapshot types.
pub use snapshot::Snapshot;
/// Re-export global state.
pub use state::GlobalState;
/// Re-export the world model.
pub use world::World;
