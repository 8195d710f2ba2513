//! Death, resurrection and the end of the game.
//!
//! The first deaths cost points and scatter the player's belongings over
//! the map. The first resurrection is never complete: the player wakes at
//! the respawn room as a ghost. Dying while a ghost sends the player to the
//! ghost room instead. The last allowed death ends the game.

use delve_core::{GameFlag, Location, ObjectFlags, ObjectId, RoomFlags, RoomId, Variable, World};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SimResult;
use crate::rng::RandomSource;

/// Rules for dying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MortalityConfig {
    /// Points lost per death.
    pub death_penalty: i32,
    /// Key of the room the player wakes in.
    pub respawn_room: String,
    /// Key of the room a ghost is sent to.
    pub ghost_room: String,
    /// Percent chance per move in the dark of meeting a grue.
    pub grue_chance: u32,
    /// The death that ends the game.
    pub max_deaths: u32,
}

impl Default for MortalityConfig {
    fn default() -> Self {
        Self {
            death_penalty: 10,
            respawn_room: delve_core::demo::RESPAWN_ROOM.to_string(),
            ghost_room: delve_core::demo::GHOST_ROOM.to_string(),
            grue_chance: 75,
            max_deaths: 3,
        }
    }
}

/// Where a death led.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathOutcome {
    /// Back on your feet at the respawn room.
    Resurrected,
    /// Sent to the ghost room.
    Purgatory,
    /// The game is over.
    GameOver,
}

/// What happened when the player died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathReport {
    /// What killed the player.
    pub cause: String,
    /// Where the death led.
    pub outcome: DeathOutcome,
    /// Text for the player.
    pub message: String,
}

fn rooms_with(world: &World, flags: RoomFlags) -> Vec<RoomId> {
    world.rooms().filter(|r| r.is(flags)).map(|r| r.id).collect()
}

/// Send the player's belongings to random rooms: treasures to land rooms,
/// everything else to rooms above ground.
///
/// TOUCHED is cleared on everything scattered except objects with a
/// first-sight description, whose text names their starting place.
fn scatter(world: &mut World, rng: &mut dyn RandomSource) -> SimResult<Vec<ObjectId>> {
    let land = rooms_with(world, RoomFlags::LAND);
    let above = rooms_with(world, RoomFlags::ABOVE_GROUND);
    let fallback = world.state.current_room;
    let items = world.player.inventory.clone();
    for &item in &items {
        let pool = if world.object(item)?.is_treasure() { &land } else { &above };
        let room = rng.pick_index(pool.len()).map_or(fallback, |i| pool[i]);
        world.move_object(item, Location::Room(room))?;
        let object = world.object_mut(item)?;
        // Things with a first-sight description keep it tied to their home.
        if object.initial_description.is_none() {
            object.flags.remove(ObjectFlags::TOUCHED);
        }
    }
    Ok(items)
}

/// Kill the player and apply the consequences.
pub fn kill_player(
    world: &mut World,
    cause: &str,
    config: &MortalityConfig,
    rng: &mut dyn RandomSource,
) -> SimResult<DeathReport> {
    let state = &mut world.state;
    if state.deaths + 1 >= config.max_deaths {
        state.deaths += 1;
        state.game_over = true;
        info!(cause, deaths = state.deaths, "game over");
        return Ok(DeathReport {
            cause: cause.to_string(),
            outcome: DeathOutcome::GameOver,
            message: format!(
                "You have died ({cause}).\n\nYou clearly are a suicidal maniac. \
                 We don't allow psychotics in the cave, since they may harm other \
                 adventurers. Your remains will be installed in the Land of the Living \
                 Dead, where your fellow adventurers may gloat over them.\n\n*** The game is over ***"
            ),
        });
    }

    let ghost = state.has_flag(GameFlag::Ghost);
    let destination = if ghost {
        world.room_id(&config.ghost_room)?
    } else {
        world.room_id(&config.respawn_room)?
    };

    let state = &mut world.state;
    state.score -= config.death_penalty;
    state.deaths += 1;
    state.set_variable(Variable::Wounds, 0);
    let deaths = state.deaths;
    let scattered = scatter(world, rng)?;

    let (outcome, message) = if ghost {
        (
            DeathOutcome::Purgatory,
            format!(
                "You have died ({cause}).\n\nAs you take your last breath, you feel \
                 relieved of your burdens. The feeling passes as you find yourself \
                 before the gates of Hell, where the spirits jeer at you."
            ),
        )
    } else {
        (
            DeathOutcome::Resurrected,
            format!(
                "You have died ({cause}).\n\nNow, let's take a look here... Well, you \
                 probably deserve another chance. I can't quite fix you up completely, \
                 but you can't have everything."
            ),
        )
    };
    world.state.set_flag(GameFlag::Ghost);
    world.state.current_room = destination;
    if let Ok(room) = world.room_mut(destination) {
        room.visited = true;
    }
    info!(
        cause,
        deaths,
        outcome = ?outcome,
        scattered = scattered.len(),
        "player died"
    );
    Ok(DeathReport {
        cause: cause.to_string(),
        outcome,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRng};
    use delve_core::demo::demo_world;
    use proptest::prelude::*;

    fn laden_world() -> World {
        let mut world = demo_world().unwrap();
        for key in ["leaflet", "egg", "knife"] {
            let id = world.object_id(key).unwrap();
            world.move_object(id, Location::Player).unwrap();
            world.object_mut(id).unwrap().flags.insert(ObjectFlags::TOUCHED);
        }
        world.state.score = 20;
        world.state.set_variable(Variable::Wounds, 2);
        world.state.current_room = world.room_id("cellar").unwrap();
        world
    }

    #[test]
    fn first_death_resurrects_and_scatters() {
        let mut world = laden_world();
        let report = kill_player(&mut world, "eaten by a grue", &MortalityConfig::default(), &mut ScriptedRng::default()).unwrap();
        assert_eq!(report.outcome, DeathOutcome::Resurrected);
        assert!(report.message.starts_with("You have died (eaten by a grue)."));
        assert_eq!(world.state.deaths, 1);
        assert_eq!(world.state.score, 10);
        assert_eq!(world.state.variable(Variable::Wounds), 0);
        assert_eq!(world.state.current_room, world.room_id("forest").unwrap());
        assert!(world.player.is_empty());
        assert!(world.state.has_flag(GameFlag::Ghost));
        assert_eq!(report.cause, "eaten by a grue");

        let egg = world.object(world.object_id("egg").unwrap()).unwrap();
        let egg_room = world.room_of(egg.id).unwrap();
        assert!(world.room(egg_room).unwrap().is(RoomFlags::LAND));
        let leaflet = world.object(world.object_id("leaflet").unwrap()).unwrap();
        assert!(!leaflet.is(ObjectFlags::TOUCHED));
        let leaflet_room = world.room_of(leaflet.id).unwrap();
        assert!(world.room(leaflet_room).unwrap().is(RoomFlags::ABOVE_GROUND));
        world.validate().unwrap();
    }

    #[test]
    fn a_ghost_dies_into_the_land_of_the_dead() {
        let mut world = laden_world();
        let config = MortalityConfig::default();
        let mut rng = ScriptedRng::default();
        let first = kill_player(&mut world, "first", &config, &mut rng).unwrap();
        assert_eq!(first.outcome, DeathOutcome::Resurrected);
        let second = kill_player(&mut world, "second", &config, &mut rng).unwrap();
        assert_eq!(second.outcome, DeathOutcome::Purgatory);
        assert_eq!(world.state.current_room, world.room_id("land-of-the-dead").unwrap());
    }

    #[test]
    fn first_sight_descriptions_stay_touched() {
        let mut world = laden_world();
        let lamp = world.object_id("lamp").unwrap();
        world.move_object(lamp, Location::Player).unwrap();
        world.object_mut(lamp).unwrap().flags.insert(ObjectFlags::TOUCHED);
        kill_player(&mut world, "x", &MortalityConfig::default(), &mut ScriptedRng::default()).unwrap();
        assert!(world.object(lamp).unwrap().is(ObjectFlags::TOUCHED));
        let knife = world.object_id("knife").unwrap();
        assert!(!world.object(knife).unwrap().is(ObjectFlags::TOUCHED));
    }

    #[test]
    fn third_death_ends_the_game() {
        let mut world = laden_world();
        let config = MortalityConfig::default();
        let mut rng = ScriptedRng::default();
        kill_player(&mut world, "first", &config, &mut rng).unwrap();
        kill_player(&mut world, "second", &config, &mut rng).unwrap();
        assert!(!world.state.game_over);
        let report = kill_player(&mut world, "third", &config, &mut rng).unwrap();
        assert_eq!(report.outcome, DeathOutcome::GameOver);
        assert!(world.state.game_over);
        assert_eq!(world.state.deaths, 3);
    }

    #[test]
    fn ghosts_go_to_the_land_of_the_dead() {
        let mut world = laden_world();
        world.state.set_flag(GameFlag::Ghost);
        let report = kill_player(&mut world, "troll", &MortalityConfig::default(), &mut ScriptedRng::default()).unwrap();
        assert_eq!(report.outcome, DeathOutcome::Purgatory);
        assert_eq!(world.state.current_room, world.room_id("land-of-the-dead").unwrap());
        assert_eq!(world.state.deaths, 1);
    }

    #[test]
    fn unknown_respawn_room_is_an_error() {
        let mut world = laden_world();
        let config = MortalityConfig {
            respawn_room: "nowhere".to_string(),
            ..MortalityConfig::default()
        };
        assert!(kill_player(&mut world, "x", &config, &mut ScriptedRng::default()).is_err());
        assert_eq!(world.state.deaths, 0);
        assert_eq!(world.state.score, 20);
        assert!(!world.player.is_empty());
    }

    proptest! {
        #[test]
        fn early_deaths_always_resurrect(seed in any::<u64>(), deaths in 0u32..2) {
            let mut world = laden_world();
            world.state.deaths = deaths;
            let held = world.player.inventory.clone();
            let mut rng = GameRng::seeded(seed);
            let report = kill_player(&mut world, "test", &MortalityConfig::default(), &mut rng).unwrap();
            prop_assert_eq!(report.outcome, DeathOutcome::Resurrected);
            prop_assert_eq!(world.state.deaths, deaths + 1);
            prop_assert!(world.player.is_empty());
            for id in held {
                prop_assert!(world.room_of(id).is_some());
            }
            prop_assert!(world.validate().is_ok());
        }
    }
}
