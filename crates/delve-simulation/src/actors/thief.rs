use delve_core::{GameFlag, Location, ObjectFlags, ObjectId, RoomFlags, RoomId, Variable, World};
use tracing::{debug, info};

use super::{announce_blow, strike_player};
use crate::actor::{Actor, ActorCore, ActorState};
use crate::combat::{BlowOutcome, attack_strength, resolve_blow};
use crate::context::SimContext;
use crate::error::SimResult;
use crate::event::SimEventKind;

/// The thief's strength when fresh.
pub const THIEF_STRENGTH: u32 = 5;
/// At or below this strength the thief runs.
pub const THIEF_FLEE_STRENGTH: u32 = 2;
/// Percent chance per turn of robbing the player when sharing a room.
pub const STEAL_CHANCE: u32 = 30;
/// Percent chance per turn of wandering off.
pub const ROAM_CHANCE: u32 = 40;

/// Roams the underground, robbing the player of treasure.
///
/// The timer is set while the player has him engaged in a fight.
#[derive(Debug, Clone)]
pub struct Thief {
    core: ActorCore,
}

impl Thief {
    /// A thief animating `object`. His loot goes inside that object.
    pub fn new(object: ObjectId, name: impl Into<String>) -> Self {
        Self {
            core: ActorCore::new(object, name, THIEF_STRENGTH),
        }
    }

    fn haunts(world: &World, here: Option<RoomId>) -> Vec<RoomId> {
        world
            .rooms()
            .filter(|r| r.is(RoomFlags::UNDERGROUND) && !r.is(RoomFlags::SACRED))
            .filter(|r| Some(r.id) != here)
            .map(|r| r.id)
            .collect()
    }

    fn roam(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let here = ctx.world.room_of(self.core.object);
        let rooms = Self::haunts(ctx.world, here);
        let Some(index) = ctx.rng.pick_index(rooms.len()) else {
            return Ok(());
        };
        let to = rooms[index];
        let was_here = self.core.with_player(ctx.world);
        ctx.world.move_object(self.core.object, Location::Room(to))?;
        self.core.timer = 0;
        if was_here {
            ctx.say(format!("The {} slips away into the gloom.", self.core.name));
        } else if self.core.with_player(ctx.world) {
            ctx.say("Someone carrying a large bag is casually leaning against one of the walls here.");
        }
        debug!(turn = ctx.turn, actor = %self.core.object, room = %to, "thief moved");
        ctx.emit(
            SimEventKind::ActorMoved {
                actor: self.core.object,
                to,
            },
            format!("the {} moved", self.core.name),
        );
        Ok(())
    }

    fn loot_candidates(world: &World) -> Vec<ObjectId> {
        let room = world.state.current_room;
        let on_floor = world.room(room).map(|r| r.contents.clone()).unwrap_or_default();
        world
            .player
            .inventory
            .iter()
            .chain(on_floor.iter())
            .copied()
            .filter(|&id| {
                world
                    .object(id)
                    .is_ok_and(|o| o.is_treasure() && o.is(ObjectFlags::TAKEABLE))
            })
            .collect()
    }

    /// Take one treasure from the player or the floor. Returns whether
    /// anything was stolen.
    fn steal(&mut self, ctx: &mut SimContext<'_>) -> SimResult<bool> {
        let candidates = Self::loot_candidates(ctx.world);
        let Some(index) = ctx.rng.pick_index(candidates.len()) else {
            return Ok(false);
        };
        let item = candidates[index];
        let from_player = ctx.world.player.has_item(item);
        ctx.world.move_object(item, Location::Object(self.core.object))?;
        ctx.world.state.adjust_variable(Variable::ThiefLootCount, 1);

        let name = ctx.world.object(item)?.name.clone();
        if from_player {
            ctx.say(format!(
                "The {} deftly relieves you of the {name} and stuffs it in his bag.",
                self.core.name
            ));
        } else {
            ctx.say(format!(
                "The {} picks up the {name} and stuffs it in his bag.",
                self.core.name
            ));
        }
        info!(turn = ctx.turn, actor = %self.core.object, item = %item, "thief stole");
        ctx.emit(
            SimEventKind::Stolen {
                actor: self.core.object,
                item,
            },
            format!("the {} stole the {name}", self.core.name),
        );
        Ok(true)
    }

    fn die(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        self.core.stats.strength = 0;
        self.core.timer = 0;
        let floor = ctx
            .world
            .room_of(self.core.object)
            .map_or(Location::Nowhere, Location::Room);
        let loot = ctx.world.object(self.core.object)?.contents.clone();
        for item in loot {
            ctx.world.move_object(item, floor)?;
        }
        ctx.world.move_object(self.core.object, Location::Nowhere)?;
        ctx.world.state.set_flag(GameFlag::ThiefDead);
        info!(turn = ctx.turn, actor = %self.core.object, "thief killed");
        ctx.say(format!(
            "The {} collapses, and his bag spills its contents across the floor. \
             His body fades away like smoke.",
            self.core.name
        ));
        Ok(())
    }
}

impl Actor for Thief {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn execute_turn(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        match self.core.state {
            ActorState::Fleeing => {
                self.roam(ctx)?;
                let stats = &mut self.core.stats;
                stats.strength = (stats.strength + 1).min(stats.max_strength);
            }
            ActorState::Fighting if self.core.with_player(ctx.world) => {
                let strength = self.core.stats.strength;
                strike_player(ctx, self.core.object, &self.core.name, strength);
            }
            _ if self.core.with_player(ctx.world) => {
                if ctx.rng.chance(STEAL_CHANCE) && self.steal(ctx)? {
                    self.roam(ctx)?;
                } else if ctx.rng.chance(ROAM_CHANCE) {
                    self.roam(ctx)?;
                }
            }
            _ => {
                if ctx.rng.chance(ROAM_CHANCE) {
                    self.roam(ctx)?;
                }
            }
        }
        Ok(())
    }

    fn on_attacked(&mut self, ctx: &mut SimContext<'_>, weapon: Option<ObjectId>) -> SimResult<()> {
        let attack = attack_strength(ctx.world, weapon);
        let outcome = resolve_blow(attack, self.core.stats.strength, &mut *ctx.rng);
        announce_blow(ctx, self.core.object, &self.core.name, outcome);
        self.core.stats.strength = outcome.apply(self.core.stats.strength);
        if outcome == BlowOutcome::Killed {
            self.die(ctx)?;
        } else {
            self.core.timer = 1;
        }
        Ok(())
    }

    fn on_receive_item(&mut self, ctx: &mut SimContext<'_>, item: ObjectId) -> SimResult<()> {
        ctx.world.move_object(item, Location::Object(self.core.object))?;
        let object = ctx.world.object(item)?;
        let name = object.name.clone();
        if object.is_treasure() {
            ctx.world.state.adjust_variable(Variable::ThiefLootCount, 1);
        }
        ctx.say(format!(
            "The {} places the {name} in his bag and thanks you politely.",
            self.core.name
        ));
        Ok(())
    }

    fn transition_state(&self, world: &World) -> ActorState {
        let strength = self.core.stats.strength;
        if strength == 0 {
            ActorState::Dead
        } else if strength <= THIEF_FLEE_STRENGTH {
            ActorState::Fleeing
        } else if self.core.timer > 0 && self.core.with_player(world) {
            ActorState::Fighting
        } else {
            ActorState::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorRoster;
    use crate::config::ActorScope;
    use crate::event::EventLog;
    use crate::rng::ScriptedRng;
    use delve_core::demo::demo_world;

    struct Den {
        world: World,
        roster: ActorRoster,
        thief: ObjectId,
        events: EventLog,
    }

    impl Den {
        fn new() -> Self {
            let mut world = demo_world().unwrap();
            let thief = world.object_id("thief").unwrap();
            world.state.current_room = world.room_id("treasure-room").unwrap();
            let mut roster = ActorRoster::new();
            roster.register(Thief::new(thief, "thief"));
            Self {
                world,
                roster,
                thief,
                events: EventLog::new(0),
            }
        }

        fn step(&mut self, rolls: &[u32], f: impl FnOnce(&mut ActorRoster, &mut SimContext<'_>)) -> Vec<String> {
            let mut rng = ScriptedRng::new(rolls.iter().copied());
            let mut output = Vec::new();
            let mut ctx = SimContext {
                world: &mut self.world,
                events: &mut self.events,
                rng: &mut rng,
                turn: 1,
                output: &mut output,
                death: None,
            };
            f(&mut self.roster, &mut ctx);
            output
        }

        fn turn(&mut self, rolls: &[u32]) -> Vec<String> {
            self.step(rolls, |roster, ctx| roster.run(ctx, ActorScope::AllActors).unwrap())
        }

        fn attack(&mut self, rolls: &[u32]) -> Vec<String> {
            let thief = self.thief;
            let sword = self.world.object_id("sword").unwrap();
            self.step(rolls, |roster, ctx| roster.attack(ctx, thief, Some(sword)).unwrap())
        }

        fn state(&self) -> ActorState {
            self.roster.get(self.thief).unwrap().state()
        }
    }

    #[test]
    fn steals_a_treasure_and_slips_away() {
        let mut den = Den::new();
        let chalice = den.world.object_id("chalice").unwrap();
        // Steal roll, pick the chalice, then pick a room to flee to.
        let said = den.turn(&[0, 0, 0]);
        assert_eq!(den.world.object(chalice).unwrap().location, Location::Object(den.thief));
        assert_eq!(den.world.state.variable(Variable::ThiefLootCount), 1);
        assert!(said[0].contains("chalice"));
        assert!(said[1].contains("slips away"));
        let room = den.world.room_of(den.thief).unwrap();
        let room = den.world.room(room).unwrap();
        assert!(room.is(RoomFlags::UNDERGROUND));
        assert_ne!(room.key, "treasure-room");
    }

    #[test]
    fn robs_the_player_first() {
        let mut den = Den::new();
        let egg = den.world.object_id("egg").unwrap();
        den.world.move_object(egg, Location::Player).unwrap();
        den.turn(&[0, 0, 0]);
        assert!(!den.world.player.has_item(egg));
        assert!(den.world.is_within(egg, den.thief));
    }

    #[test]
    fn never_wanders_into_sacred_ground() {
        let mut den = Den::new();
        den.world.state.current_room = den.world.room_id("west-of-house").unwrap();
        for _ in 0..50 {
            den.turn(&[0, 7]);
            let room = den.world.room_of(den.thief).unwrap();
            let room = den.world.room(room).unwrap();
            assert!(room.is(RoomFlags::UNDERGROUND));
            assert!(!room.is(RoomFlags::SACRED));
        }
    }

    #[test]
    fn wounded_thief_flees_and_recovers() {
        let mut den = Den::new();
        // Hit for 3 of his 5 points, no stagger.
        den.attack(&[0, 2, 99]);
        assert_eq!(den.state(), ActorState::Fleeing);
        den.turn(&[0]);
        assert!(den.world.room_of(den.thief) != Some(den.world.state.current_room));
        assert_eq!(den.state(), ActorState::Normal);
    }

    #[test]
    fn fights_back_once_engaged() {
        let mut den = Den::new();
        // Hit for 1, no stagger: still strong, now fighting.
        den.attack(&[0, 0, 99]);
        assert_eq!(den.state(), ActorState::Fighting);
        let said = den.turn(&[99]);
        assert_eq!(said, vec!["The thief swings at you and misses.".to_string()]);
    }

    #[test]
    fn death_spills_the_loot() {
        let mut den = Den::new();
        let egg = den.world.object_id("egg").unwrap();
        den.world.move_object(egg, Location::Object(den.thief)).unwrap();
        let room = den.world.state.current_room;

        den.world.state.score = den.world.state.max_score;
        // Attack strength 6 against 5: damage 1 + 4 kills.
        den.attack(&[0, 4]);
        assert_eq!(den.state(), ActorState::Dead);
        assert_eq!(den.world.object(egg).unwrap().location, Location::Room(room));
        assert!(den.world.state.has_flag(GameFlag::ThiefDead));
        assert_eq!(den.world.object(den.thief).unwrap().location, Location::Nowhere);
    }

    #[test]
    fn gifts_go_in_the_bag() {
        let mut den = Den::new();
        let thief = den.thief;
        let garlic = den.world.object_id("garlic").unwrap();
        den.world.move_object(garlic, Location::Player).unwrap();
        let said = den.step(&[], |r, ctx| r.give(ctx, thief, garlic).unwrap());
        assert!(said[0].contains("thanks you politely"));
        assert!(den.world.is_within(garlic, thief));
        assert_eq!(den.world.state.variable(Variable::ThiefLootCount), 0);
    }
}
