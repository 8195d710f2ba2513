use delve_core::{ObjectFlags, ObjectId, Variable, World};
use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Chance in percent that a blow which leaves the defender standing only
/// staggers them instead of drawing blood.
const STAGGER_CHANCE: u32 = 15;

/// The result of a single blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlowOutcome {
    /// The blow did not connect.
    Missed,
    /// The defender lost this much strength.
    Wounded(u32),
    /// The defender was knocked off balance but not hurt.
    Staggered,
    /// The defender was knocked out, with one point of strength left.
    Unconscious,
    /// The defender died.
    Killed,
}

impl BlowOutcome {
    /// The defender's strength after this blow.
    pub fn apply(self, strength: u32) -> u32 {
        match self {
            Self::Missed | Self::Staggered => strength,
            Self::Wounded(n) => strength.saturating_sub(n).max(1),
            Self::Unconscious => strength.min(1),
            Self::Killed => 0,
        }
    }

    /// Whether the blow connected at all.
    pub fn landed(self) -> bool {
        self != Self::Missed
    }
}

/// Percent chance that a blow lands, from the strength difference.
pub fn hit_chance(attacker: u32, defender: u32) -> u32 {
    let edge = i64::from(attacker) - i64::from(defender);
    (50 + 10 * edge).clamp(10, 90) as u32
}

/// Resolve one blow between two fighters.
///
/// Draws once to see whether the blow lands, once for damage, and once more
/// for a stagger when the defender survives with strength to spare.
pub fn resolve_blow(attacker: u32, defender: u32, rng: &mut dyn RandomSource) -> BlowOutcome {
    if !rng.chance(hit_chance(attacker, defender)) {
        return BlowOutcome::Missed;
    }
    let damage = 1 + rng.below(attacker.max(1));
    match defender.saturating_sub(damage) {
        0 => BlowOutcome::Killed,
        1 => BlowOutcome::Unconscious,
        _ if rng.chance(STAGGER_CHANCE) => BlowOutcome::Staggered,
        _ => BlowOutcome::Wounded(damage),
    }
}

/// The player's fighting strength: grows with the score, shrinks with wounds.
pub fn player_strength(world: &World) -> u32 {
    let score = i64::from(world.state.score.max(0));
    let max = i64::from(world.state.max_score.max(1));
    let wounds = world.state.variable(Variable::Wounds);
    let strength = 2 + score * 3 / max - wounds;
    u32::try_from(strength.max(1)).unwrap_or(1)
}

/// Strength of the player's attack with `weapon`. Bare hands cost a point.
pub fn attack_strength(world: &World, weapon: Option<ObjectId>) -> u32 {
    let base = player_strength(world);
    let armed = weapon
        .and_then(|w| world.object(w).ok())
        .is_some_and(|w| w.is(ObjectFlags::WEAPON));
    if armed { base + 1 } else { base.saturating_sub(1).max(1) }
}

/// What the player sees when striking `target`.
pub fn player_blow_message(target: &str, outcome: BlowOutcome) -> String {
    match outcome {
        BlowOutcome::Missed => format!("Your swing misses the {target}."),
        BlowOutcome::Wounded(_) => format!("You wound the {target}."),
        BlowOutcome::Staggered => format!("The {target} staggers back from your blow."),
        BlowOutcome::Unconscious => format!("The {target} is knocked senseless!"),
        BlowOutcome::Killed => format!("The {target} takes a fatal blow."),
    }
}

/// What the player sees when `attacker` strikes them.
pub fn blow_against_player_message(attacker: &str, outcome: BlowOutcome) -> String {
    match outcome {
        BlowOutcome::Missed => format!("The {attacker} swings at you and misses."),
        BlowOutcome::Wounded(_) => format!("The {attacker} hits you, drawing blood."),
        BlowOutcome::Staggered => format!("The {attacker} knocks you off balance."),
        BlowOutcome::Unconscious => {
            format!("The {attacker} knocks you senseless, but you stagger back to your feet.")
        }
        BlowOutcome::Killed => format!("The {attacker} lands a mortal blow."),
    }
}

/// Apply a blow against the player, adding wounds. Returns `true` if it was fatal.
pub fn wound_player(world: &mut World, outcome: BlowOutcome) -> bool {
    if outcome == BlowOutcome::Killed {
        return true;
    }
    let before = player_strength(world);
    let after = outcome.apply(before);
    if after < before {
        world
            .state
            .adjust_variable(Variable::Wounds, i64::from(before - after));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRng};
    use delve_core::demo::demo_world;
    use proptest::prelude::*;

    #[test]
    fn hit_chance_is_clamped() {
        assert_eq!(hit_chance(3, 3), 50);
        assert_eq!(hit_chance(10, 1), 90);
        assert_eq!(hit_chance(1, 10), 10);
        assert_eq!(hit_chance(2, 3), 40);
    }

    #[test]
    fn scripted_outcomes() {
        // 99 fails any hit roll.
        assert_eq!(resolve_blow(3, 3, &mut ScriptedRng::new([99])), BlowOutcome::Missed);
        // Hit, damage 1 + 2 = 3 against 3: dead.
        assert_eq!(resolve_blow(3, 3, &mut ScriptedRng::new([0, 2])), BlowOutcome::Killed);
        // Hit, damage 2 against 3: one point left.
        assert_eq!(resolve_blow(3, 3, &mut ScriptedRng::new([0, 1])), BlowOutcome::Unconscious);
        // Hit, damage 1 against 5, no stagger.
        assert_eq!(
            resolve_blow(3, 5, &mut ScriptedRng::new([0, 0, 99])),
            BlowOutcome::Wounded(1)
        );
        assert_eq!(resolve_blow(3, 5, &mut ScriptedRng::new([0, 0, 0])), BlowOutcome::Staggered);
    }

    #[test]
    fn outcomes_apply_to_strength() {
        assert_eq!(BlowOutcome::Missed.apply(4), 4);
        assert_eq!(BlowOutcome::Wounded(2).apply(4), 2);
        assert_eq!(BlowOutcome::Unconscious.apply(4), 1);
        assert_eq!(BlowOutcome::Killed.apply(4), 0);
    }

    #[test]
    fn player_strength_tracks_score_and_wounds() {
        let mut world = demo_world().unwrap();
        assert_eq!(player_strength(&world), 2);
        world.state.score = world.state.max_score;
        assert_eq!(player_strength(&world), 5);
        world.state.set_variable(Variable::Wounds, 10);
        assert_eq!(player_strength(&world), 1);
    }

    #[test]
    fn weapons_add_to_attack_strength() {
        let world = demo_world().unwrap();
        let sword = world.object_id("sword").unwrap();
        let lamp = world.object_id("lamp").unwrap();
        assert_eq!(attack_strength(&world, Some(sword)), 3);
        assert_eq!(attack_strength(&world, Some(lamp)), 1);
        assert_eq!(attack_strength(&world, None), 1);
    }

    #[test]
    fn wounding_the_player_adds_wounds() {
        let mut world = demo_world().unwrap();
        world.state.score = world.state.max_score;
        assert!(!wound_player(&mut world, BlowOutcome::Wounded(2)));
        assert_eq!(world.state.variable(Variable::Wounds), 2);
        assert!(wound_player(&mut world, BlowOutcome::Killed));
    }

    proptest! {
        #[test]
        fn blows_never_raise_strength(att in 1u32..10, def in 1u32..10, seed in any::<u64>()) {
            let mut rng = GameRng::seeded(seed);
            let outcome = resolve_blow(att, def, &mut rng);
            prop_assert!(outcome.apply(def) <= def);
            if let BlowOutcome::Wounded(n) = outcome {
                prop_assert!(n < def - 1);
            }
        }
    }
}
