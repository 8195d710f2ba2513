use delve_core::{ObjectId, World, WorldResult};
use tracing::debug;

/// Add points to the score.
pub fn award(world: &mut World, points: i32) {
    world.state.score += points;
    debug!(points, score = world.state.score, "score changed");
}

/// Award an object's take value the first time it is picked up.
/// Returns the points awarded.
pub fn claim(world: &mut World, id: ObjectId) -> WorldResult<i32> {
    let object = world.object_mut(id)?;
    if object.value_claimed || object.value <= 0 {
        return Ok(0);
    }
    object.value_claimed = true;
    let points = object.value;
    award(world, points);
    Ok(points)
}

/// Score an object placed in the trophy case. Returns the points awarded.
pub fn deposit(world: &mut World, id: ObjectId) -> WorldResult<i32> {
    let points = world.object(id)?.case_value;
    if points > 0 {
        award(world, points);
    }
    Ok(points.max(0))
}

/// Take back the points for an object removed from the trophy case.
pub fn withdraw(world: &mut World, id: ObjectId) -> WorldResult<i32> {
    let points = world.object(id)?.case_value;
    if points > 0 {
        award(world, -points);
    }
    Ok(points.max(0))
}

/// The rank earned by a score out of `max`.
pub fn rank(score: i32, max: i32) -> &'static str {
    if max <= 0 {
        return "Beginner";
    }
    let percent = i64::from(score.max(0)) * 100 / i64::from(max);
    match percent {
        p if p >= 100 => "Master Adventurer",
        p if p >= 90 => "Wizard",
        p if p >= 75 => "Master",
        p if p >= 55 => "Adventurer",
        p if p >= 40 => "Junior Adventurer",
        p if p >= 25 => "Novice Adventurer",
        p if p >= 10 => "Amateur Adventurer",
        _ => "Beginner",
    }
}

/// The full score line.
pub fn score_report(world: &World) -> String {
    let state = &world.state;
    let moves = if state.moves == 1 { "move" } else { "moves" };
    format!(
        "Your score is {} (total of {} points), in {} {moves}. This gives you the rank of {}.",
        state.score,
        state.max_score,
        state.moves,
        rank(state.score, state.max_score)
    )
}
