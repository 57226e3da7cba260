use anyhow::Result;
use serde_json::json;

use coachvital::WorkoutInput;
use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(g: &Globals, name: &str, duration: Option<u32>, note: Option<&str>) -> Result<()> {
    let (engine, client) = open(g)?;
    let workout = engine.log_workout(
        &client,
        &WorkoutInput {
            name,
            date: None,
            duration_minutes: duration,
            notes: note,
        },
    )?;
    let streak = engine.get_streak(&client)?;

    if g.human {
        println!("Logged: {}", human::format_workout(&workout));
        println!("{}", human::format_streak(&streak));
    } else {
        print_json("workout", json!({ "workout": workout, "streak": streak }))?;
    }
    Ok(())
}
