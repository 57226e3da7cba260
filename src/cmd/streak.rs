use anyhow::Result;

use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(g: &Globals) -> Result<()> {
    let (engine, client) = open(g)?;
    let streak = engine.get_streak(&client)?;

    if g.human {
        println!("{}", human::format_streak(&streak));
    } else {
        print_json("streak", serde_json::to_value(streak)?)?;
    }
    Ok(())
}
