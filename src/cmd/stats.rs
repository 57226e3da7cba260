use anyhow::Result;

use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(g: &Globals) -> Result<()> {
    let (engine, client) = open(g)?;
    let stats = engine.get_stats(&client)?;

    if g.human {
        println!("{}", human::format_stats(&stats));
    } else {
        print_json("stats", serde_json::to_value(&stats)?)?;
    }
    Ok(())
}
