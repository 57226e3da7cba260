use anyhow::Result;
use serde_json::json;

use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(g: &Globals) -> Result<()> {
    let (engine, client) = open(g)?;
    let insights = engine.get_insights(&client)?;

    if g.human {
        println!("{}", human::format_insights(&insights));
    } else {
        print_json("insights", json!({ "insights": insights }))?;
    }
    Ok(())
}
