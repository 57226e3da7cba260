use anyhow::Result;
use serde_json::json;

use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(g: &Globals, days: Option<u32>) -> Result<()> {
    let (engine, client) = open(g)?;
    let days = days.unwrap_or(engine.config().history.default_window_days);
    let entries = engine.get_history(&client, days)?;

    if g.human {
        println!("{}", human::history_table(&entries));
    } else {
        print_json(
            "history",
            json!({ "client_id": client, "window_days": days, "entries": entries }),
        )?;
    }
    Ok(())
}
