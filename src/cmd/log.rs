use anyhow::Result;
use serde_json::json;

use coachvital::models::metric::{Feeling, Metadata, MetricInput, TimeOfDay};
use coachvital::output::human;

use super::{Globals, open, print_json};

pub fn run(
    g: &Globals,
    value: f64,
    time: Option<&str>,
    feeling: Option<&str>,
    note: Option<&str>,
) -> Result<()> {
    let (engine, client) = open(g)?;
    let input = MetricInput {
        value,
        date: None,
        metadata: Metadata {
            time_of_day: time.map(str::parse::<TimeOfDay>).transpose()?.unwrap_or_default(),
            feeling: feeling.map(str::parse::<Feeling>).transpose()?,
            notes: note.map(String::from),
        },
    };
    let entry = engine.save_metric(&client, &input)?;

    if g.human {
        println!("Logged: {}", human::format_entry(&entry));
    } else {
        print_json("log", json!({ "entry": entry }))?;
    }
    Ok(())
}

pub fn run_batch(g: &Globals, batch_json: &str) -> Result<()> {
    let (engine, client) = open(g)?;
    let entries = engine.log_batch(&client, batch_json)?;

    if g.human {
        for e in &entries {
            println!("Logged: {}", human::format_entry(e));
        }
    } else {
        print_json("log", json!({ "entries": entries }))?;
    }
    Ok(())
}
