pub mod config;
pub mod history;
pub mod init;
pub mod insights;
pub mod log;
pub mod nutrition;
pub mod stats;
pub mod streak;
pub mod workout;

use anyhow::Result;
use chrono::NaiveDate;

use coachvital::Engine;
use coachvital::db::Database;
use coachvital::models::config::Config;

/// Flags shared by every subcommand.
pub struct Globals {
    pub client: Option<String>,
    pub date: Option<NaiveDate>,
    pub human: bool,
}

/// Load config, open the store and resolve the target client.
pub fn open(globals: &Globals) -> Result<(Engine, String)> {
    let config = Config::load()?;
    let client = match (&globals.client, &config.default_client) {
        (Some(c), _) => c.clone(),
        (None, Some(c)) => c.clone(),
        (None, None) => anyhow::bail!(
            "no client selected: pass --client or run `coachvital config set default_client <id>`"
        ),
    };
    let db = Database::open(&Config::db_path())?;
    let mut engine = Engine::new(db, config);
    if let Some(d) = globals.date {
        engine = engine.as_of(d);
    }
    Ok((engine, client))
}

pub fn print_json(command: &str, data: serde_json::Value) -> Result<()> {
    let out = coachvital::output::success(command, data);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
