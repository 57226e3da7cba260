use anyhow::Result;

use coachvital::db::Database;
use coachvital::models::config::Config;

pub fn run(default_client: Option<&str>) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(c) = default_client {
        config.set("default_client", c)?;
    }
    config.save()?;
    Database::open(&Config::db_path())?;
    println!("Config initialized at {:?}", Config::path());
    Ok(())
}
