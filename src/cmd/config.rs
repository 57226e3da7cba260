use anyhow::Result;
use serde_json::json;

use coachvital::models::config::Config;

use super::print_json;

pub fn run_show(human: bool) -> Result<()> {
    let config = Config::load()?;
    if human {
        let toml_str = toml::to_string_pretty(&config)?;
        println!("{}", toml_str);
    } else {
        print_json("config", json!({ "config": config }))?;
    }
    Ok(())
}

pub fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    print_json("config", json!({ "key": key, "value": value }))
}
