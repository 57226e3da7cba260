mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction, NutritionAction};
use coachvital::models::nutrition::MacroTotals;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("COACHVITAL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("coachvital=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let g = cmd::Globals {
        client: cli.client,
        date: cli.date,
        human: cli.human,
    };

    let result = match cli.command {
        Commands::Init { default_client } => cmd::init::run(default_client.as_deref()),
        Commands::Log {
            value,
            time,
            feeling,
            note,
            batch,
        } => match (batch, value) {
            (Some(batch_json), _) => cmd::log::run_batch(&g, &batch_json),
            (None, Some(v)) => cmd::log::run(
                &g,
                v,
                time.as_deref(),
                feeling.as_deref(),
                note.as_deref(),
            ),
            (None, None) => Err(anyhow::anyhow!("a value or --batch is required")),
        },
        Commands::History { days } => cmd::history::run(&g, days),
        Commands::Stats => cmd::stats::run(&g),
        Commands::Workout {
            name,
            duration,
            note,
        } => cmd::workout::run(&g, &name, duration, note.as_deref()),
        Commands::Streak => cmd::streak::run(&g),
        Commands::Nutrition { action } => match action {
            NutritionAction::Log {
                calories,
                protein,
                carbs,
                fat,
                compliance,
                meals,
            } => cmd::nutrition::run_log(
                &g,
                MacroTotals {
                    calories,
                    protein,
                    carbs,
                    fat,
                },
                compliance,
                meals.as_deref(),
            ),
            NutritionAction::Target {
                calories,
                protein,
                carbs,
                fat,
            } => cmd::nutrition::run_target(&g, calories, protein, carbs, fat),
            NutritionAction::Summary { days } => cmd::nutrition::run_summary(&g, days),
        },
        Commands::Insights => cmd::insights::run(&g),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(g.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "coachvital", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        let code = e
            .downcast_ref::<coachvital::Error>()
            .map_or("general_error", coachvital::Error::code);
        let err = coachvital::output::error("", code, &e.to_string());
        match serde_json::to_string(&err) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{}", e),
        }
        process::exit(1);
    }
}
