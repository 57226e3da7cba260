use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "coachvital",
    version,
    about = "Client progress analytics for coaches"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override today's date (YYYY-MM-DD); entries default to this date
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Client id (default: `default_client` from config)
    #[arg(long, short = 'c', global = true)]
    pub client: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init {
        /// Client to use when --client is omitted
        #[arg(long)]
        default_client: Option<String>,
    },

    /// Log a body-weight check-in (one per day; re-logging updates it)
    Log {
        /// Metric value
        #[arg(required_unless_present = "batch")]
        value: Option<f64>,

        /// Time of day (morning/afternoon/evening/night)
        #[arg(long)]
        time: Option<String>,

        /// How the client felt (great/good/okay/tired/bad)
        #[arg(long)]
        feeling: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Batch JSON array of entries
        #[arg(long, conflicts_with = "value")]
        batch: Option<String>,
    },

    /// Show metric history, newest first
    History {
        /// Days to look back
        #[arg(long)]
        days: Option<u32>,
    },

    /// Current value, week/month change, trend and projection
    Stats,

    /// Record a completed workout
    Workout {
        /// Workout name
        name: String,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// Current and longest workout streak
    Streak,

    /// Nutrition logs, targets and summary
    Nutrition {
        #[command(subcommand)]
        action: NutritionAction,
    },

    /// Advisory messages from nutrition and streak data
    Insights,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum NutritionAction {
    /// Log the day's totals (one per day; re-logging updates it)
    Log {
        /// Calories (kcal)
        calories: f64,
        /// Protein (g)
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        /// Carbohydrates (g)
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        /// Fat (g)
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
        /// Plan compliance score (0-100)
        #[arg(long, default_value_t = 100)]
        compliance: u8,
        /// Comma-separated meals completed
        #[arg(long)]
        meals: Option<String>,
    },
    /// Set daily targets
    Target {
        /// Calories (kcal)
        calories: f64,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
    },
    /// Averages, adherence and target hit rate
    Summary {
        /// Days in the period
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. trend.stable_threshold, nutrition.target_band_pct)
        key: String,
        /// Config value
        value: String,
    },
}
