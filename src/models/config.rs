use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::logging::MAX_WINDOW_DAYS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Client used when `--client` is not given.
    #[serde(default)]
    pub default_client: Option<String>,
    #[serde(default)]
    pub validation: Validation,
    #[serde(default)]
    pub history: History,
    #[serde(default)]
    pub trend: TrendSettings,
    #[serde(default)]
    pub projection: ProjectionSettings,
    #[serde(default)]
    pub streak: StreakSettings,
    #[serde(default)]
    pub nutrition: NutritionSettings,
    #[serde(default)]
    pub insights: InsightSettings,
}

/// Physically plausible range for a body-metric value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Validation {
    pub min_value: f64,
    pub max_value: f64,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            min_value: 20.0,
            max_value: 500.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct History {
    /// Window used by `history` and `stats` when none is given.
    pub default_window_days: u32,
}

impl Default for History {
    fn default() -> Self {
        Self {
            default_window_days: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSettings {
    pub window_size: usize,
    pub stable_threshold: f64,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            window_size: 7,
            stable_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub horizon_days: u32,
    pub min_entries: usize,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            min_entries: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakSettings {
    /// Days scanned for the current streak.
    pub window_days: u32,
    /// Days scanned for the longest streak.
    pub longest_lookback_days: u32,
    #[serde(default = "default_milestones")]
    pub milestones: Vec<u32>,
}

fn default_milestones() -> Vec<u32> {
    vec![3, 7, 14, 30, 60, 100]
}

impl Default for StreakSettings {
    fn default() -> Self {
        Self {
            window_days: 30,
            longest_lookback_days: 365,
            milestones: default_milestones(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionSettings {
    /// Acceptable deviation from the calorie target, in percent.
    pub target_band_pct: f64,
    pub calorie_trend_threshold: f64,
    /// Window used by `nutrition summary` and insights when none is given.
    pub default_window_days: u32,
}

impl Default for NutritionSettings {
    fn default() -> Self {
        Self {
            target_band_pct: 10.0,
            calorie_trend_threshold: 50.0,
            default_window_days: 14,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightSettings {
    /// Maximum insights returned; 0 returns all.
    pub max_displayed: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self { max_displayed: 5 }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Set a dotted config key (e.g. `trend.stable_threshold`) from a string.
    /// The change is applied only if the resulting config is valid.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut next = self.clone();
        next.apply(key, value)?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_client" => self.default_client = Some(value.to_string()),
            "validation.min_value" => self.validation.min_value = value.parse()?,
            "validation.max_value" => self.validation.max_value = value.parse()?,
            "history.default_window_days" => self.history.default_window_days = value.parse()?,
            "trend.window_size" => self.trend.window_size = value.parse()?,
            "trend.stable_threshold" => self.trend.stable_threshold = value.parse()?,
            "projection.horizon_days" => self.projection.horizon_days = value.parse()?,
            "projection.min_entries" => self.projection.min_entries = value.parse()?,
            "streak.window_days" => self.streak.window_days = value.parse()?,
            "streak.longest_lookback_days" => self.streak.longest_lookback_days = value.parse()?,
            "streak.milestones" => {
                self.streak.milestones = value
                    .split(',')
                    .map(|s| s.trim().parse())
                    .collect::<Result<_, _>>()?;
            }
            "nutrition.target_band_pct" => self.nutrition.target_band_pct = value.parse()?,
            "nutrition.calorie_trend_threshold" => {
                self.nutrition.calorie_trend_threshold = value.parse()?
            }
            "nutrition.default_window_days" => {
                self.nutrition.default_window_days = value.parse()?
            }
            "insights.max_displayed" => self.insights.max_displayed = value.parse()?,
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    /// Cross-field checks. Day windows must pass the engine's window validation.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.validation.min_value >= self.validation.max_value {
            anyhow::bail!("validation.min_value must be below validation.max_value");
        }
        if self.trend.window_size == 0 {
            anyhow::bail!("trend.window_size must be at least 1");
        }
        for (key, days) in [
            ("history.default_window_days", self.history.default_window_days),
            ("streak.window_days", self.streak.window_days),
            ("streak.longest_lookback_days", self.streak.longest_lookback_days),
            ("nutrition.default_window_days", self.nutrition.default_window_days),
        ] {
            if days == 0 || days > MAX_WINDOW_DAYS {
                anyhow::bail!("{} must be 1-{}, got {}", key, MAX_WINDOW_DAYS, days);
            }
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("COACHVITAL_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coachvital")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}
