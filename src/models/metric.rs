use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::Evening => write!(f, "evening"),
            Self::Night => write!(f, "night"),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => anyhow::bail!(
                "invalid time of day: {} (expected morning/afternoon/evening/night)",
                s
            ),
        }
    }
}

/// How the client said they felt at check-in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Feeling {
    Great,
    Good,
    Okay,
    Tired,
    Bad,
}

impl std::fmt::Display for Feeling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Great => write!(f, "great"),
            Self::Good => write!(f, "good"),
            Self::Okay => write!(f, "okay"),
            Self::Tired => write!(f, "tired"),
            Self::Bad => write!(f, "bad"),
        }
    }
}

impl FromStr for Feeling {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "great" => Ok(Self::Great),
            "good" => Ok(Self::Good),
            "okay" | "ok" => Ok(Self::Okay),
            "tired" => Ok(Self::Tired),
            "bad" => Ok(Self::Bad),
            _ => anyhow::bail!("invalid feeling: {} (expected great/good/okay/tired/bad)", s),
        }
    }
}

/// One dated body-metric sample. At most one exists per (client, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricEntry {
    pub id: String,
    pub client_id: String,
    pub date: NaiveDate,
    pub value: f64,
    pub time_of_day: TimeOfDay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feeling: Option<Feeling>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MetricEntry {
    pub fn new(client_id: String, date: NaiveDate, value: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            date,
            value,
            time_of_day: TimeOfDay::default(),
            feeling: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn point(&self) -> (NaiveDate, f64) {
        (self.date, self.value)
    }
}

/// Check-in metadata accompanying a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub feeling: Option<Feeling>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for a single metric save. `date` defaults to today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricInput {
    pub value: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Denormalized latest value per client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentSnapshot {
    pub client_id: String,
    pub latest_value: f64,
    pub latest_date: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!("Evening".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::Night.to_string(), "night");
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_feeling_parse_accepts_ok_alias() {
        assert_eq!("ok".parse::<Feeling>().unwrap(), Feeling::Okay);
        assert_eq!("GREAT".parse::<Feeling>().unwrap(), Feeling::Great);
        assert!("meh".parse::<Feeling>().is_err());
    }

    #[test]
    fn test_metric_input_defaults_from_json() {
        let input: MetricInput = serde_json::from_str(r#"{"value": 80.5}"#).unwrap();
        assert_eq!(input.date, None);
        assert_eq!(input.metadata.time_of_day, TimeOfDay::Morning);
        assert_eq!(input.metadata.feeling, None);
    }
}
