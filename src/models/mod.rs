pub mod config;
pub mod insight;
pub mod metric;
pub mod nutrition;
pub mod workout;

pub use insight::{Insight, Severity};
pub use metric::{CurrentSnapshot, MetricEntry};
pub use nutrition::{NutritionDayLog, NutritionTargets};
pub use workout::WorkoutCompletion;
