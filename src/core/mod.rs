pub mod insights;
pub mod logging;
pub mod nutrition;
pub mod projection;
pub mod stats;
pub mod streak;
pub mod trend;
