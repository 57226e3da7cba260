pub mod core;
pub mod db;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod output;

pub use engine::{Engine, WorkoutInput};
pub use error::{Error, Result};
pub use events::{Event, EventHub, Subscription, Topic};
