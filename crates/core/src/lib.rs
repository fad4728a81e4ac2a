#![forbid(unsafe_code)]

pub mod config;
pub mod countdown;
pub mod error;
pub mod model;
pub mod time;

pub use config::{BrowseConfig, QuizConfig, ShuffleMode};
pub use countdown::{Countdown, Tick, format_clock};
pub use error::ConfigError;
pub use time::Clock;
