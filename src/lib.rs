pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod lists;
pub mod parser;
pub mod report;

/// Route `log` output to stderr, quiet unless `RUST_LOG` asks for more
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::TaskwiseError;
pub use parser::{parse, ParseContext, ParsedTask, Priority, RecurrenceRule, Suggestion, TaskParser};
