use clap::Parser;
use std::path::PathBuf;

/// Taskwise - pull dates, times, priorities, lists and recurrence out of task titles
#[derive(Debug, Parser)]
#[command(name = "taskwise")]
#[command(about = "Pull dates, times, priorities, lists and recurrence out of task titles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Task title, e.g. "Call mom tomorrow 3-4pm !urgent #family" (if not specified, enters interactive mode)
    pub input: Vec<String>,

    /// Reference time instead of the system clock (YYYY-MM-DD HH:MM)
    #[arg(long)]
    pub now: Option<String>,

    /// Use this config file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Comma-separated list names to resolve #hints against
    #[arg(long, value_delimiter = ',')]
    pub lists: Vec<String>,
}

impl Cli {
    /// Input words joined back into one title, or `None` for interactive mode
    pub fn title(&self) -> Option<String> {
        let title = self.input.join(" ");
        if title.trim().is_empty() {
            None
        } else {
            Some(title)
        }
    }
}
