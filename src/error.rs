/// Failures on the surfaces around the parser. Parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum TaskwiseError {
    #[error("Invalid reference time '{0}', expected YYYY-MM-DD HH:MM")]
    InvalidNow(String),
    #[error("Failed to determine config directory")]
    ConfigDir,
    #[error("Invalid config file: {0}")]
    ConfigParse(String),
    #[error("Unsupported date/time format pattern: {0}")]
    InvalidFormat(String),
}
