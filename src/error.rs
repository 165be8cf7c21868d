use thiserror::Error;

#[derive(Error, Debug)]
pub enum GaapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("The '{0}' column is not found in the uploaded CSV file.")]
    MissingColumn(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("No transactions in period {year}-{month:02}")]
    UnknownPeriod { year: i32, month: u32 },

    #[error("No transactions in year {0}")]
    UnknownYear(i32),

    #[error("No transactions in month {0:02} of any year")]
    UnknownMonth(u32),

    #[error("Amount overflow while adding up {0}")]
    Overflow(String),

    #[error("Invalid amount on line {line}: {value}")]
    InvalidAmount { line: u64, value: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GaapError>;
