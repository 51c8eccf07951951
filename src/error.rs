use thiserror::Error;

#[derive(Error, Debug)]
pub enum BidError {
    #[error("Malformed input at row {row}, column '{column}': {message}")]
    MalformedInput {
        row: usize,
        column: String,
        message: String,
    },

    #[error("Malformed input: missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid field '{field}' on line {line_number}: {message}")]
    InvalidField {
        line_number: i64,
        field: String,
        message: String,
    },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Rates error: {0}")]
    Rates(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

impl BidError {
    pub fn malformed(row: usize, column: &str, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid(line_number: i64, field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            line_number,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BidError>;
