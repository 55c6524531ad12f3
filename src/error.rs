use thiserror::Error;

/// Failures while reading a WindowMasker interval file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: header has no intron length in field {field}: {text:?}")]
    MissingLengthField {
        line: usize,
        field: usize,
        text: String,
    },

    #[error("line {line}: intron length {value:?} is not an integer")]
    InvalidLength { line: usize, value: String },

    #[error("line {line}: repeat range {text:?} is out of range")]
    InvalidRange { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Descriptive statistics that cannot be computed for the given values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("insufficient data: {0} requires at least one value")]
    InsufficientData(&'static str),

    #[error("domain error: {measure} is undefined for non-positive value {value}")]
    Domain { measure: &'static str, value: i64 },

    #[error("division undefined: {0}")]
    DivisionUndefined(&'static str),
}

/// Failures of the Ensembl retrieval stages.
#[derive(Debug, Error)]
pub enum EnsemblError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request for {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid listing pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("refusing to use {0:?} as a database name")]
    InvalidDatabaseName(String),

    #[error("refusing to use {0:?} as a file name")]
    InvalidFileName(String),

    #[error("`{command}` exited with {status}")]
    ToolFailed { command: String, status: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
