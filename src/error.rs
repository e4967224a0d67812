use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Search request failed with status {0}")]
    HttpStatus(StatusCode),

    #[error("Could not parse search results: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SMTP authentication failed: {0}")]
    Auth(String),

    #[error("SMTP delivery failed: {0}")]
    Delivery(String),
}

impl From<config::ConfigError> for ScoutError {
    fn from(value: config::ConfigError) -> Self {
        ScoutError::Config(value.to_string())
    }
}

impl From<reqwest::Error> for ScoutError {
    fn from(value: reqwest::Error) -> Self {
        match value.status() {
            Some(status) => ScoutError::HttpStatus(status),
            None => ScoutError::Transport(value.to_string()),
        }
    }
}
