use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    #[error("No adjacent note to link to")]
    NoNeighbor,

    #[error("No connection rules defined for note type: {0}")]
    NoRuleSet(String),

    #[error("Neighbor note type '{found}' does not match '{expected}'")]
    TypeMismatch { expected: String, found: String },

    #[error("LinkError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LinkError {
    fn from(error: std::io::Error) -> Self {
        LinkError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LinkError {
    fn from(error: reqwest::Error) -> Self {
        LinkError::Reqwest(Box::new(error))
    }
}
