//! Error type shared by the table, configuration and engine crates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid reference table ({context}): {reason}")]
    InvalidTable { context: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_table(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
