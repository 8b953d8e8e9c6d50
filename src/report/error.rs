use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("tax table {name} has {entries} entries, expected exactly one")]
    AmbiguousTaxtable { name: String, entries: usize },

    #[error("entry {entry} has no {field}")]
    MissingAmount { entry: String, field: &'static str },

    #[error("taxable entry {0} has no tax table")]
    MissingTaxtable(String),

    #[error("account {0} not found")]
    UnknownAccount(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    IO(#[from] io::Error),
}
