use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error reading config {}: {source}", path.display())]
    IO { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid invoice filter {pattern:?}: {source}")]
    Filter {
        pattern: String,
        source: regex::Error,
    },
}

fn default_customers_only() -> bool {
    true
}

/// Selection of the book and of the invoices to process.
///
/// ```yaml
/// book: books/2017.gnucash
/// invoice_filter: "^2017-"
/// customers_only: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub book: Option<PathBuf>,
    #[serde(default)]
    pub invoice_filter: Option<String>,
    #[serde(default = "default_customers_only")]
    pub customers_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            book: None,
            invoice_filter: None,
            customers_only: default_customers_only(),
        }
    }
}

impl Config {
    /// Reads a config file. A relative book path is taken relative to the
    /// directory of the config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::IO {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_reader(file)?;
        if let (Some(book), Some(dir)) = (&config.book, path.parent()) {
            if book.is_relative() {
                config.book = Some(dir.join(book));
            }
        }
        Ok(config)
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn filter(&self) -> Result<Option<Regex>, ConfigError> {
        self.invoice_filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::Filter {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()
    }
}
