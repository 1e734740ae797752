// src/watchlist.rs
use crate::domain::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Ordered ticker symbols to scan, fixed for the whole run
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Load one symbol per line. Blank lines and `#` comments are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to read watchlist {}: {}",
                path.display(),
                e
            ))
        })?;

        let watchlist = Self::parse(&contents);
        if watchlist.is_empty() {
            return Err(AppError::Config(format!(
                "Watchlist {} contains no symbols",
                path.display()
            )));
        }

        Ok(watchlist)
    }

    pub fn parse(contents: &str) -> Self {
        let symbols = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_uppercase)
            .collect();

        Self { symbols }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<Vec<String>> for Watchlist {
    fn from(symbols: Vec<String>) -> Self {
        Self { symbols }
    }
}
