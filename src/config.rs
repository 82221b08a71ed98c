//! Configuration handling for sheetdiff

use serde::Deserialize;

/// How much detail key discovery reports through the `log` facade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Per-candidate messages are logged at `debug`
    #[default]
    Quiet,
    /// Per-candidate messages are logged at `info`
    Verbose,
}

impl Verbosity {
    /// Log level used for detailed diagnostics
    pub fn level(self) -> log::Level {
        match self {
            Verbosity::Quiet => log::Level::Debug,
            Verbosity::Verbose => log::Level::Info,
        }
    }
}

impl std::str::FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "verbose" => Ok(Verbosity::Verbose),
            _ => Err(format!("Unknown verbosity: {}", s)),
        }
    }
}

/// Configuration for diff operations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attempt to match rows by key before falling back to whole-row compare
    pub smart_compare: bool,
    /// Column names to use as primary key; empty means discover one
    pub key_columns: Vec<String>,
    /// Diagnostic detail
    pub verbosity: Verbosity,
    /// Compare the sheets of a workbook on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smart_compare: true,
            key_columns: Vec::new(),
            verbosity: Verbosity::default(),
            parallel: true,
        }
    }
}

impl Config {
    /// Create a new Config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set key columns for row matching
    pub fn with_key_columns(mut self, keys: Vec<String>) -> Self {
        self.key_columns = keys;
        self
    }

    /// Enable or disable keyed compare
    pub fn with_smart_compare(mut self, enabled: bool) -> Self {
        self.smart_compare = enabled;
        self
    }

    /// Set diagnostic verbosity
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Enable or disable parallel sheet comparison
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
