//! Application configuration
//!
//! Process-level settings that sit above the analyzer configuration.

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Verbosity level from repeated `-v`
    pub verbose: u8,
    /// Level used when no `-v` is given
    pub base_log_level: String,
}

impl AppConfig {
    /// Create a new application configuration
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Use the configured log level as the quiet default
    pub fn with_base_log_level(mut self, level: impl Into<String>) -> Self {
        self.base_log_level = level.into();
        self
    }

    /// Get the log filter based on verbosity
    pub fn log_level(&self) -> &str {
        match self.verbose {
            0 => &self.base_log_level,
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            base_log_level: "info".to_string(),
        }
    }
}
