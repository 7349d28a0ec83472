//! Builder pattern for assembling a [`LogSystem`].
//!
//! # Example
//!
//! ```rust,no_run
//! let system = duolog::builder()
//!     .with_log_dir("./logs/")
//!     .with_size_limit(10)
//!     .with_system_log("./logs/sys.out")
//!     .build()?;
//!
//! system.syslog().init()?;
//! let mut log = system.open(Some("app"), "./logs/app.out", false)?;
//! log.add("started\n")?;
//! # Ok::<(), duolog::Error>(())
//! ```

use std::path::PathBuf;

use crate::console::Console;
use crate::timestamp::MonthStyle;
use crate::{LogConfig, LogSystem, Result, SystemLogConfig};

/// A builder for configuring a [`LogSystem`].
#[derive(Debug, Clone, Default)]
pub struct LogSystemBuilder {
    config: LogConfig,
    console: Option<Console>,
}

impl LogSystemBuilder {
    /// Create a new LogSystemBuilder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a LogSystemBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self {
            config,
            console: None,
        }
    }

    /// Directory for fallback files.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_log_dir(dir);
        self
    }

    /// Default ceiling for new logs, in megabytes.
    pub fn with_size_limit(mut self, megabytes: u64) -> Self {
        self.config = self.config.with_size_limit(megabytes);
        self
    }

    pub fn with_month_style(mut self, style: MonthStyle) -> Self {
        self.config = self.config.with_month_style(style);
        self
    }

    /// Filter level for the library's own diagnostics.
    pub fn with_diagnostics(mut self, level: impl Into<String>) -> Self {
        self.config = self.config.with_diagnostics(level);
        self
    }

    /// Path of the system log file.
    pub fn with_system_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.system.path = path.into();
        self
    }

    /// Whether the system log mirrors its records to the console.
    pub fn with_system_mute(mut self, mute: bool) -> Self {
        self.config.system.mute = mute;
        self
    }

    /// System log ceiling, in megabytes.
    pub fn with_system_size_limit(mut self, megabytes: u64) -> Self {
        self.config.system.size_limit = megabytes;
        self
    }

    /// Replace the whole system log configuration.
    pub fn with_system_config(mut self, system: SystemLogConfig) -> Self {
        self.config = self.config.with_system(system);
        self
    }

    /// Console used for mirrored output. Defaults to standard error.
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Get the current configuration without building.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Validate the configuration and build the system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if a path is empty or
    /// a ceiling exceeds [`MAX_SIZE_LIMIT_MB`](crate::MAX_SIZE_LIMIT_MB).
    pub fn build(self) -> Result<LogSystem> {
        self.config.validate()?;
        let console = self.console.unwrap_or_default();
        Ok(LogSystem::with_console(self.config, console))
    }
}
