//! # Duolog
//!
//! A small dual-sink logging library: timestamped text goes to a file and,
//! unless muted, to the console.
//!
//! ## Features
//!
//! - One file per [`LogHandle`], opened in append mode
//! - Per-handle size ceiling: once exceeded, the next write empties the file
//! - Console mirroring controlled per handle or forced per write
//! - Fallback to a generated file when the requested path is unusable
//! - A [`SystemLog`] recording the lifecycle of every handle
//!
//! ## Example
//!
//! ```rust,no_run
//! use duolog::{LogConfig, LogSystem};
//!
//! let system = LogSystem::new(LogConfig::new());
//! system.syslog().init()?;
//!
//! let mut log = system.open(Some("worker"), "./logs/worker.out", false)?;
//! log.add(&format!("processed {} items\n", 42))?;
//! log.add_mute("file only\n")?;
//!
//! system.syslog().stop();
//! # Ok::<(), duolog::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod console;
pub mod error;
pub mod handle;
pub mod policy;
pub mod sink;
pub mod syslog;
pub mod system;
pub mod timestamp;

#[cfg(feature = "diagnostics")]
pub mod diagnostics;

pub use builder::LogSystemBuilder;
pub use config::{LogConfig, SystemLogConfig};
pub use console::{CaptureBuffer, Console, show, show_text, show_time};
pub use error::{Error, Result};
pub use handle::{CreateOutcome, LogHandle, MAX_SIZE_LIMIT_MB};
pub use policy::{ConsolePolicy, Shape, WriteOptions};
pub use syslog::SystemLog;
pub use system::LogSystem;
pub use timestamp::MonthStyle;

#[cfg(feature = "diagnostics")]
pub use diagnostics::init_diagnostics;

/// Start configuring a [`LogSystem`].
pub fn builder() -> LogSystemBuilder {
    LogSystemBuilder::new()
}
