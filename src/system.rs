use std::path::Path;

use crate::console::Console;
use crate::handle::{CreateOutcome, LogHandle};
use crate::syslog::SystemLog;
use crate::{LogConfig, Result};

/// Entry point of the library: owns the configuration, the console and the
/// system log, and creates [`LogHandle`]s that share them.
///
/// Independent instances do not see each other's handles or system log.
#[derive(Debug, Clone)]
pub struct LogSystem {
    config: LogConfig,
    console: Console,
    syslog: SystemLog,
}

impl LogSystem {
    /// Create a system writing its console output to standard error.
    pub fn new(config: LogConfig) -> Self {
        Self::with_console(config, Console::stderr())
    }

    /// Create a system with a specific console.
    pub fn with_console(config: LogConfig, console: Console) -> Self {
        let console = console.with_month_style(config.month_style);
        let syslog = SystemLog::new(config.system.clone(), console.clone());
        Self {
            config,
            console,
            syslog,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// The system log shared by every handle of this system.
    pub fn syslog(&self) -> &SystemLog {
        &self.syslog
    }

    /// Open a log at `path`.
    ///
    /// Missing directories are created. When `path` cannot be written the
    /// handle is bound to a generated file under the configured log
    /// directory instead, reported as [`CreateOutcome::Fallback`].
    pub fn create(
        &self,
        name: Option<&str>,
        path: impl AsRef<Path>,
        mute: bool,
    ) -> Result<CreateOutcome> {
        LogHandle::create(
            &self.config,
            &self.console,
            &self.syslog,
            name,
            path.as_ref(),
            mute,
        )
    }

    /// Like [`LogSystem::create`], discarding where the handle ended up.
    pub fn open(&self, name: Option<&str>, path: impl AsRef<Path>, mute: bool) -> Result<LogHandle> {
        self.create(name, path, mute).map(CreateOutcome::into_handle)
    }
}

impl Default for LogSystem {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemLogConfig;
    use crate::timestamp::MonthStyle;

    #[test]
    fn test_independent_systems() {
        let dir = tempfile::tempdir().unwrap();
        let a = LogSystem::with_console(
            LogConfig::new().with_system(SystemLogConfig::new(dir.path().join("a.sys"))),
            Console::capture().0,
        );
        let b = LogSystem::with_console(
            LogConfig::new().with_system(SystemLogConfig::new(dir.path().join("b.sys"))),
            Console::capture().0,
        );

        a.syslog().init().unwrap();
        assert!(a.syslog().is_active());
        assert!(!b.syslog().is_active());

        let handle = b.open(Some("b"), dir.path().join("b.out"), true).unwrap();
        drop(handle);
        let a_content = std::fs::read_to_string(dir.path().join("a.sys")).unwrap();
        assert!(!a_content.contains("[b]"));
    }

    #[test]
    fn test_console_follows_month_style() {
        let system = LogSystem::with_console(
            LogConfig::new().with_month_style(MonthStyle::ZeroBased),
            Console::capture().0,
        );
        assert_eq!(system.console().month_style(), MonthStyle::ZeroBased);
    }

    #[test]
    fn test_handle_inherits_default_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let system = LogSystem::with_console(
            LogConfig::new().with_size_limit(3),
            Console::capture().0,
        );
        let handle = system.open(None, dir.path().join("x.out"), true).unwrap();
        assert_eq!(handle.size_limit(), 3 << 20);
    }
}
