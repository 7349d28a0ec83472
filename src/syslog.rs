//! The system log: a bookkeeping stream that records what happens to every
//! [`LogHandle`](crate::LogHandle) created through the same
//! [`LogSystem`](crate::LogSystem).
//!
//! It starts inactive. While inactive every record call is a no-op, and the
//! setters only change the defaults used by the next [`SystemLog::init`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::SystemLogConfig;
use crate::console::Console;
use crate::handle::megabytes_to_bytes;
use crate::policy::ConsolePolicy;
use crate::sink::{self, FileSink};
use crate::timestamp::{self, MonthStyle};
use crate::{Error, Result};

struct State {
    config: SystemLogConfig,
    month_style: MonthStyle,
    console: Console,
    active: Option<FileSink>,
}

/// Shared handle to a system log. Clones refer to the same stream.
#[derive(Clone)]
pub struct SystemLog {
    state: Arc<Mutex<State>>,
}

impl SystemLog {
    /// Create an inactive system log.
    ///
    /// Record stamps use the month style of `console`; set it with
    /// [`Console::with_month_style`] before passing the console in.
    pub fn new(config: SystemLogConfig, console: Console) -> Self {
        let month_style = console.month_style();
        Self {
            state: Arc::new(Mutex::new(State {
                config,
                month_style,
                console,
                active: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the system log file. Calling it again while active does nothing.
    pub fn init(&self) -> Result<()> {
        {
            let mut state = self.lock();
            if state.active.is_some() {
                return Ok(());
            }

            let path = state.config.path.clone();
            if let Err(e) = sink::create_parent_dirs(&path) {
                tracing::warn!(path = %path.display(), error = %e, "cannot create system log directory");
            }
            let limit = megabytes_to_bytes(state.config.size_limit);
            match FileSink::open(&path, limit) {
                Ok(file) => state.active = Some(file),
                Err(source) => {
                    state.console.show("log system init err!\n");
                    tracing::error!(path = %path.display(), error = %source, "system log init failed");
                    return Err(Error::SystemLogInit { path, source });
                }
            }
        }

        self.add(None, "--------------- log system init ok! ------------------\n");
        Ok(())
    }

    /// Record the shutdown and close the file. No-op when inactive.
    pub fn stop(&self) {
        if !self.is_active() {
            return;
        }
        self.add(None, "log system stopped!\n");
        self.lock().active = None;
    }

    pub fn is_active(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Path of the system log file (the configured one while inactive).
    pub fn path(&self) -> PathBuf {
        let state = self.lock();
        match &state.active {
            Some(file) => file.path().to_path_buf(),
            None => state.config.path.clone(),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.lock().config.mute
    }

    /// Current ceiling in bytes.
    pub fn size_limit(&self) -> u64 {
        let state = self.lock();
        match &state.active {
            Some(file) => file.size_limit(),
            None => megabytes_to_bytes(state.config.size_limit),
        }
    }

    /// Change whether records are mirrored to the console.
    pub fn set_mute(&self, mute: bool) {
        self.lock().config.mute = mute;
    }

    /// Change the ceiling, in megabytes. Returns the new ceiling in bytes.
    pub fn set_size_limit(&self, megabytes: u64) -> Result<u64> {
        let bytes = crate::handle::checked_megabytes(megabytes)?;
        let mut state = self.lock();
        state.config.size_limit = megabytes;
        if let Some(file) = state.active.as_mut() {
            file.set_size_limit(bytes);
        }
        Ok(bytes)
    }

    /// Record `text`, mirrored to the console unless muted.
    pub fn add(&self, name: Option<&str>, text: &str) {
        self.record(name, text, ConsolePolicy::PerHandle);
    }

    /// Record `text` to the file only.
    pub fn add_mute(&self, name: Option<&str>, text: &str) {
        self.record(name, text, ConsolePolicy::Never);
    }

    /// Record `text` to the file and the console.
    pub fn add_nomute(&self, name: Option<&str>, text: &str) {
        self.record(name, text, ConsolePolicy::Always);
    }

    fn record(&self, name: Option<&str>, text: &str, policy: ConsolePolicy) {
        if text.is_empty() {
            return;
        }
        let mut state = self.lock();
        let State {
            config,
            month_style,
            console,
            active,
        } = &mut *state;
        let Some(file) = active.as_mut() else {
            return;
        };

        match file.over_limit() {
            Ok(true) => {
                tracing::debug!(path = %file.path().display(), "system log over limit, emptying");
                if let Err(e) = file.truncate() {
                    tracing::warn!(error = %e, "cannot truncate system log");
                }
            }
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "cannot stat system log"),
        }

        let stamp = timestamp::line_stamp(&timestamp::now(), *month_style);
        let tag = name.map(|n| format!("[{n}] ")).unwrap_or_default();
        if let Err(e) = file.append(&[&stamp, &tag, text]) {
            tracing::warn!(error = %e, "cannot write system log");
        }
        if policy.shows(config.mute) {
            console.emit(&[&stamp, &tag, text]);
        }
    }
}

impl Default for SystemLog {
    fn default() -> Self {
        Self::new(SystemLogConfig::default(), Console::stderr())
    }
}

impl std::fmt::Debug for SystemLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SystemLog")
            .field("config", &state.config)
            .field("active", &state.active.is_some())
            .finish()
    }
}
