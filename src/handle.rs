use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::policy::{Shape, WriteOptions};
use crate::sink::{self, FileSink, PathStatus};
use crate::syslog::SystemLog;
use crate::timestamp::{self, MonthStyle};
use crate::{Error, LogConfig, Result};

/// Largest ceiling accepted by the setters, in megabytes.
///
/// Byte ceilings never exceed `i32::MAX`.
pub const MAX_SIZE_LIMIT_MB: u64 = (i32::MAX as u64) >> 20;

pub(crate) fn megabytes_to_bytes(megabytes: u64) -> u64 {
    megabytes.saturating_mul(1 << 20)
}

pub(crate) fn checked_megabytes(megabytes: u64) -> Result<u64> {
    if megabytes > MAX_SIZE_LIMIT_MB {
        return Err(Error::SizeOverflow { megabytes });
    }
    Ok(megabytes << 20)
}

/// Where a new handle ended up.
#[derive(Debug)]
pub enum CreateOutcome {
    /// The requested path was used.
    Requested(LogHandle),
    /// The requested path was unusable; the handle writes to a generated file.
    Fallback {
        handle: LogHandle,
        requested: PathBuf,
    },
}

impl CreateOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn handle(&self) -> &LogHandle {
        match self {
            Self::Requested(handle) | Self::Fallback { handle, .. } => handle,
        }
    }

    pub fn into_handle(self) -> LogHandle {
        match self {
            Self::Requested(handle) | Self::Fallback { handle, .. } => handle,
        }
    }
}

/// Build `<dir>/<name>-YYYYMMDDHHMMSS.out`.
pub fn fallback_path(dir: &Path, name: Option<&str>, style: MonthStyle) -> PathBuf {
    let suffix = timestamp::file_suffix(&timestamp::now(), style);
    dir.join(format!("{}{}", name.unwrap_or_default(), suffix))
}

/// A named log file, optionally mirrored to the console.
///
/// Every write first checks the ceiling: once the file has grown past it,
/// the file is emptied before the new text is appended. Nothing is kept.
///
/// Dropping the handle records its destruction in the system log and closes
/// the file.
#[derive(Debug)]
pub struct LogHandle {
    name: Option<String>,
    sink: FileSink,
    mute: bool,
    month_style: MonthStyle,
    console: Console,
    syslog: SystemLog,
}

impl LogHandle {
    pub(crate) fn create(
        config: &LogConfig,
        console: &Console,
        syslog: &SystemLog,
        name: Option<&str>,
        path: &Path,
        mute: bool,
    ) -> Result<CreateOutcome> {
        let name = name.filter(|n| !n.is_empty());
        let label = name.unwrap_or("unnamed");
        let limit = megabytes_to_bytes(config.size_limit);
        syslog.add(None, &format!("[{label}] Creating...\n"));

        if sink::probe(path) != PathStatus::ReadOnly {
            match open_with_dirs(syslog, path, limit) {
                Ok(file) => {
                    let handle = Self::from_sink(config, console, syslog, name, file, mute);
                    handle.record_created();
                    return Ok(CreateOutcome::Requested(handle));
                }
                Err(e) => {
                    syslog.add_nomute(None, &format!("[{label}] open {:?}: {e}\n", path));
                }
            }
        }

        syslog.add(
            None,
            &format!("[{label}] {:?} cannot write, try to create a temp file\n", path),
        );
        let fallback = fallback_path(&config.log_dir, name, config.month_style);
        tracing::debug!(requested = %path.display(), fallback = %fallback.display(), "using fallback log path");

        match open_with_dirs(syslog, &fallback, limit) {
            Ok(file) => {
                let handle = Self::from_sink(config, console, syslog, name, file, mute);
                handle.record_created();
                Ok(CreateOutcome::Fallback {
                    handle,
                    requested: path.to_path_buf(),
                })
            }
            Err(source) => {
                syslog.add(
                    None,
                    &format!("[{label}] Create err: cannot create file {:?}\n", fallback),
                );
                Err(Error::Create {
                    name: name.map(str::to_string),
                    requested: path.to_path_buf(),
                    fallback,
                    source,
                })
            }
        }
    }

    fn from_sink(
        config: &LogConfig,
        console: &Console,
        syslog: &SystemLog,
        name: Option<&str>,
        sink: FileSink,
        mute: bool,
    ) -> Self {
        Self {
            name: name.map(str::to_string),
            sink,
            mute,
            month_style: config.month_style,
            console: console.clone(),
            syslog: syslog.clone(),
        }
    }

    fn record_created(&self) {
        self.record(&format!("Create ok, link file: {:?}\n", self.sink.path()));
    }

    fn record(&self, text: &str) {
        self.syslog.add(self.name.as_deref(), text);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The file this handle appends to.
    pub fn path(&self) -> &Path {
        self.sink.path()
    }

    pub fn is_muted(&self) -> bool {
        self.mute
    }

    /// Current ceiling in bytes; 0 means unlimited.
    pub fn size_limit(&self) -> u64 {
        self.sink.size_limit()
    }

    /// Close the handle. Same as dropping it.
    pub fn destroy(self) {
        drop(self);
    }

    /// Current size of the backing file in bytes.
    pub fn file_size(&self) -> Result<u64> {
        Ok(self.sink.size()?)
    }

    /// Set the ceiling in megabytes; 0 disables truncation.
    ///
    /// Returns the new ceiling in bytes. On overflow the previous ceiling is kept.
    pub fn set_size_limit(&mut self, megabytes: u64) -> Result<u64> {
        let bytes = checked_megabytes(megabytes)?;
        self.sink.set_size_limit(bytes);
        self.record(&format!("set file size to {bytes}\n"));
        Ok(bytes)
    }

    pub fn set_mute(&mut self, mute: bool) {
        self.mute = mute;
        if mute {
            self.record("set mute to MUTE\n");
        } else {
            self.record("set mute to NOMUTE\n");
        }
    }

    /// Empty the backing file.
    pub fn truncate(&mut self) -> Result<()> {
        self.sink.truncate()?;
        self.record("log file truncated\n");
        Ok(())
    }

    fn shrink(&mut self) -> Result<()> {
        if self.sink.over_limit()? {
            tracing::debug!(path = %self.sink.path().display(), limit = self.sink.size_limit(), "log over limit, emptying");
            self.record("file size limit reached, emptying file\n");
            self.truncate()?;
        }
        Ok(())
    }

    /// Write according to `options`.
    ///
    /// Text is written as given; include the trailing newline yourself.
    /// Empty text is ignored for the text shapes.
    pub fn write(&mut self, options: WriteOptions, text: &str) -> Result<()> {
        if options.shape != Shape::Time && text.is_empty() {
            return Ok(());
        }

        self.shrink()?;

        let stamp = match options.shape {
            Shape::Text => String::new(),
            Shape::Time | Shape::Stamped => {
                timestamp::line_stamp(&timestamp::now(), self.month_style)
            }
        };
        let text = match options.shape {
            Shape::Time => "",
            Shape::Text | Shape::Stamped => text,
        };

        self.sink.append(&[&stamp, text])?;

        if options.console.shows(self.mute) {
            let tag = match (options.shape, &self.name) {
                (Shape::Stamped, Some(name)) => format!("[{name}] :"),
                _ => String::new(),
            };
            self.console.emit(&[&stamp, &tag, text]);
        }

        self.record(options.shape.event());
        Ok(())
    }

    /// Append the current stamp.
    pub fn add_time(&mut self) -> Result<()> {
        self.write(WriteOptions::time(), "")
    }

    pub fn add_time_mute(&mut self) -> Result<()> {
        self.write(WriteOptions::time().mute(), "")
    }

    pub fn add_time_nomute(&mut self) -> Result<()> {
        self.write(WriteOptions::time().nomute(), "")
    }

    /// Append `text` without a stamp.
    pub fn add_text(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::text(), text)
    }

    pub fn add_text_mute(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::text().mute(), text)
    }

    pub fn add_text_nomute(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::text().nomute(), text)
    }

    /// Append the current stamp followed by `text`.
    pub fn add(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::stamped(), text)
    }

    pub fn add_mute(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::stamped().mute(), text)
    }

    pub fn add_nomute(&mut self, text: &str) -> Result<()> {
        self.write(WriteOptions::stamped().nomute(), text)
    }
}

impl Drop for LogHandle {
    fn drop(&mut self) {
        self.record("log destroyed\n");
    }
}

/// Create the parent directories of `path` and open it.
///
/// Directory failures are only recorded; the open reports the real error.
fn open_with_dirs(syslog: &SystemLog, path: &Path, limit: u64) -> std::io::Result<FileSink> {
    match sink::create_parent_dirs(path) {
        Ok(Some(dir)) => syslog.add(None, &format!("mkdir {:?} ok\n", dir)),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot create log directory");
            syslog.add(None, &format!("[mkdir]: {:?} {e}\n", path.parent().unwrap_or(path)));
        }
    }
    FileSink::open(path, limit)
}
