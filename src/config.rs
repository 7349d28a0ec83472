use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::timestamp::MonthStyle;

/// Default directory for fallback log files.
pub const DEFAULT_LOG_DIR: &str = "./logs/";
/// Default ceiling for user logs, in megabytes.
pub const DEFAULT_SIZE_LIMIT_MB: u64 = 100;
/// Default system log location.
pub const DEFAULT_SYSTEM_LOG_PATH: &str = "./logs/sys.out";
/// Default ceiling for the system log, in megabytes.
pub const DEFAULT_SYSTEM_SIZE_LIMIT_MB: u64 = 1;

/// Parse a size string with an optional unit (M/G, case-insensitive), defaulting to MB.
fn parse_megabytes(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return Err("empty size string".to_string());
    };

    let (num_str, unit) = if last.is_alphabetic() {
        (&s[..s.len() - last.len_utf8()], last.to_ascii_uppercase())
    } else {
        (s, 'M')
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    let multiplier = match unit {
        'M' => 1,
        'G' => 1024,
        _ => return Err(format!("invalid unit: {}, supported: M/G", unit)),
    };

    num.checked_mul(multiplier)
        .ok_or_else(|| "size too large".to_string())
}

/// Size value that can be a number or string with units.
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Number(u64),
    String(String),
}

fn deserialize_megabytes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Number(n) => Ok(n),
        SizeValue::String(s) => parse_megabytes(&s).map_err(de::Error::custom),
    }
}

/// Configuration for a [`LogSystem`](crate::LogSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory that receives fallback files when a requested path is unusable.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Ceiling for new user logs in megabytes; 0 disables truncation.
    /// Accepts a number or a string such as "100M" or "1G".
    #[serde(
        default = "default_size_limit",
        deserialize_with = "deserialize_megabytes"
    )]
    pub size_limit: u64,
    /// Month rendering for stamps and fallback file names.
    #[serde(default)]
    pub month_style: MonthStyle,
    /// Filter level for this crate's own diagnostics (e.g. "warn", "debug").
    #[serde(default = "default_diagnostics")]
    pub diagnostics: String,
    /// System log settings.
    #[serde(default)]
    pub system: SystemLogConfig,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            log_dir: default_log_dir(),
            size_limit: default_size_limit(),
            month_style: MonthStyle::default(),
            diagnostics: default_diagnostics(),
            system: SystemLogConfig::default(),
        }
    }

    /// Set the fallback directory
    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Set the default user log ceiling in megabytes
    pub fn with_size_limit(mut self, megabytes: u64) -> Self {
        self.size_limit = megabytes;
        self
    }

    /// Set the month rendering
    pub fn with_month_style(mut self, style: MonthStyle) -> Self {
        self.month_style = style;
        self
    }

    /// Set the diagnostics filter level
    pub fn with_diagnostics(mut self, level: impl Into<String>) -> Self {
        self.diagnostics = level.into();
        self
    }

    /// Set the system log configuration
    pub fn with_system(mut self, system: SystemLogConfig) -> Self {
        self.system = system;
        self
    }

    /// Reject values that can never produce a working handle.
    pub fn validate(&self) -> crate::Result<()> {
        if self.log_dir.as_os_str().is_empty() {
            return Err(crate::Error::Config("log_dir must not be empty".into()));
        }
        if self.system.path.as_os_str().is_empty() {
            return Err(crate::Error::Config("system.path must not be empty".into()));
        }
        for (field, mb) in [
            ("size_limit", self.size_limit),
            ("system.size_limit", self.system.size_limit),
        ] {
            if mb > crate::handle::MAX_SIZE_LIMIT_MB {
                return Err(crate::Error::Config(format!(
                    "{field} of {mb} MB exceeds {} MB",
                    crate::handle::MAX_SIZE_LIMIT_MB
                )));
            }
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_size_limit() -> u64 {
    DEFAULT_SIZE_LIMIT_MB
}

fn default_diagnostics() -> String {
    "warn".to_string()
}

/// Configuration for the system log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogConfig {
    /// Path of the system log file
    #[serde(default = "default_system_path")]
    pub path: PathBuf,
    /// Keep system log records off the console
    #[serde(default = "default_system_mute")]
    pub mute: bool,
    /// Ceiling in megabytes; 0 disables truncation
    #[serde(
        default = "default_system_size_limit",
        deserialize_with = "deserialize_megabytes"
    )]
    pub size_limit: u64,
}

impl SystemLogConfig {
    /// Create a new SystemLogConfig
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the mute flag
    pub fn with_mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Set the ceiling in megabytes
    pub fn with_size_limit(mut self, megabytes: u64) -> Self {
        self.size_limit = megabytes;
        self
    }
}

impl Default for SystemLogConfig {
    fn default() -> Self {
        Self {
            path: default_system_path(),
            mute: default_system_mute(),
            size_limit: default_system_size_limit(),
        }
    }
}

fn default_system_path() -> PathBuf {
    PathBuf::from(DEFAULT_SYSTEM_LOG_PATH)
}

fn default_system_mute() -> bool {
    true
}

fn default_system_size_limit() -> u64 {
    DEFAULT_SYSTEM_SIZE_LIMIT_MB
}
