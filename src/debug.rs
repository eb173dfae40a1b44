//! Debugging infrastructure for chatdock.
//!
//! Category-tagged output is controlled by the DEBUG_LEVEL environment variable:
//! - 0 or unset: No debugging
//! - 1: Errors only
//! - 2: Info level (tab and panel operations)
//! - 3: Debug level (drop-zone and resize calculations)
//! - 4: Trace level (every pointer move and no-op commit)
//!
//! All output goes to /tmp/chatdock_debug.log on Unix/macOS,
//! or %TEMP%\chatdock_debug.log on Windows.
//!
//! Records from the `log` facade are routed to the same file once
//! [`init_log_bridge`] has run.

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => match val.trim().parse::<u8>() {
                Ok(1) => DebugLevel::Error,
                Ok(2) => DebugLevel::Info,
                Ok(3) => DebugLevel::Debug,
                Ok(4) => DebugLevel::Trace,
                _ => DebugLevel::Off,
            },
            Err(_) => DebugLevel::Off,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF  ",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

/// Location of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/chatdock_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("chatdock_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    /// Set once the file has been opened (or failed to open)
    opened: bool,
}

impl DebugLogger {
    fn new() -> Self {
        let level = DebugLevel::from_env();
        let mut logger = DebugLogger {
            level,
            file: None,
            opened: false,
        };
        if level != DebugLevel::Off {
            logger.open();
        }
        logger
    }

    /// Open (truncating) the log file and write the session header
    fn open(&mut self) {
        if self.opened {
            return;
        }
        self.opened = true;
        // Failing to open the file silently disables file output
        self.file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        self.write_raw(&format!(
            "\n{}\nchatdock debug session started at {} (level={:?})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            self.level,
            "=".repeat(80)
        ));
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level != DebugLevel::Off && level <= self.level {
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level.label(),
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// `log` facade backend writing into the debug file
struct LogBridge {
    /// Also print records to stderr (enabled by RUST_LOG)
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if self.mirror_stderr {
            eprint!("{line}");
        }
        let mut logger = get_logger().lock();
        logger.open();
        logger.write_raw(&line);
    }

    fn flush(&self) {}
}

/// Route `log` records to the debug file
///
/// The explicit `level` (from `--log-level`) wins, then RUST_LOG, then info.
/// When RUST_LOG is set, records are mirrored to stderr as well. Calling this
/// more than once only updates the level filter.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let from_env = rust_log
        .as_deref()
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok());
    let filter = level.or(from_env).unwrap_or(log::LevelFilter::Info);

    let bridge = LogBridge {
        mirror_stderr: rust_log.is_some(),
    };
    if log::set_boxed_logger(Box::new(bridge)).is_err() {
        crate::debug_log!("LOG", "log bridge already installed");
    }
    log::set_max_level(filter);
}

/// Apply a level filter after startup (e.g. once the config is loaded)
pub fn set_log_level(filter: log::LevelFilter) {
    log::set_max_level(filter);
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
