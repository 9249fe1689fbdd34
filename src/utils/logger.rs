//! Logger utility for run logs
//!
//! This module provides a file-backed logger that works alongside the
//! standard log crate. Commands write their results to it, and it can be
//! installed as the global `log` backend when a log file is requested.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Metadata, LevelFilter};

/// File logger; a logger without a file drops everything
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written when used as the global logger
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger writing to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file, truncated if it exists
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: LevelFilter::Info,
        })
    }

    /// A logger that writes nowhere
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
            level: LevelFilter::Off,
        }
    }

    /// Set the most verbose level accepted as a global logger
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Whether messages end up anywhere
    pub fn is_enabled(&self) -> bool {
        self.file.lock().map(|f| f.is_some()).unwrap_or(false)
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// A second logger sharing this one's file handle
    pub fn try_clone(&self) -> io::Result<Self> {
        let guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        let file = match guard.as_ref() {
            Some(f) => Some(f.try_clone()?),
            None => None,
        };
        Ok(Logger {
            file: Mutex::new(file),
            level: self.level,
        })
    }

    /// Install a copy of this logger as the global `log` backend
    ///
    /// Records and result lines end up interleaved in the same file.
    pub fn init_global_logger(&self, level: LevelFilter) -> io::Result<()> {
        let global_logger = self.try_clone()?.with_level(level);

        // set_boxed_logger only fails if a logger is already installed
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            let _ = Logger::log(self, &message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_writes_lines() {
        let path = std::env::temp_dir().join("scalekit_logger_test.log");
        let path_str = path.to_str().unwrap();

        let logger = Logger::new(path_str).unwrap();
        assert!(logger.is_enabled());
        logger.log("scale 1:18897.64").unwrap();
        logger.log("done").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "scale 1:18897.64\ndone\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_clone_shares_file() {
        let path = std::env::temp_dir().join("scalekit_logger_clone_test.log");
        let path_str = path.to_str().unwrap();

        let logger = Logger::new(path_str).unwrap();
        let twin = logger.try_clone().unwrap().with_level(LevelFilter::Debug);
        logger.log("first").unwrap();
        twin.log("second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_disabled_logger_accepts_messages() {
        let logger = Logger::disabled();
        assert!(!logger.is_enabled());
        assert!(logger.log("ignored").is_ok());
    }
}
