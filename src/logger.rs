//! Log sink handle for the client's request, response and error log.
//!
//! A [`Logger`] writes to standard output by default. It can instead forward to
//! the `log` facade, so a host application that already runs `env_logger` (or
//! any other backend) sees the client's lines alongside its own, or to any
//! writer such as a file or an in-memory buffer.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use log::{Level, LevelFilter};

use crate::error::Result;

/// The kind of sink a [`Logger`] writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerTarget {
    Stdout,
    Facade,
    Writer,
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Clone)]
enum Sink {
    Stdout,
    Facade,
    Writer(SharedWriter),
}

/// A cloneable handle to a log sink.
///
/// Clones share the underlying writer.
#[derive(Clone)]
pub struct Logger {
    sink: Sink,
    level: LevelFilter,
    progname: Option<String>,
}

impl Logger {
    /// A logger writing formatted lines to standard output.
    pub fn stdout() -> Self {
        Self::with_sink(Sink::Stdout)
    }

    /// A logger forwarding every message to the `log` facade.
    pub fn facade() -> Self {
        Self::with_sink(Sink::Facade)
    }

    /// A logger writing formatted lines to `writer`.
    pub fn from_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_sink(Sink::Writer(Arc::new(Mutex::new(Box::new(writer)))))
    }

    fn with_sink(sink: Sink) -> Self {
        Self {
            sink,
            level: LevelFilter::Debug,
            progname: None,
        }
    }

    /// Sets the finest level that still gets written.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Sets the program name printed with each line. For the facade sink it is
    /// used as the log target.
    pub fn with_progname<S: Into<String>>(mut self, progname: S) -> Self {
        self.progname = Some(progname.into());
        self
    }

    pub fn target(&self) -> LoggerTarget {
        match self.sink {
            Sink::Stdout => LoggerTarget::Stdout,
            Sink::Facade => LoggerTarget::Facade,
            Sink::Writer(_) => LoggerTarget::Writer,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Writes one message at `level`. Messages finer than the logger's level
    /// are dropped without touching the sink.
    pub fn log(&self, level: Level, message: impl fmt::Display) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        match &self.sink {
            Sink::Facade => {
                let target = self.progname.as_deref().unwrap_or(module_path!());
                log::log!(target: target, level, "{}", message);
            }
            Sink::Stdout => {
                let line = self.format_line(level, &message);
                let mut out = io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()?;
            }
            Sink::Writer(writer) => {
                let line = self.format_line(level, &message);
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writer.write_all(line.as_bytes())?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    pub fn error(&self, message: impl fmt::Display) {
        let _ = self.log(Level::Error, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        let _ = self.log(Level::Warn, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        let _ = self.log(Level::Info, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        let _ = self.log(Level::Debug, message);
    }

    // E, [2026-10-15T09:12:44.120311 #4121] ERROR -- telphin: message
    fn format_line(&self, level: Level, message: &dyn fmt::Display) -> String {
        let label = level.as_str();
        format!(
            "{}, [{} #{}] {:>5} -- {}: {}\n",
            &label[..1],
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"),
            std::process::id(),
            label,
            self.progname.as_deref().unwrap_or_default(),
            message
        )
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("target", &self.target())
            .field("level", &self.level)
            .field("progname", &self.progname)
            .finish()
    }
}
