use std::{
    io::{self, Write},
    sync::{Mutex, MutexGuard, OnceLock, RwLock},
};

use crossterm::style::{style, Attribute, Color, Stylize};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);

    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub message: String,
    pub source: String,
}

impl Message {
    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let color = match self.level {
            Level::Error => Color::Red,
            Level::Warn => Color::Yellow,
            Level::Info => Color::White,
            Level::Debug => Color::Blue,
            Level::Trace => Color::Grey,
        };

        writeln!(
            out,
            "{:5} {} -> {}",
            style(self.level).with(color),
            style(&self.source).attribute(Attribute::Dim),
            self.message
        )
    }
}

/// Logger writing to stderr.
///
/// While the terminal shows the animation, messages are held back and written out once the
/// screen is restored.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
    held: Mutex<Option<Vec<Message>>>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
            held: Mutex::new(None),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        match self.min_level.read() {
            Ok(level) => *level,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        match self.min_level.write() {
            Ok(mut min_level) => *min_level = level,
            Err(poisoned) => *poisoned.into_inner() = level,
        }
    }

    fn borrow_mut_held(&self) -> MutexGuard<'_, Option<Vec<Message>>> {
        // a panic while holding the lock can't leave the buffer half written
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Starts buffering messages instead of writing them.
    pub fn hold(&self) {
        self.borrow_mut_held().get_or_insert_with(Vec::new);
    }

    /// Writes out everything held since [`AppLogger::hold`] and goes back to writing directly.
    pub fn release(&self) {
        let held = self.borrow_mut_held().take();
        let mut stderr = io::stderr().lock();
        for message in held.into_iter().flatten() {
            let _ = message.write_to(&mut stderr);
        }
    }

    pub fn held_count(&self) -> usize {
        self.borrow_mut_held().as_ref().map_or(0, Vec::len)
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = Message {
            level: record.level(),
            message: record.args().to_string(),
            source: record.module_path().unwrap_or("unknown").to_string(),
        };

        match self.borrow_mut_held().as_mut() {
            Some(held) => held.push(message),
            None => {
                let _ = message.write_to(&mut io::stderr().lock());
            }
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
