use std::cell::RefCell;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    Debug,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

pub struct Logger {
    out: Box<dyn Write>,
}

impl Logger {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Box::new(file)))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self { out }
    }

    pub fn log(&mut self, level: Level, message: &str) {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let _ = writeln!(self.out, "[{}] {} {}", timestamp, level, message);
    }
}

// raw mode 中は標準出力に書けないのでファイルに出す
thread_local! {
    static LOGGER: RefCell<Option<Logger>> = const { RefCell::new(None) };
}

pub fn init<P: AsRef<Path>>(path: P) -> std::io::Result<()> {
    // debug build でのみロガーを初期化
    #[cfg(debug_assertions)]
    {
        let logger = Logger::new(path)?;
        LOGGER.with(|l| {
            *l.borrow_mut() = Some(logger);
        });
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = path;
    }
    Ok(())
}

fn write(level: Level, message: &str) {
    #[cfg(debug_assertions)]
    {
        LOGGER.with(|l| {
            if let Some(logger) = l.borrow_mut().as_mut() {
                logger.log(level, message);
            }
        });
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = (level, message);
    }
}

pub fn debug(message: &str) {
    write(Level::Debug, message);
}

pub fn error(message: &str) {
    write(Level::Error, message);
}
