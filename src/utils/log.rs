use std::str::FromStr;
use std::sync::{
    atomic::{AtomicU8, Ordering},
    Mutex, MutexGuard, OnceLock, PoisonError,
};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

static GLOBAL_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static GLOBAL_LOG_HANDLER: OnceLock<Mutex<Box<dyn LogHandler>>> = OnceLock::new();

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_u8(val: u8) -> LogLevel {
        match val {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

pub fn global_log_level() -> LogLevel {
    LogLevel::from_u8(GLOBAL_LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_global_log_level(level: LogLevel) {
    GLOBAL_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

fn should_log(level: LogLevel) -> bool {
    level >= global_log_level()
}

pub trait LogHandler: Send + Sync {
    fn handle(&self, level: LogLevel, target: &str, line: &str);
}

/// Writes every record to stderr, keeping stdout for command output.
pub struct ConsoleLogger;

impl LogHandler for ConsoleLogger {
    fn handle(&self, _level: LogLevel, _target: &str, line: &str) {
        eprintln!("{}", line);
    }
}

fn global_handler() -> MutexGuard<'static, Box<dyn LogHandler>> {
    GLOBAL_LOG_HANDLER
        .get_or_init(|| Mutex::new(Box::new(ConsoleLogger)))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn set_global_log_handler(handler: Box<dyn LogHandler>) {
    *global_handler() = handler;
}

pub fn log(level: LogLevel, target: &str, msg: &str) {
    if !should_log(level) {
        return;
    }

    let cur_thread = std::thread::current().id();
    let line = format!("[{}] [{:?}] [{}] {}", level.as_str(), cur_thread, target, msg);
    global_handler().handle(level, target, &line);
}

pub fn debug(target: &str, msg: &str) {
    log(LogLevel::Debug, target, msg);
}

pub fn info(target: &str, msg: &str) {
    log(LogLevel::Info, target, msg);
}

pub fn warn(target: &str, msg: &str) {
    log(LogLevel::Warning, target, msg);
}

pub fn error(target: &str, msg: &str) {
    log(LogLevel::Error, target, msg);
}
