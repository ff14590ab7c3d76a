use near_sdk::env;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    INFO,
    WARN,
}

/// Free-form log line, formatted as `[LEVEL] [NAME] message`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEvent(pub Level, pub &'static str);

impl Display for LogEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] [{}]", self.0, self.1)
    }
}

impl LogEvent {
    pub fn log<Msg>(&self, msg: Msg)
    where
        Msg: Display,
    {
        env::log(format!("{} {}", self, msg).as_bytes());
    }
}

pub const LOG_EVENT_AUTO_DELEGATE: LogEvent = LogEvent(Level::INFO, "AUTO_DELEGATE");
pub const LOG_EVENT_DELEGATE_CALL_ROLLED_BACK: LogEvent =
    LogEvent(Level::WARN, "DELEGATE_CALL_ROLLED_BACK");
pub const LOG_EVENT_SETTLEMENT_HALTED: LogEvent = LogEvent(Level::WARN, "SETTLEMENT_HALTED");
