use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::report::{SectionedReport, TabularReport};

/// Everything a command invocation can end with. Failures become an
/// [`Error`](CommandOutcome::Error) outcome at the command boundary; nothing
/// propagates past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Tabular(TabularReport),
    Sectioned(SectionedReport),
    Info(String),
    Error(String),
    /// The command exists but cannot run right now, typically because the
    /// session is not connected. Deliberately not an error.
    Unavailable(String),
}

impl CommandOutcome {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Info(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CommandOutcome::Error(_))
    }
}

impl Display for CommandOutcome {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CommandOutcome::Tabular(report) => report.fmt(f),
            CommandOutcome::Sectioned(report) => report.fmt(f),
            CommandOutcome::Info(message) => write!(f, "{}", message),
            CommandOutcome::Error(message) => write!(f, "error: {}", message),
            CommandOutcome::Unavailable(message) => write!(f, "{}", message),
        }
    }
}
