use serde::{Deserialize, Serialize};

/// Duration as it appears in config files, e.g. `reply_timeout = { seconds = 5 }`.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ConfigDuration {
    minutes: Option<u64>,
    seconds: Option<u64>,
    milliseconds: Option<u64>,
}

impl ConfigDuration {
    pub fn to_std_duration(&self) -> std::time::Duration {
        let minutes = self.minutes.unwrap_or(0);
        let seconds = self.seconds.unwrap_or(0);
        let milliseconds = self.milliseconds.unwrap_or(0);
        std::time::Duration::from_secs(minutes * 60 + seconds)
            + std::time::Duration::from_millis(milliseconds)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self {
            minutes: None,
            seconds: None,
            milliseconds: Some(millis),
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self {
            minutes: None,
            seconds: Some(secs),
            milliseconds: None,
        }
    }
}
