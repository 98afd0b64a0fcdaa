use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotifierConfig {
    /// Upper bound on live watches; registrations beyond it are refused
    #[serde(default = "default_max_watches")]
    pub max_watches: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            max_watches: default_max_watches(),
        }
    }
}

impl NotifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_watches == 0 {
            return Err(Error::Config(ConfigError::Message(
                "notifier.max_watches must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_max_watches() -> usize {
    10_000
}
