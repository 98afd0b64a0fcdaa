//! Configuration for the watch index and its driver.
//!
//! Sources are merged in priority order:
//! 1. Type defaults
//! 2. File named by `CONFIG_PATH` (if set)
//! 3. Environment variables prefixed `WATCH_INDEX__` (highest priority)

mod driver;
mod notifier;
pub use driver::*;
pub use notifier::*;


use std::env;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Result;

const ENV_PREFIX: &str = "WATCH_INDEX";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IndexConfig {
    /// Limits applied by the in-process notifier
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Behaviour of the stdin driver
    #[serde(default)]
    pub driver: DriverConfig,
}

impl IndexConfig {
    /// Loads defaults, then `CONFIG_PATH`, then environment overrides.
    ///
    /// Does not validate; call [`IndexConfig::validate`] once all overrides
    /// are applied.
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        let config: Self = builder.add_source(environment()).build()?.try_deserialize()?;
        Ok(config)
    }

    /// Layers the file at `path` over the current values. Environment
    /// variables still win.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn validate(self) -> Result<Self> {
        self.notifier.validate()?;
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}
