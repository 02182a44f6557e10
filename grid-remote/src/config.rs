use config::builder::DefaultState;
use config::{File, FileFormat, Source};
use serde::{Deserialize, Serialize};

use grid_core::config::{Config, ConfigBuilder};
use grid_core::util::duration::ConfigDuration;

use crate::REMOTE_CONFIG;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub reply_timeout: ConfigDuration,
    pub mailbox_capacity: usize,
}

impl Config for RemoteConfig {}

impl RemoteConfig {
    pub fn builder() -> RemoteConfigBuilder {
        RemoteConfigBuilder::default()
    }
}

#[derive(Debug)]
pub struct RemoteConfigBuilder {
    builder: config::ConfigBuilder<DefaultState>,
}

impl Default for RemoteConfigBuilder {
    fn default() -> Self {
        let builder = config::ConfigBuilder::<DefaultState>::default()
            .add_source(File::from_str(REMOTE_CONFIG, FileFormat::Toml));
        Self { builder }
    }
}

impl ConfigBuilder for RemoteConfigBuilder {
    type C = RemoteConfig;

    fn add_source<T>(self, source: T) -> anyhow::Result<Self>
    where
        T: Source + Send + Sync + 'static,
    {
        Ok(Self {
            builder: self.builder.add_source(source),
        })
    }

    fn build(self) -> anyhow::Result<Self::C> {
        let config = self.builder.build()?.try_deserialize::<Self::C>()?;
        Ok(config)
    }
}
