use std::fmt::Debug;

use config::Source;

pub trait Config: Debug + Send + Sync {}

/// Settings are built from an embedded TOML default plus any number of
/// embedder-supplied sources layered on top.
pub trait ConfigBuilder: Sized {
    type C: Config;

    fn add_source<T>(self, source: T) -> anyhow::Result<Self>
    where
        T: Source + Send + Sync + 'static;

    fn build(self) -> anyhow::Result<Self::C>;
}
