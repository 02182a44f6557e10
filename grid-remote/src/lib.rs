pub const REMOTE_CONFIG: &'static str = include_str!("../remote.toml");

pub mod agent;
pub mod codec;
pub mod config;
pub mod in_process;
pub mod task;
