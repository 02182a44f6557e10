pub mod cluster;
pub mod config;
pub mod error;
pub mod ext;
pub mod info;
pub mod member;
pub mod node;
pub mod util;
