use std::collections::BTreeSet;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::member::MemberId;

/// One network endpoint a server member exposes to clients. Only meaningful
/// inside the [`MemberInfo`] that reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct CacheServerInfo {
    pub bind_address: String,
    pub port: u16,
    pub running: bool,
}

impl CacheServerInfo {
    pub fn new(bind_address: impl Into<String>, port: u16, running: bool) -> Self {
        Self {
            bind_address: bind_address.into(),
            port,
            running,
        }
    }
}

/// Point-in-time runtime snapshot of one member, as reported by that member.
/// The identity fields are overwritten from the registry before the snapshot
/// is shown to an operator; a new query always produces a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TypedBuilder)]
pub struct MemberInfo {
    pub name: String,
    pub id: MemberId,
    pub host: String,
    pub process_id: u32,
    #[builder(default)]
    pub hosted_regions: BTreeSet<String>,
    #[builder(default)]
    pub groups: Vec<String>,
    #[builder(default)]
    pub heap_used_mb: f64,
    #[builder(default)]
    pub heap_max_mb: f64,
    #[builder(default)]
    pub off_heap_size: Option<String>,
    #[builder(default)]
    pub working_dir: String,
    #[builder(default)]
    pub log_file: String,
    #[builder(default)]
    pub locators: String,
    #[builder(default)]
    pub is_server: bool,
    #[builder(default)]
    pub cache_servers: Vec<CacheServerInfo>,
    #[builder(default)]
    pub client_connections: u32,
}
