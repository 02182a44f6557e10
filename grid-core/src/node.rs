use std::collections::BTreeSet;

use typed_builder::TypedBuilder;

use crate::info::CacheServerInfo;
use crate::member::MemberId;

/// Everything a member process knows about itself. An info agent answers
/// informational requests by snapshotting this state; nothing else reads it.
#[derive(Debug, Clone, TypedBuilder)]
pub struct NodeState {
    pub name: String,
    pub id: MemberId,
    pub host: String,
    pub process_id: u32,
    #[builder(default)]
    pub groups: Vec<String>,
    #[builder(default)]
    pub hosted_regions: BTreeSet<String>,
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
    pub cache_servers: Vec<CacheServerInfo>,
    #[builder(default)]
    pub client_connections: u32,
}

impl NodeState {
    pub fn is_server(&self) -> bool {
        !self.cache_servers.is_empty()
    }
}
