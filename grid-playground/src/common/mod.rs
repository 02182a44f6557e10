use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;

use grid_core::cluster::ClusterHandle;
use grid_core::config::ConfigBuilder;
use grid_core::info::CacheServerInfo;
use grid_core::member::{Member, MemberId};
use grid_core::node::NodeState;
use grid_remote::agent::InfoAgent;
use grid_remote::config::RemoteConfig;
use grid_remote::in_process::InProcessChannel;

pub const DEMO_LOCATORS: &str = "demo-host[10334]";

/// In-process demo cluster: one locator plus `servers` cache servers.
/// Every member lands in the membership snapshot and gets an info agent
/// answering on the shared channel.
pub fn build_demo_cluster(
    servers: usize,
) -> anyhow::Result<(ClusterHandle, Arc<InProcessChannel>, RemoteConfig)> {
    let config = RemoteConfig::builder().build()?;
    let handle = ClusterHandle::new();
    let channel = Arc::new(InProcessChannel::new());
    spawn_demo_member(&handle, &channel, locator_state(), config.mailbox_capacity);
    for index in 0..servers {
        spawn_demo_member(&handle, &channel, server_state(index), config.mailbox_capacity);
    }
    Ok((handle, channel, config))
}

/// Registers the member and starts its agent; the cluster sees it as alive
/// until the agent's mailbox is dropped.
pub fn spawn_demo_member(
    handle: &ClusterHandle,
    channel: &Arc<InProcessChannel>,
    state: NodeState,
    mailbox_capacity: usize,
) {
    handle.upsert_member(Member::new_with_groups(
        state.name.clone(),
        state.id.clone(),
        state.host.clone(),
        state.process_id,
        state.groups.iter().cloned().collect(),
    ));
    let mailbox = channel.register(state.id.clone(), mailbox_capacity);
    InfoAgent::new(state).spawn(mailbox);
}

pub fn locator_state() -> NodeState {
    let process_id = rand::thread_rng().gen_range(1000..9999);
    NodeState::builder()
        .name("locator-0".to_string())
        .id(member_id("demo-host", "locator-0", process_id, 10334))
        .host("demo-host".to_string())
        .process_id(process_id)
        .groups(vec!["locators".to_string()])
        .heap_used_mb(48.0)
        .heap_max_mb(256.0)
        .working_dir("/var/data/locator-0".to_string())
        .log_file("/var/log/locator-0.log".to_string())
        .locators(DEMO_LOCATORS.to_string())
        .build()
}

pub fn server_state(index: usize) -> NodeState {
    let mut rng = rand::thread_rng();
    let name = format!("server-{}", index);
    let host = format!("demo-host-{}", index + 1);
    let process_id = rng.gen_range(1000..9999);
    let port = 40404 + index as u16;
    let group = if index % 2 == 0 { "blue" } else { "green" };
    NodeState::builder()
        .name(name.clone())
        .id(member_id(&host, &name, process_id, 41000 + index as u16))
        .host(host.clone())
        .process_id(process_id)
        .groups(vec![group.to_string()])
        .hosted_regions(BTreeSet::from(["orders".to_string(), "customers".to_string()]))
        .heap_used_mb(rng.gen_range(64..512) as f64)
        .heap_max_mb(1024.0)
        .working_dir(format!("/var/data/{}", name))
        .log_file(format!("/var/log/{}.log", name))
        .locators(DEMO_LOCATORS.to_string())
        .cache_servers(vec![CacheServerInfo::new(host, port, true)])
        .client_connections(rng.gen_range(0..16))
        .build()
}

/// Member ids in the usual `host(name:pid)<v1>:port` shape.
fn member_id(host: &str, name: &str, process_id: u32, port: u16) -> MemberId {
    MemberId::new(format!("{}({}:{})<v1>:{}", host, name, process_id, port))
}
