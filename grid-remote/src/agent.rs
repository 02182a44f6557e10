use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use grid_core::info::MemberInfo;
use grid_core::node::NodeState;

use crate::codec::{decode_bytes, encode_bytes};
use crate::task::{MemberInfoRequest, TaskEnvelope};

/// Member-side responder. Drains the member's endpoint mailbox and answers
/// every informational request with a fresh snapshot of the node's state.
#[derive(Debug)]
pub struct InfoAgent {
    state: Arc<NodeState>,
}

impl InfoAgent {
    pub fn new(state: NodeState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn spawn(self, mut mailbox: mpsc::Receiver<TaskEnvelope>) -> JoinHandle<()> {
        tokio::spawn(async move {
            debug!("info agent of {} started", self.state.id);
            while let Some(envelope) = mailbox.recv().await {
                self.handle(envelope);
            }
            debug!("info agent of {} stopped", self.state.id);
        })
    }

    fn handle(&self, envelope: TaskEnvelope) {
        let TaskEnvelope { payload, reply_to } = envelope;
        match decode_bytes::<MemberInfoRequest>(&payload) {
            Ok(MemberInfoRequest) => {}
            Err(error) => {
                warn!(
                    "info agent of {} dropped an undecodable request: {}",
                    self.state.id, error
                );
                return;
            }
        }
        let info = local_member_info(&self.state);
        match encode_bytes(&info) {
            Ok(bytes) => {
                if reply_to.send(bytes).is_err() {
                    debug!("info agent of {} reply discarded, requester gone", self.state.id);
                }
            }
            Err(error) => {
                warn!(
                    "info agent of {} could not encode its reply: {}",
                    self.state.id, error
                );
            }
        }
    }
}

/// Snapshot of everything this node reports about itself when asked to
/// describe the member.
pub fn local_member_info(state: &NodeState) -> MemberInfo {
    MemberInfo::builder()
        .name(state.name.clone())
        .id(state.id.clone())
        .host(state.host.clone())
        .process_id(state.process_id)
        .hosted_regions(state.hosted_regions.clone())
        .groups(state.groups.clone())
        .heap_used_mb(state.heap_used_mb)
        .heap_max_mb(state.heap_max_mb)
        .off_heap_size(state.off_heap_size.clone())
        .working_dir(state.working_dir.clone())
        .log_file(state.log_file.clone())
        .locators(state.locators.clone())
        .is_server(state.is_server())
        .cache_servers(state.cache_servers.clone())
        .client_connections(state.client_connections)
        .build()
}
