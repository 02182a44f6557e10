use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use grid_core::info::MemberInfo;
use grid_core::member::{Member, MemberId};

use crate::codec::{decode_bytes, encode_bytes};
use crate::task::{MemberInfoRequest, TaskChannel, TaskEnvelope, TaskError};

/// Task channel for members living in this process. Every member registers
/// an endpoint; dispatch routes one envelope to the target endpoint and
/// waits on the reply slot. The wire format is the same as a network
/// transport would use, so replies still go through payload validation.
#[derive(Debug, Default)]
pub struct InProcessChannel {
    endpoints: DashMap<MemberId, mpsc::Sender<TaskEnvelope>>,
}

impl InProcessChannel {
    pub fn new() -> Self {
        Self {
            endpoints: DashMap::new(),
        }
    }

    pub fn register(&self, id: MemberId, mailbox: usize) -> mpsc::Receiver<TaskEnvelope> {
        let (tx, rx) = mpsc::channel(mailbox);
        debug!("endpoint {} registered", id);
        self.endpoints.insert(id, tx);
        rx
    }

    pub fn unregister(&self, id: &MemberId) {
        if self.endpoints.remove(id).is_some() {
            debug!("endpoint {} unregistered", id);
        }
    }
}

#[async_trait]
impl TaskChannel for InProcessChannel {
    async fn member_info(&self, target: &Member) -> Result<MemberInfo, TaskError> {
        let sender = match self.endpoints.get(&target.id) {
            Some(entry) => entry.value().clone(),
            None => return Err(TaskError::NoSuchEndpoint(target.clone())),
        };
        let payload = encode_bytes(&MemberInfoRequest).map_err(|source| {
            TaskError::RequestEncode {
                member: target.clone(),
                source,
            }
        })?;
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = TaskEnvelope {
            payload,
            reply_to: reply_tx,
        };
        if sender.send(envelope).await.is_err() {
            return Err(TaskError::EndpointGone(target.clone()));
        }
        match reply_rx.await {
            Ok(bytes) => {
                decode_bytes::<MemberInfo>(&bytes).map_err(|source| TaskError::MalformedReply {
                    member: target.clone(),
                    source,
                })
            }
            Err(_) => Err(TaskError::EndpointGone(target.clone())),
        }
    }
}
