use async_trait::async_trait;
use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

use grid_core::info::MemberInfo;
use grid_core::member::Member;

/// Wire request asking one member to report its runtime information.
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct MemberInfoRequest;

/// One request in flight: the encoded request plus the slot the target
/// endpoint answers into. Dropping the envelope without replying is how an
/// endpoint signals that it cannot serve the request.
#[derive(Debug)]
pub struct TaskEnvelope {
    pub payload: Vec<u8>,
    pub reply_to: oneshot::Sender<Vec<u8>>,
}

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0} has no endpoint on this channel, it is not a current member of the distributed system")]
    NoSuchEndpoint(Member),
    #[error("endpoint of {0} went away before a reply arrived")]
    EndpointGone(Member),
    #[error("information request for {member} could not be encoded: {source}")]
    RequestEncode {
        member: Member,
        #[source]
        source: EncodeError,
    },
    #[error("reply from {member} could not be decoded: {source}")]
    MalformedReply {
        member: Member,
        #[source]
        source: DecodeError,
    },
}

/// Single-target dispatch of the informational task. One call sends one
/// request to one member and resolves with its typed reply; implementations
/// decide the transport, callers decide timeouts and cancellation.
#[async_trait]
pub trait TaskChannel: Send + Sync {
    async fn member_info(&self, target: &Member) -> Result<MemberInfo, TaskError>;
}
