use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::error::Elapsed;
use tracing::{debug, warn};

use grid_core::cluster::ClusterHandle;
use grid_core::info::MemberInfo;
use grid_core::member::Member;
use grid_remote::task::{TaskChannel, TaskError};

use crate::cancel::CancelSignal;

#[derive(Error, Debug)]
pub enum RemoteFailure {
    #[error("{detail}")]
    TargetUnreachable { detail: String },
    #[error("reply from {member} could not be interpreted as member information")]
    MalformedReply { member: Member },
    #[error("{member} did not reply within {timeout:?}")]
    ReplyTimeout { member: Member, timeout: Duration },
    #[error("the cluster handle was closed while contacting {member}")]
    SystemUnavailable { member: Member },
}

/// Cancellation is the caller changing its mind, not the remote invocation
/// going wrong, so it stays outside [`RemoteFailure`].
#[derive(Error, Debug)]
pub enum CollectFailure {
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
    #[error("collecting member information was cancelled")]
    Cancelled,
}

/// Dispatches the informational task to one target member and awaits its
/// reply under the configured timeout. One call, one dispatch: no retries,
/// no fan-out, no caching of earlier replies.
pub struct RemoteInfoCollector {
    handle: ClusterHandle,
    channel: Arc<dyn TaskChannel>,
    reply_timeout: Duration,
}

impl Debug for RemoteInfoCollector {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("RemoteInfoCollector")
            .field("handle", &self.handle)
            .field("reply_timeout", &self.reply_timeout)
            .finish_non_exhaustive()
    }
}

impl RemoteInfoCollector {
    pub fn new(handle: ClusterHandle, channel: Arc<dyn TaskChannel>, reply_timeout: Duration) -> Self {
        Self {
            handle,
            channel,
            reply_timeout,
        }
    }

    pub async fn collect(&self, target: &Member) -> Result<MemberInfo, CollectFailure> {
        self.ensure_available(target)?;
        let outcome =
            tokio::time::timeout(self.reply_timeout, self.channel.member_info(target)).await;
        self.resolve(target, outcome)
    }

    /// Same as [`collect`](Self::collect), abandoned early when the signal
    /// fires. The dispatch itself is dropped on cancellation; a late reply
    /// goes nowhere.
    pub async fn collect_with_cancel(
        &self,
        target: &Member,
        cancel: &mut CancelSignal,
    ) -> Result<MemberInfo, CollectFailure> {
        self.ensure_available(target)?;
        tokio::select! {
            outcome = tokio::time::timeout(self.reply_timeout, self.channel.member_info(target)) => {
                self.resolve(target, outcome)
            }
            _ = cancel.cancelled() => {
                debug!("collecting information of {} cancelled", target);
                Err(CollectFailure::Cancelled)
            }
        }
    }

    fn ensure_available(&self, target: &Member) -> Result<(), CollectFailure> {
        if self.handle.is_closed() {
            return Err(RemoteFailure::SystemUnavailable {
                member: target.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn resolve(
        &self,
        target: &Member,
        outcome: Result<Result<MemberInfo, TaskError>, Elapsed>,
    ) -> Result<MemberInfo, CollectFailure> {
        match outcome {
            Ok(Ok(info)) => Ok(info),
            Ok(Err(error)) => Err(self.remote_failure(target, error).into()),
            Err(_) => {
                warn!("{} did not reply within {:?}", target, self.reply_timeout);
                Err(RemoteFailure::ReplyTimeout {
                    member: target.clone(),
                    timeout: self.reply_timeout,
                }
                .into())
            }
        }
    }

    fn remote_failure(&self, target: &Member, error: TaskError) -> RemoteFailure {
        // a dispatch failure while the handle is closing is the closing
        if self.handle.is_closed() {
            return RemoteFailure::SystemUnavailable {
                member: target.clone(),
            };
        }
        match error {
            TaskError::MalformedReply { member, source } => {
                warn!("reply from {} failed payload validation: {}", member, source);
                RemoteFailure::MalformedReply { member }
            }
            error => RemoteFailure::TargetUnreachable {
                detail: error.to_string(),
            },
        }
    }
}
