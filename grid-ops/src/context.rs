use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use grid_core::cluster::ClusterHandle;
use grid_remote::config::RemoteConfig;
use grid_remote::task::TaskChannel;

use crate::cancel::CancelSignal;
use crate::collector::RemoteInfoCollector;
use crate::registry::MemberRegistry;
use crate::resolver::MemberResolver;

/// Everything command handlers need, threaded explicitly: the cluster
/// handle, the task channel, the collect timeout and, optionally, the
/// session's interrupt signal.
#[derive(Clone)]
pub struct OpsContext {
    pub handle: ClusterHandle,
    pub channel: Arc<dyn TaskChannel>,
    pub reply_timeout: Duration,
    pub cancel: Option<CancelSignal>,
}

impl Debug for OpsContext {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("OpsContext")
            .field("handle", &self.handle)
            .field("reply_timeout", &self.reply_timeout)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl OpsContext {
    pub fn new(handle: ClusterHandle, channel: Arc<dyn TaskChannel>, reply_timeout: Duration) -> Self {
        Self {
            handle,
            channel,
            reply_timeout,
            cancel: None,
        }
    }

    pub fn from_config(
        handle: ClusterHandle,
        channel: Arc<dyn TaskChannel>,
        config: &RemoteConfig,
    ) -> Self {
        Self::new(handle, channel, config.reply_timeout.to_std_duration())
    }

    /// Interrupt signal for this session; a pending describe observes it and
    /// ends in the cancelled outcome.
    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn registry(&self) -> MemberRegistry {
        MemberRegistry::new(self.handle.clone())
    }

    pub fn resolver(&self) -> MemberResolver {
        MemberResolver::new(self.handle.clone())
    }

    pub fn collector(&self) -> RemoteInfoCollector {
        RemoteInfoCollector::new(self.handle.clone(), self.channel.clone(), self.reply_timeout)
    }
}
