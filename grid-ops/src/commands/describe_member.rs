use anyhow::bail;
use async_trait::async_trait;

use crate::aggregate::aggregate;
use crate::collector::{CollectFailure, RemoteFailure};
use crate::commands::{CommandHandler, Invocation};
use crate::context::OpsContext;
use crate::outcome::CommandOutcome;
use crate::present;

/// Describes one member by name or id: resolve it against the membership
/// snapshot, ask the member itself for its runtime information, overlay the
/// registry identity and render the sectioned report.
#[derive(Debug, Clone, Default)]
pub struct DescribeMemberCommand;

#[async_trait]
impl CommandHandler for DescribeMemberCommand {
    async fn run(
        &self,
        ctx: &OpsContext,
        invocation: &Invocation,
    ) -> anyhow::Result<CommandOutcome> {
        let name_or_id = match invocation {
            Invocation::DescribeMember { name_or_id } => name_or_id.as_str(),
            invocation => bail!("describe-member invoked with {:?}", invocation),
        };
        let member = match ctx.resolver().resolve(name_or_id)? {
            Some(member) => member,
            None => {
                return Ok(CommandOutcome::info(format!(
                    "Member {} not found.",
                    name_or_id
                )))
            }
        };
        let collector = ctx.collector();
        let collected = match ctx.cancel.clone() {
            Some(mut signal) => collector.collect_with_cancel(&member, &mut signal).await,
            None => collector.collect(&member).await,
        };
        match collected {
            Ok(remote) => {
                let info = aggregate(&member, remote);
                Ok(CommandOutcome::Sectioned(present::member_report(&info)))
            }
            Err(CollectFailure::Remote(RemoteFailure::MalformedReply { .. })) => {
                Ok(CommandOutcome::info(format!(
                    "Information for member {} could not be retrieved.",
                    name_or_id
                )))
            }
            Err(CollectFailure::Remote(failure)) => Ok(CommandOutcome::error(failure.to_string())),
            Err(CollectFailure::Cancelled) => Ok(CommandOutcome::info(format!(
                "Describing member {} was cancelled before completion.",
                name_or_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::time::Duration;

    use grid_core::cluster::ClusterHandle;
    use grid_core::info::CacheServerInfo;
    use grid_core::member::{Member, MemberId};
    use grid_core::node::NodeState;
    use grid_remote::agent::InfoAgent;
    use grid_remote::in_process::InProcessChannel;
    use grid_remote::task::TaskEnvelope;

    use crate::cancel::cancel_pair;
    use crate::commands::{CommandRegistry, Invocation};
    use crate::context::OpsContext;
    use crate::outcome::CommandOutcome;

    fn server_state() -> NodeState {
        NodeState::builder()
            .name("server-a".to_string())
            .id(MemberId::new("m1"))
            .host("host-1".to_string())
            .process_id(4201)
            .groups(vec!["alpha".to_string()])
            .hosted_regions(BTreeSet::from(["orders".to_string()]))
            .heap_used_mb(128.0)
            .heap_max_mb(1024.0)
            .working_dir("/var/data/server-a".to_string())
            .log_file("/var/log/server-a.log".to_string())
            .locators("host-0[10334]".to_string())
            .cache_servers(vec![CacheServerInfo::new("host-1", 40404, true)])
            .client_connections(3)
            .build()
    }

    fn cluster_with_agent() -> (ClusterHandle, Arc<InProcessChannel>) {
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new(
            "server-a",
            MemberId::new("m1"),
            "host-1",
            4201,
        ));
        let channel = Arc::new(InProcessChannel::new());
        let mailbox = channel.register(MemberId::new("m1"), 16);
        InfoAgent::new(server_state()).spawn(mailbox);
        (handle, channel)
    }

    fn ctx(handle: &ClusterHandle, channel: &Arc<InProcessChannel>) -> OpsContext {
        OpsContext::new(
            handle.clone(),
            channel.clone(),
            Duration::from_millis(500),
        )
    }

    async fn describe(ctx: &OpsContext, name_or_id: &str) -> CommandOutcome {
        let registry = CommandRegistry::with_defaults(ctx.handle.clone());
        let invocation = Invocation::DescribeMember {
            name_or_id: name_or_id.to_string(),
        };
        registry.execute(ctx, invocation).await
    }

    #[tokio::test]
    async fn test_describe_by_name_renders_full_report() {
        let (handle, channel) = cluster_with_agent();
        match describe(&ctx(&handle, &channel), "server-a").await {
            CommandOutcome::Sectioned(report) => {
                let section = &report.sections()[0];
                assert_eq!(section.value_of("Name"), Some("server-a"));
                assert_eq!(section.value_of("Id"), Some("m1"));
                assert_eq!(section.value_of("Regions"), Some("orders"));
                assert_eq!(section.value_of("Used Heap"), Some("128M"));
                let servers = &report.sections()[1];
                assert_eq!(servers.header(), Some("Cache Server Information"));
                assert_eq!(servers.value_of("Client Connections"), Some("3"));
            }
            other => panic!("expected Sectioned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_by_id() {
        let (handle, channel) = cluster_with_agent();
        assert!(matches!(
            describe(&ctx(&handle, &channel), "m1").await,
            CommandOutcome::Sectioned(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_member_is_informational() {
        let (handle, channel) = cluster_with_agent();
        let outcome = describe(&ctx(&handle, &channel), "nobody").await;
        assert_eq!(outcome, CommandOutcome::info("Member nobody not found."));
        assert!(!outcome.is_error());
    }

    #[tokio::test]
    async fn test_malformed_reply_is_informational() {
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new("server-a", MemberId::new("m1"), "host-1", 4201));
        let channel = Arc::new(InProcessChannel::new());
        let mut mailbox = channel.register(MemberId::new("m1"), 16);
        tokio::spawn(async move {
            while let Some(envelope) = mailbox.recv().await {
                let _ = envelope.reply_to.send(vec![0xba, 0xad]);
            }
        });
        let outcome = describe(&ctx(&handle, &channel), "server-a").await;
        assert_eq!(
            outcome,
            CommandOutcome::info("Information for member server-a could not be retrieved.")
        );
    }

    #[tokio::test]
    async fn test_departed_member_is_an_error_with_the_channel_message() {
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new("server-a", MemberId::new("m1"), "host-1", 4201));
        let channel = Arc::new(InProcessChannel::new());
        let outcome = describe(&ctx(&handle, &channel), "server-a").await;
        match outcome {
            CommandOutcome::Error(message) => {
                assert!(message.contains("server-a(m1)"));
                assert!(message.contains("no endpoint"));
            }
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_silent_member_is_a_timeout_error() {
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new("server-a", MemberId::new("m1"), "host-1", 4201));
        let channel = Arc::new(InProcessChannel::new());
        let mut mailbox = channel.register(MemberId::new("m1"), 16);
        tokio::spawn(async move {
            let mut pending: Vec<TaskEnvelope> = Vec::new();
            while let Some(envelope) = mailbox.recv().await {
                pending.push(envelope);
            }
        });
        let outcome = describe(&ctx(&handle, &channel), "server-a").await;
        match outcome {
            CommandOutcome::Error(message) => assert!(message.contains("did not reply within")),
            other => panic!("expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_cancellation_is_informational() {
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new("server-a", MemberId::new("m1"), "host-1", 4201));
        let channel = Arc::new(InProcessChannel::new());
        let mut mailbox = channel.register(MemberId::new("m1"), 16);
        tokio::spawn(async move {
            let mut pending: Vec<TaskEnvelope> = Vec::new();
            while let Some(envelope) = mailbox.recv().await {
                pending.push(envelope);
            }
        });
        let (cancel, signal) = cancel_pair();
        let ctx = OpsContext::new(handle, channel, Duration::from_secs(5)).with_cancel(signal);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });
        let outcome = describe(&ctx, "server-a").await;
        assert_eq!(
            outcome,
            CommandOutcome::info("Describing member server-a was cancelled before completion.")
        );
        assert!(!outcome.is_error());
    }

    #[tokio::test]
    async fn test_registry_identity_overrides_the_reply() {
        // the registry record for m1 carries a different host and pid than
        // the member reports about itself
        let handle = ClusterHandle::new();
        handle.upsert_member(Member::new(
            "server-a",
            MemberId::new("m1"),
            "registry-host",
            9999,
        ));
        let channel = Arc::new(InProcessChannel::new());
        let mailbox = channel.register(MemberId::new("m1"), 16);
        InfoAgent::new(server_state()).spawn(mailbox);
        match describe(&ctx(&handle, &channel), "server-a").await {
            CommandOutcome::Sectioned(report) => {
                let section = &report.sections()[0];
                assert_eq!(section.value_of("Host"), Some("registry-host"));
                assert_eq!(section.value_of("PID"), Some("9999"));
            }
            other => panic!("expected Sectioned, got {:?}", other),
        }
    }
}
