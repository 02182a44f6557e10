use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use grid_core::cluster::ClusterHandle;
use grid_core::ext::init_logger_with_filter;
use grid_core::member::{Member, MemberId};
use grid_ops::cancel::cancel_pair;
use grid_ops::commands::{CommandRegistry, Invocation};
use grid_ops::context::OpsContext;
use grid_remote::in_process::InProcessChannel;

/// Describes a member whose agent holds the request without answering, then
/// interrupts the wait. The command ends in the cancelled outcome instead of
/// sitting out the full reply timeout.
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "250")]
    interrupt_after_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args { interrupt_after_ms } = Args::parse();
    init_logger_with_filter("grid=debug");
    let handle = ClusterHandle::new();
    let id = MemberId::new("demo-host(server-0:4201)<v1>:41000");
    handle.upsert_member(Member::new("server-0", id.clone(), "demo-host", 4201));
    let channel = Arc::new(InProcessChannel::new());
    let mut mailbox = channel.register(id, 16);
    tokio::spawn(async move {
        let mut pending = Vec::new();
        while let Some(envelope) = mailbox.recv().await {
            info!("holding a request without answering it");
            pending.push(envelope);
        }
    });
    let (cancel, signal) = cancel_pair();
    let ctx = OpsContext::new(handle.clone(), channel, Duration::from_secs(30)).with_cancel(signal);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(interrupt_after_ms)).await;
        info!("interrupting the pending describe");
        cancel.cancel();
    });
    let registry = CommandRegistry::with_defaults(handle.clone());
    let outcome = registry
        .execute(
            &ctx,
            Invocation::DescribeMember {
                name_or_id: "server-0".to_string(),
            },
        )
        .await;
    println!("{}", outcome);
    Ok(())
}
