use std::time::Duration;

use clap::Parser;

use grid_core::ext::init_logger_with_filter;
use grid_ops::commands::{CommandRegistry, Invocation};
use grid_ops::context::OpsContext;
use grid_playground::common::build_demo_cluster;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "3")]
    servers: usize,
    #[arg(short, long)]
    group: Option<String>,
    /// Name or id to describe; all members when absent.
    #[arg(short, long)]
    member: Option<String>,
    /// Reply timeout override; the embedded config default when absent.
    #[arg(short, long)]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args { servers, group, member, timeout_ms } = Args::parse();
    init_logger_with_filter("grid=debug");
    let (handle, channel, config) = build_demo_cluster(servers)?;
    let registry = CommandRegistry::with_defaults(handle.clone());
    let ctx = match timeout_ms {
        Some(ms) => OpsContext::new(handle.clone(), channel, Duration::from_millis(ms)),
        None => OpsContext::from_config(handle.clone(), channel, &config),
    };
    let listing = registry.execute(&ctx, Invocation::ListMembers { group }).await;
    println!("{}", listing);
    match member {
        Some(name_or_id) => {
            let outcome = registry
                .execute(&ctx, Invocation::DescribeMember { name_or_id })
                .await;
            println!("{}", outcome);
        }
        None => {
            for member in ctx.registry().all_members()?.iter() {
                let outcome = registry
                    .execute(
                        &ctx,
                        Invocation::DescribeMember {
                            name_or_id: member.name.clone(),
                        },
                    )
                    .await;
                println!("{}", outcome);
            }
        }
    }
    handle.close();
    Ok(())
}
