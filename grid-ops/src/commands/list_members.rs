use anyhow::bail;
use async_trait::async_trait;
use tracing::warn;

use crate::commands::{CommandHandler, Invocation};
use crate::context::OpsContext;
use crate::outcome::CommandOutcome;
use crate::present;

/// Lists every member of the distributed system, or only the members of one
/// group. An empty result is information, not an error; an empty group
/// argument means no filter at all.
#[derive(Debug, Clone, Default)]
pub struct ListMembersCommand;

#[async_trait]
impl CommandHandler for ListMembersCommand {
    async fn run(
        &self,
        ctx: &OpsContext,
        invocation: &Invocation,
    ) -> anyhow::Result<CommandOutcome> {
        let group = match invocation {
            Invocation::ListMembers { group } => group.as_deref().unwrap_or(""),
            invocation => bail!("list-members invoked with {:?}", invocation),
        };
        let registry = ctx.registry();
        let members = if group.is_empty() {
            registry.all_members()
        } else {
            registry.members_in_group(group)
        };
        match members {
            Ok(members) if members.is_empty() => Ok(CommandOutcome::info("No members found.")),
            Ok(members) => Ok(CommandOutcome::Tabular(present::member_table(&members))),
            Err(failure) => {
                warn!("member listing failed: {:?}", failure);
                Ok(CommandOutcome::error(format!(
                    "Could not fetch the list of members: {}",
                    failure
                )))
            }
        }
    }
}
