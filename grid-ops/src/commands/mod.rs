use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use ahash::HashMap;
use async_trait::async_trait;
use tracing::{debug, error};

use grid_core::cluster::ClusterHandle;

use crate::commands::describe_member::DescribeMemberCommand;
use crate::commands::list_members::ListMembersCommand;
use crate::context::OpsContext;
use crate::outcome::CommandOutcome;

pub mod describe_member;
pub mod list_members;

pub const LIST_MEMBERS: &str = "list-members";
pub const DESCRIBE_MEMBER: &str = "describe-member";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Resource {
    Cluster,
    Data,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    Read,
    Write,
    Manage,
}

/// Permission a command declares at registration and the access-control
/// policy is consulted with on every dispatch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ResourcePermission {
    pub resource: Resource,
    pub operation: Operation,
}

impl ResourcePermission {
    pub const CLUSTER_READ: ResourcePermission = ResourcePermission {
        resource: Resource::Cluster,
        operation: Operation::Read,
    };
}

impl Display for ResourcePermission {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let resource = match self.resource {
            Resource::Cluster => "cluster",
            Resource::Data => "data",
        };
        let operation = match self.operation {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::Manage => "manage",
        };
        write!(f, "{}:{}", resource, operation)
    }
}

/// Session-liveness gate consulted before every dispatch. Kept separate from
/// access control; the two answers mean different things to an operator.
pub trait Availability: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Availability tied to the cluster handle: commands stay available exactly
/// as long as the handle is open.
#[derive(Debug, Clone)]
pub struct ConnectedWhileOpen {
    handle: ClusterHandle,
}

impl ConnectedWhileOpen {
    pub fn new(handle: ClusterHandle) -> Self {
        Self { handle }
    }
}

impl Availability for ConnectedWhileOpen {
    fn is_available(&self) -> bool {
        !self.handle.is_closed()
    }
}

/// Access decision for one dispatch. Enforcement policy belongs to the
/// embedder; denials surface as error outcomes carrying the policy's
/// message.
pub trait AccessControl: Send + Sync {
    fn check(&self, permission: &ResourcePermission) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct AllowAll;

impl AccessControl for AllowAll {
    fn check(&self, _permission: &ResourcePermission) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A parsed command line; parsing itself belongs to the embedding shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    ListMembers { group: Option<String> },
    DescribeMember { name_or_id: String },
}

impl Invocation {
    pub fn command_name(&self) -> &'static str {
        match self {
            Invocation::ListMembers { .. } => LIST_MEMBERS,
            Invocation::DescribeMember { .. } => DESCRIBE_MEMBER,
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, ctx: &OpsContext, invocation: &Invocation)
        -> anyhow::Result<CommandOutcome>;
}

struct CommandEntry {
    permission: ResourcePermission,
    handler: Arc<dyn CommandHandler>,
}

/// Explicit command table: name to permission and handler. Dispatch checks
/// availability, then access, then runs the handler; a handler error is
/// wrapped into an error outcome so nothing escapes the boundary.
pub struct CommandRegistry {
    availability: Arc<dyn Availability>,
    access: Arc<dyn AccessControl>,
    entries: HashMap<&'static str, CommandEntry>,
}

impl Debug for CommandRegistry {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let commands = self.entries.keys().collect::<Vec<_>>();
        f.debug_struct("CommandRegistry")
            .field("commands", &commands)
            .finish_non_exhaustive()
    }
}

impl CommandRegistry {
    pub fn new(availability: Arc<dyn Availability>, access: Arc<dyn AccessControl>) -> Self {
        Self {
            availability,
            access,
            entries: HashMap::default(),
        }
    }

    /// Registry with both built-in commands, availability tied to the handle
    /// and an allow-everything access policy.
    pub fn with_defaults(handle: ClusterHandle) -> Self {
        let mut registry = Self::new(Arc::new(ConnectedWhileOpen::new(handle)), Arc::new(AllowAll));
        registry.register(
            LIST_MEMBERS,
            ResourcePermission::CLUSTER_READ,
            Arc::new(ListMembersCommand),
        );
        registry.register(
            DESCRIBE_MEMBER,
            ResourcePermission::CLUSTER_READ,
            Arc::new(DescribeMemberCommand),
        );
        registry
    }

    pub fn register(
        &mut self,
        name: &'static str,
        permission: ResourcePermission,
        handler: Arc<dyn CommandHandler>,
    ) {
        debug!("command {} registered, requires {}", name, permission);
        self.entries.insert(name, CommandEntry { permission, handler });
    }

    pub fn permission_of(&self, name: &str) -> Option<ResourcePermission> {
        self.entries.get(name).map(|entry| entry.permission)
    }

    pub async fn execute(&self, ctx: &OpsContext, invocation: Invocation) -> CommandOutcome {
        let name = invocation.command_name();
        let entry = match self.entries.get(name) {
            Some(entry) => entry,
            None => return CommandOutcome::error(format!("unknown command {}", name)),
        };
        if !self.availability.is_available() {
            return CommandOutcome::Unavailable(format!(
                "Command {} is not currently available.",
                name
            ));
        }
        if let Err(denial) = self.access.check(&entry.permission) {
            return CommandOutcome::error(denial.to_string());
        }
        match entry.handler.run(ctx, &invocation).await {
            Ok(outcome) => outcome,
            Err(failure) => {
                error!("command {} failed: {:?}", name, failure);
                CommandOutcome::error(failure.to_string())
            }
        }
    }
}
