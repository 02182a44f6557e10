use grid_core::cluster::ClusterHandle;
use grid_core::member::Member;

/// Maps an operator-supplied string to exactly one live member: exact match
/// on the id first, then exact match on the name. No partial or fuzzy
/// matching of any kind.
#[derive(Debug, Clone)]
pub struct MemberResolver {
    handle: ClusterHandle,
}

impl MemberResolver {
    pub fn new(handle: ClusterHandle) -> Self {
        Self { handle }
    }

    /// `None` means no live member carries that id or name; callers report
    /// it to the operator, it is not an error.
    pub fn resolve(&self, name_or_id: &str) -> anyhow::Result<Option<Member>> {
        self.handle.ensure_open()?;
        let members = self.handle.members();
        if let Some(member) = members.values().find(|m| m.id.as_str() == name_or_id) {
            return Ok(Some(member.clone()));
        }
        Ok(members.values().find(|m| m.name == name_or_id).cloned())
    }
}
