use std::fmt::{Display, Formatter};

use itertools::Itertools;

use grid_core::cluster::ClusterHandle;
use grid_core::member::Member;

/// Result of one listing query: members unique by id, sorted with
/// [`Member::id_order`], so repeated queries over an unchanged membership
/// always produce the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSet {
    members: Vec<Member>,
}

impl MemberSet {
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        let mut members = members.into_iter().collect::<Vec<_>>();
        members.sort_by(Member::id_order);
        members.dedup_by(|a, b| a.id == b.id);
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }
}

impl Display for MemberSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}]", self.members.iter().join(", "))
    }
}

/// Read-only view over the current distributed membership. Listing never
/// touches the network; everything is answered from the handle's snapshot.
#[derive(Debug, Clone)]
pub struct MemberRegistry {
    handle: ClusterHandle,
}

impl MemberRegistry {
    pub fn new(handle: ClusterHandle) -> Self {
        Self { handle }
    }

    pub fn all_members(&self) -> anyhow::Result<MemberSet> {
        self.handle.ensure_open()?;
        let members = self.handle.members().values().cloned().collect::<Vec<_>>();
        Ok(MemberSet::new(members))
    }

    /// Members belonging to the given group. An unknown group is an empty
    /// set, not an error.
    pub fn members_in_group(&self, group: &str) -> anyhow::Result<MemberSet> {
        self.handle.ensure_open()?;
        let members = self
            .handle
            .members()
            .values()
            .filter(|m| m.has_group(group))
            .cloned()
            .collect::<Vec<_>>();
        Ok(MemberSet::new(members))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use grid_core::cluster::ClusterHandle;
    use grid_core::member::{Member, MemberId};

    use crate::registry::{MemberRegistry, MemberSet};

    fn member(name: &str, id: &str, groups: &[&str]) -> Member {
        let groups = groups.iter().map(|g| g.to_string()).collect::<HashSet<_>>();
        Member::new_with_groups(name, MemberId::new(id), "localhost", 1, groups)
    }

    fn handle_with_members() -> ClusterHandle {
        let handle = ClusterHandle::new();
        handle.install_snapshot(vec![
            member("server-c", "m3", &["beta"]),
            member("server-a", "m1", &["alpha"]),
            member("server-b", "m2", &["alpha", "beta"]),
        ]);
        handle
    }

    #[test]
    fn test_all_members_ordered_by_id() -> anyhow::Result<()> {
        let registry = MemberRegistry::new(handle_with_members());
        let members = registry.all_members()?;
        let ids = members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        Ok(())
    }

    #[test]
    fn test_listing_is_deterministic() -> anyhow::Result<()> {
        let registry = MemberRegistry::new(handle_with_members());
        let first = registry.all_members()?;
        let second = registry.all_members()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_members_in_group() -> anyhow::Result<()> {
        let registry = MemberRegistry::new(handle_with_members());
        let members = registry.members_in_group("alpha")?;
        let ids = members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["m1", "m2"]);
        Ok(())
    }

    #[test]
    fn test_unknown_group_is_empty() -> anyhow::Result<()> {
        let registry = MemberRegistry::new(handle_with_members());
        let members = registry.members_in_group("no-such-group")?;
        assert!(members.is_empty());
        Ok(())
    }

    #[test]
    fn test_closed_handle_is_an_error() {
        let handle = handle_with_members();
        handle.close();
        let registry = MemberRegistry::new(handle);
        assert!(registry.all_members().is_err());
        assert!(registry.members_in_group("alpha").is_err());
    }

    #[test]
    fn test_member_set_dedups_by_id() {
        let set = MemberSet::new(vec![
            member("server-a", "m1", &[]),
            member("server-a-stale", "m1", &[]),
            member("server-b", "m2", &[]),
        ]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_member_set_display() {
        let set = MemberSet::new(vec![member("server-a", "m1", &[])]);
        assert_eq!(set.to_string(), "[server-a(m1)]");
    }
}
