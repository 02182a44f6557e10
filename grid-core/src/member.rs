use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity record of one cluster participant, as carried in the membership
/// snapshot. Created and retired by the membership layer; inspection only
/// ever reads it. The name is unique among live members, the id is unique
/// across the cluster's whole lifetime.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Member {
    pub name: String,
    pub id: MemberId,
    pub host: String,
    pub process_id: u32,
    pub groups: HashSet<String>,
}

impl Member {
    pub fn new(
        name: impl Into<String>,
        id: MemberId,
        host: impl Into<String>,
        process_id: u32,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            host: host.into(),
            process_id,
            groups: HashSet::new(),
        }
    }

    pub fn new_with_groups(
        name: impl Into<String>,
        id: MemberId,
        host: impl Into<String>,
        process_id: u32,
        groups: HashSet<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id,
            host: host.into(),
            process_id,
            groups,
        }
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }

    /// Total order over the member id, lexicographic on the full id string.
    /// Every place members are listed or rendered sorts with this comparator,
    /// so the same membership always comes out in the same order.
    pub fn id_order(a: &Member, b: &Member) -> Ordering {
        a.id.cmp(&b.id)
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::member::{Member, MemberId};

    fn member(name: &str, id: &str) -> Member {
        Member::new(name, MemberId::new(id), "localhost", 1)
    }

    #[test]
    fn test_id_order() {
        let mut members = vec![
            member("server-c", "m3"),
            member("server-a", "m1"),
            member("server-b", "m2"),
        ];
        members.sort_by(Member::id_order);
        let ids = members.iter().map(|m| m.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_id_order_ignores_name() {
        let a = member("zzz", "m1");
        let b = member("aaa", "m2");
        assert_eq!(Member::id_order(&a, &b), std::cmp::Ordering::Less);
    }

    #[test]
    fn test_has_group() {
        let groups = HashSet::from(["alpha".to_string()]);
        let m = Member::new_with_groups("server-a", MemberId::new("m1"), "localhost", 1, groups);
        assert!(m.has_group("alpha"));
        assert!(!m.has_group("beta"));
        assert!(!member("server-b", "m2").has_group("alpha"));
    }

    #[test]
    fn test_display() {
        let m = member("server-a", "m1");
        assert_eq!(m.to_string(), "server-a(m1)");
    }
}
