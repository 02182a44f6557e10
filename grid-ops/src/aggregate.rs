use grid_core::info::MemberInfo;
use grid_core::member::Member;

/// Merges the registry's identity record with the member's self-reported
/// snapshot. Identity always comes from the resolved [`Member`], so a reply
/// carrying stale or mangled identity can never leak into a report; every
/// other field passes through untouched.
pub fn aggregate(target: &Member, mut remote: MemberInfo) -> MemberInfo {
    remote.name = target.name.clone();
    remote.id = target.id.clone();
    remote.host = target.host.clone();
    remote.process_id = target.process_id;
    remote
}

#[cfg(test)]
mod tests {
    use grid_core::info::MemberInfo;
    use grid_core::member::{Member, MemberId};

    use crate::aggregate::aggregate;

    #[test]
    fn test_identity_comes_from_the_registry() {
        let target = Member::new("server-a", MemberId::new("m1"), "host-1", 4201);
        let remote = MemberInfo::builder()
            .name("something-stale".to_string())
            .id(MemberId::new("m9"))
            .host("elsewhere".to_string())
            .process_id(1)
            .working_dir("/var/data/server-a".to_string())
            .heap_used_mb(128.0)
            .build();
        let merged = aggregate(&target, remote);
        assert_eq!(merged.name, "server-a");
        assert_eq!(merged.id, MemberId::new("m1"));
        assert_eq!(merged.host, "host-1");
        assert_eq!(merged.process_id, 4201);
        assert_eq!(merged.working_dir, "/var/data/server-a");
        assert_eq!(merged.heap_used_mb, 128.0);
    }
}
