use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ahash::HashMap;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{Error, Result};
use crate::member::{Member, MemberId};

/// Shared view of the running cluster: the current membership plus a closed
/// flag. Obtained once by the embedder and passed explicitly into every
/// component that needs cluster access. The inspection subsystem only reads
/// it; the write API is the ingestion boundary for whatever membership layer
/// the embedder runs.
#[derive(Debug, Clone)]
pub struct ClusterHandle {
    inner: Arc<Inner>,
}

#[derive(Debug)]
pub struct Inner {
    members: RwLock<HashMap<MemberId, Member>>,
    closed: AtomicBool,
}

impl Deref for ClusterHandle {
    type Target = Inner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ClusterHandle {
    pub fn new() -> Self {
        let inner = Inner {
            members: RwLock::new(HashMap::default()),
            closed: AtomicBool::new(false),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn members(&self) -> RwLockReadGuard<HashMap<MemberId, Member>> {
        self.members.read()
    }

    pub fn install_snapshot(&self, members: impl IntoIterator<Item = Member>) {
        let mut current = self.members.write();
        current.clear();
        for member in members {
            current.insert(member.id.clone(), member);
        }
    }

    pub fn upsert_member(&self, member: Member) {
        self.members.write().insert(member.id.clone(), member);
    }

    pub fn remove_member(&self, id: &MemberId) -> Option<Member> {
        self.members.write().remove(id)
    }

    /// Marks the handle closed. Irreversible, the embedder calls this when
    /// the underlying cluster connection goes away.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    pub fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::ClusterClosed)
        } else {
            Ok(())
        }
    }
}

impl Default for ClusterHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::cluster::ClusterHandle;
    use crate::member::{Member, MemberId};

    fn member(name: &str, id: &str) -> Member {
        Member::new(name, MemberId::new(id), "localhost", 1)
    }

    #[test]
    fn test_snapshot_replaces_membership() {
        let handle = ClusterHandle::new();
        handle.install_snapshot(vec![member("server-a", "m1"), member("server-b", "m2")]);
        assert_eq!(handle.members().len(), 2);
        handle.install_snapshot(vec![member("server-c", "m3")]);
        let members = handle.members();
        assert_eq!(members.len(), 1);
        assert!(members.contains_key(&MemberId::new("m3")));
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let handle = ClusterHandle::new();
        handle.upsert_member(member("server-a", "m1"));
        handle.upsert_member(member("server-a-renamed", "m1"));
        let members = handle.members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[&MemberId::new("m1")].name, "server-a-renamed");
    }

    #[test]
    fn test_close_is_sticky() {
        let handle = ClusterHandle::new();
        assert!(handle.ensure_open().is_ok());
        handle.close();
        assert!(handle.is_closed());
        assert!(handle.ensure_open().is_err());
        let clone = handle.clone();
        assert!(clone.is_closed());
    }

    #[test]
    fn test_remove_member() {
        let handle = ClusterHandle::new();
        handle.upsert_member(member("server-a", "m1"));
        let removed = handle.remove_member(&MemberId::new("m1"));
        assert_eq!(removed.map(|m| m.name), Some("server-a".to_string()));
        assert!(handle.members().is_empty());
    }
}
