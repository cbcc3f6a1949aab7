// ── Generic reactive entity collection ──
//
// Concurrent storage with O(1) id lookups and push-based change
// notification via `watch` channels. Snapshots are immutable `Arc`s,
// replaced wholesale on every mutation -- consumers never see a list
// mutate in place.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// Ordering applied to every rebuilt snapshot, so repeated fetches of
/// unchanged data yield identical snapshots.
type SortFn<T> = fn(&Arc<T>, &Arc<T>) -> std::cmp::Ordering;

/// A reactive collection for a single entity type, keyed by id string.
pub(crate) struct Collection<T: Send + Sync + 'static> {
    by_id: DashMap<String, Arc<T>>,
    sort: SortFn<T>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full sorted snapshot, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Send + Sync + 'static> Collection<T> {
    pub(crate) fn new(sort: SortFn<T>) -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            sort,
            version,
            snapshot,
        }
    }

    /// Insert or update an entity. Returns `true` if the id was new.
    pub(crate) fn upsert(&self, id: String, entity: T) -> bool {
        let is_new = !self.by_id.contains_key(&id);
        self.by_id.insert(id, Arc::new(entity));
        self.rebuild_snapshot();
        self.bump_version();
        is_new
    }

    /// Remove an entity by id. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, id: &str) -> Option<Arc<T>> {
        let removed = self.by_id.remove(id).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    /// Replace the whole collection with a freshly fetched set.
    ///
    /// Upsert-then-prune: incoming entities are inserted first, then ids
    /// absent from the incoming set are dropped. Subscribers see a single
    /// snapshot change and never a transient empty state.
    pub(crate) fn replace_all(&self, items: Vec<(String, T)>) {
        let incoming: std::collections::HashSet<String> =
            items.iter().map(|(id, _)| id.clone()).collect();
        for (id, entity) in items {
            self.by_id.insert(id, Arc::new(entity));
        }
        self.by_id.retain(|id, _| incoming.contains(id));

        self.rebuild_snapshot();
        self.bump_version();
    }

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: &str) -> Option<Arc<T>> {
        self.by_id.get(id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all values into a sorted snapshot and broadcast it.
    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<T>> = self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by(self.sort);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sorted() -> Collection<String> {
        Collection::new(|a, b| a.cmp(b))
    }

    #[test]
    fn upsert_returns_true_for_new_id() {
        let col = sorted();
        assert!(col.upsert("k1".into(), "hello".into()));
        assert!(!col.upsert("k1".into(), "world".into()));
        assert_eq!(*col.get("k1").unwrap(), "world");
    }

    #[test]
    fn remove_drops_entity_and_snapshot_entry() {
        let col = sorted();
        col.upsert("k1".into(), "hello".into());

        let removed = col.remove("k1");
        assert_eq!(*removed.unwrap(), "hello");
        assert!(col.get("k1").is_none());
        assert!(col.snapshot().is_empty());
        assert!(col.remove("k1").is_none());
    }

    #[test]
    fn snapshot_is_sorted() {
        let col = sorted();
        col.upsert("b".into(), "bb".into());
        col.upsert("a".into(), "aa".into());
        col.upsert("c".into(), "cc".into());

        let snap = col.snapshot();
        let values: Vec<&str> = snap.iter().map(|v| v.as_str()).collect();
        assert_eq!(values, ["aa", "bb", "cc"]);
    }

    #[test]
    fn replace_all_prunes_missing_ids() {
        let col = sorted();
        col.upsert("a".into(), "aa".into());
        col.upsert("b".into(), "bb".into());

        col.replace_all(vec![("b".into(), "bb2".into()), ("c".into(), "cc".into())]);

        assert!(col.get("a").is_none());
        assert_eq!(*col.get("b").unwrap(), "bb2");
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn subscribers_see_replacements() {
        let col = sorted();
        let mut rx = col.subscribe();
        assert!(rx.borrow().is_empty());

        col.replace_all(vec![("a".into(), "aa".into())]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn refetching_identical_data_yields_identical_snapshot() {
        let col = sorted();
        let items = || {
            vec![
                ("b".to_owned(), "bb".to_owned()),
                ("a".to_owned(), "aa".to_owned()),
            ]
        };
        col.replace_all(items());
        let first: Vec<String> = col.snapshot().iter().map(|v| (**v).clone()).collect();

        col.replace_all(items());
        let second: Vec<String> = col.snapshot().iter().map(|v| (**v).clone()).collect();
        assert_eq!(first, second);
    }
}
