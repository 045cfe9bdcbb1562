//! Primary record table
//!
//! Composite key → serialized record bytes. The table has no defined
//! iteration order; Natural listing snapshots a namespace's keys as-is.

use rustc_hash::FxHashMap;

/// Composite key → record bytes
#[derive(Debug, Default)]
pub struct RecordTable {
    data: FxHashMap<String, Vec<u8>>,
}

impl RecordTable {
    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Stored bytes for `key`
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Vec<u8>> {
        self.data.get(key)
    }

    /// Check if a key exists
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Store `value` under `key`, replacing any previous bytes
    #[inline]
    pub fn put(&mut self, key: String, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    /// Remove `key`, returning its bytes if present
    #[inline]
    pub fn delete(&mut self, key: &str) -> Option<Vec<u8>> {
        self.data.remove(key)
    }

    /// Keys starting with `prefix`, in unspecified order
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.data
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut table = RecordTable::with_capacity(4);
        table.put("/ns/a".to_string(), b"one".to_vec());
        assert_eq!(table.get("/ns/a").unwrap(), b"one");
        assert!(table.get("/ns/b").is_none());
    }

    #[test]
    fn test_overwrite() {
        let mut table = RecordTable::default();
        table.put("/ns/a".to_string(), b"1".to_vec());
        table.put("/ns/a".to_string(), b"2".to_vec());
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("/ns/a").unwrap(), b"2");
    }

    #[test]
    fn test_delete() {
        let mut table = RecordTable::default();
        table.put("/ns/a".to_string(), b"1".to_vec());
        assert_eq!(table.delete("/ns/a"), Some(b"1".to_vec()));
        assert!(table.delete("/ns/a").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_contains_and_prefix_keys() {
        let mut table = RecordTable::default();
        table.put("/a/1".to_string(), vec![]);
        table.put("/a/2".to_string(), vec![]);
        table.put("/ab/1".to_string(), vec![]);
        table.put("/b/1".to_string(), vec![]);
        assert!(table.contains("/a/1"));
        assert!(!table.contains("/c/1"));

        let mut keys = table.keys_with_prefix("/a/");
        keys.sort();
        assert_eq!(keys, vec!["/a/1", "/a/2"]);
        assert!(table.keys_with_prefix("/c/").is_empty());
    }
}
