//! Repository interface for secretariat records and its in-memory implementation.

use std::collections::BTreeMap;

use crate::models::records::Record;

/// Storage operations the secretariat service needs for one record type.
pub trait Repository<T: Record> {
    /// All records, in id order.
    fn list(&self) -> Vec<T>;

    /// Store a new record, assigning its id. Returns the stored copy.
    fn create(&mut self, record: T) -> T;

    fn find_by_id(&self, id: i64) -> Option<T>;

    /// Replace a stored record. Returns false when the id is unknown.
    fn update(&mut self, record: &T) -> bool;

    /// First record matching `predicate`, in id order.
    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.list().into_iter().find(|r| predicate(r))
    }

    /// Every record matching `predicate`, in id order.
    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.list().into_iter().filter(|r| predicate(r)).collect()
    }
}

/// Keeps records in memory with sequential ids starting at 1.
#[derive(Debug, Clone)]
pub struct MemoryRepository<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn create(&mut self, mut record: T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        record.set_id(id);
        self.rows.insert(id, record.clone());
        record
    }

    fn find_by_id(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn update(&mut self, record: &T) -> bool {
        match record.id().and_then(|id| self.rows.get_mut(&id)) {
            Some(slot) => {
                *slot = record.clone();
                true
            }
            None => false,
        }
    }

    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|r| predicate(*r)).cloned()
    }

    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| predicate(*r)).cloned().collect()
    }
}
