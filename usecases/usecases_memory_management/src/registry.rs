//! Process Registry
//!
//! Tracks which processes are live and how much each one asked for.
//!
//! The registry is audit metadata only. It never records where a process
//! lives: splits and merges move blocks around, so the engine always locates
//! a process by scanning the partition for its id.

use std::collections::BTreeMap;

use entities_memory_layout::ProcessId;

use crate::allocator::PlacementStrategy;

/// Bookkeeping for one live process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRecord {
    requested: usize,
    strategy: Option<PlacementStrategy>,
}

impl ProcessRecord {
    /// Size originally requested
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Strategy that placed the process; `None` for seeded layouts
    pub fn strategy(&self) -> Option<PlacementStrategy> {
        self.strategy
    }
}

/// Live processes keyed by id, plus the id counter
///
/// Ids start at 1 and are never reused within one registry, even after the
/// process is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRegistry {
    records: BTreeMap<ProcessId, ProcessRecord>,
    next_id: ProcessId,
}

impl ProcessRegistry {
    /// Create an empty registry whose first id is `P1`
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: ProcessId::FIRST,
        }
    }

    /// Id the next call to [`issue`](Self::issue) will hand out
    pub fn next_id(&self) -> ProcessId {
        self.next_id
    }

    /// Record a new process and advance the counter
    pub fn issue(&mut self, requested: usize, strategy: Option<PlacementStrategy>) -> ProcessId {
        let id = self.next_id;
        self.records.insert(id, ProcessRecord { requested, strategy });
        self.next_id = id.next();
        id
    }

    pub fn get(&self, id: ProcessId) -> Option<&ProcessRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.records.contains_key(&id)
    }

    /// Forget a process; its id stays retired
    pub fn remove(&mut self, id: ProcessId) -> Option<ProcessRecord> {
        self.records.remove(&id)
    }

    /// Number of live processes
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Live processes in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, &ProcessRecord)> + '_ {
        self.records.iter().map(|(&id, record)| (id, record))
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
