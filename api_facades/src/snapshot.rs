//! Session Snapshots
//!
//! Owned copies of everything a front end needs to redraw: the free list,
//! the allocated list, the statistics and the active strategy.

use std::fmt;

use usecases_memory_management::{AllocatedExtent, FragmentationStats, FreeExtent, PlacementStrategy};

/// Point-in-time view of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub strategy: PlacementStrategy,
    pub free: Vec<FreeExtent>,
    pub allocated: Vec<AllocatedExtent>,
    pub stats: FragmentationStats,
}

impl SessionSnapshot {
    /// One-line statistics summary
    pub fn summary(&self) -> Summary {
        Summary(self.stats)
    }
}

/// Statistics line: `total | allocated | free | free blocks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary(pub FragmentationStats);

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.0;
        write!(
            f,
            "total: {} | allocated: {} | free: {} | free blocks: {}",
            stats.total_size, stats.allocated_total, stats.total_free, stats.free_block_count
        )
    }
}
