//! Fragmentation Accounting
//!
//! Derived statistics over the current partition. Everything here is computed
//! on demand from the block list and never cached, so it cannot drift from
//! the layout it describes.

use entities_memory_layout::Partition;

/// Snapshot of free-space statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentationStats {
    /// Size of the address space
    pub total_size: usize,
    /// Sum of free block sizes
    pub total_free: usize,
    /// Number of free blocks
    pub free_block_count: usize,
    /// `total_size - total_free`
    pub allocated_total: usize,
    /// Size of the largest free block (0 when nothing is free)
    pub largest_free: usize,
}

impl FragmentationStats {
    /// Measure a partition
    pub fn measure(partition: &Partition) -> Self {
        let (total_free, free_block_count, largest_free) = partition
            .free_blocks()
            .fold((0, 0, 0), |(sum, count, largest), block| {
                (sum + block.size(), count + 1, largest.max(block.size()))
            });

        Self {
            total_size: partition.total_size(),
            total_free,
            free_block_count,
            allocated_total: partition.total_size() - total_free,
            largest_free,
        }
    }

    /// Share of free space unusable for a single request of the largest
    /// possible size: `1 - largest_free / total_free`
    ///
    /// 0.0 means all free space is one block (or nothing is free); values
    /// approaching 1.0 mean free space is scattered in small pieces.
    pub fn external_fragmentation(&self) -> f64 {
        if self.total_free == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.total_free as f64
    }

    /// Fraction of the address space currently allocated
    pub fn utilization(&self) -> f64 {
        self.allocated_total as f64 / self.total_size as f64
    }
}
