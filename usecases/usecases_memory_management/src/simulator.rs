//! Partition Allocator
//!
//! The allocation engine: owns the partition and the process registry and
//! implements allocation, deallocation, reset and the derived queries the
//! presentation layer consumes.
//!
//! ## Overview
//!
//! - `allocate` validates the size, asks the chosen strategy for a block,
//!   then either allocates that block in place (exact fit) or splits it
//! - `deallocate` finds the process by scanning, frees its block and
//!   coalesces free neighbours
//! - `initialize` / `initialize_with_gap_pattern` replace the whole state
//!
//! The engine is a plain owned value. Callers get copies of the layout
//! (`FreeExtent`, `AllocatedExtent`, `FragmentationStats`) rather than
//! references into block storage, since every split or merge shifts indices.
//!
//! ## Examples
//!
//! ```rust
//! use usecases_memory_management::{PartitionAllocator, PlacementStrategy};
//!
//! let mut engine = PartitionAllocator::new(1000).unwrap();
//! let pid = engine.allocate(120, PlacementStrategy::FirstFit).unwrap();
//! assert_eq!(engine.locate_owner_at(60).unwrap(), Some(pid));
//! engine.deallocate(pid).unwrap();
//! assert_eq!(engine.fragmentation_stats().free_block_count, 1);
//! ```

use entities_memory_layout::{Block, Partition, ProcessId};
use log::{debug, trace};

use crate::allocator::{AllocationError, PlacementStrategy};
use crate::fragmentation::FragmentationStats;
use crate::registry::ProcessRegistry;

/// A free region, as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeExtent {
    pub start: usize,
    pub size: usize,
}

/// An allocated region and its owner, as reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatedExtent {
    pub process_id: ProcessId,
    pub start: usize,
    pub size: usize,
}

/// Dynamic partitioning engine over a fixed-size address space
#[derive(Debug, Clone)]
pub struct PartitionAllocator {
    partition: Partition,
    registry: ProcessRegistry,
    /// Index chosen by the last successful next-fit allocation
    next_fit_cursor: Option<usize>,
}

impl PartitionAllocator {
    /// Create an engine with one free block spanning `total_size` units
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::InvalidSize` if `total_size` is 0.
    pub fn new(total_size: usize) -> Result<Self, AllocationError> {
        let partition = Partition::new(total_size).map_err(|_| AllocationError::InvalidSize {
            requested: total_size,
            total_size,
        })?;
        Ok(Self {
            partition,
            registry: ProcessRegistry::new(),
            next_fit_cursor: None,
        })
    }

    /// Create an engine seeded with the demonstration gap pattern
    ///
    /// See [`initialize_with_gap_pattern`](Self::initialize_with_gap_pattern).
    pub fn with_gap_pattern(
        total_size: usize,
        gap_sizes: &[usize],
        allocation_size: usize,
    ) -> Result<Self, AllocationError> {
        let mut engine = Self::new(total_size)?;
        engine.initialize_with_gap_pattern(gap_sizes, allocation_size)?;
        Ok(engine)
    }

    /// Reset to a single free block spanning `total_size` units
    ///
    /// Discards every process, restarts ids at `P1` and clears the next-fit
    /// cursor. On error the engine is left untouched.
    pub fn initialize(&mut self, total_size: usize) -> Result<(), AllocationError> {
        *self = Self::new(total_size)?;
        debug!("initialized empty address space of {} units", total_size);
        Ok(())
    }

    /// Reset to alternating allocated segments and free gaps
    ///
    /// For each entry of `gap_sizes` an allocated segment of `allocation_size`
    /// is laid down followed by a free gap of that size; one final allocated
    /// segment closes the pattern and whatever space remains becomes a free
    /// tail. Segments receive fresh ids `P1, P2, ...` in address order.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if `allocation_size` or any gap is 0, or if the pattern
    ///   does not fit in the address space
    /// - `PatternOverflow` if the pattern's total size overflows `usize`
    ///
    /// On error the engine is left untouched.
    pub fn initialize_with_gap_pattern(
        &mut self,
        gap_sizes: &[usize],
        allocation_size: usize,
    ) -> Result<(), AllocationError> {
        let total_size = self.partition.total_size();
        let invalid = |requested| AllocationError::InvalidSize { requested, total_size };

        if allocation_size == 0 {
            return Err(invalid(0));
        }
        if gap_sizes.contains(&0) {
            return Err(invalid(0));
        }
        let required = gap_sizes
            .iter()
            .try_fold(allocation_size, |acc, &gap| {
                acc.checked_add(gap)?.checked_add(allocation_size)
            })
            .ok_or_else(|| AllocationError::PatternOverflow { total_size })?;
        if required > total_size {
            return Err(invalid(required));
        }

        let mut registry = ProcessRegistry::new();
        let mut blocks = Vec::with_capacity(2 * gap_sizes.len() + 2);
        let mut position = 0;

        for &gap in gap_sizes {
            let owner = registry.issue(allocation_size, None);
            blocks.push(Block::allocated(position, allocation_size, owner));
            position += allocation_size;
            blocks.push(Block::free(position, gap));
            position += gap;
        }
        let owner = registry.issue(allocation_size, None);
        blocks.push(Block::allocated(position, allocation_size, owner));
        position += allocation_size;

        if position < total_size {
            blocks.push(Block::free(position, total_size - position));
        }

        self.partition = Partition::from_blocks(total_size, blocks)?;
        self.registry = registry;
        self.next_fit_cursor = None;
        debug!(
            "seeded {} processes of {} units around {} gaps",
            self.registry.len(),
            allocation_size,
            gap_sizes.len()
        );
        Ok(())
    }

    /// Place a request of `size` units using `strategy`
    ///
    /// # Errors
    ///
    /// - `InvalidSize` if `size` is 0 or exceeds the address space
    /// - `NoSpace` if no free block is large enough
    ///
    /// A failed allocation consumes no id and leaves the next-fit cursor alone.
    pub fn allocate(&mut self, size: usize, strategy: PlacementStrategy) -> Result<ProcessId, AllocationError> {
        let total_size = self.partition.total_size();
        if size == 0 || size > total_size {
            return Err(AllocationError::InvalidSize {
                requested: size,
                total_size,
            });
        }

        let Some(index) = strategy.select(self.partition.blocks(), size, self.next_fit_cursor) else {
            debug!("{}: no block for {} units", strategy, size);
            return Err(AllocationError::NoSpace {
                requested: size,
                strategy,
            });
        };
        trace!("{}: chose block {} for {} units", strategy, index, size);

        let owner = self.registry.next_id();
        let block_size = self.partition.get(index).map_or(0, Block::size);
        if block_size == size {
            self.partition.assign(index, owner)?;
        } else {
            self.partition.split(index, size, owner)?;
        }
        let issued = self.registry.issue(size, Some(strategy));
        debug_assert_eq!(issued, owner);

        if strategy == PlacementStrategy::NextFit {
            self.next_fit_cursor = Some(index);
        }

        debug!("allocated {} units to {} at block {} ({})", size, owner, index, strategy);
        Ok(owner)
    }

    /// Release the block held by `process_id` and merge free neighbours
    ///
    /// # Errors
    ///
    /// Returns `ProcessNotFound` if the id is unknown or already released.
    pub fn deallocate(&mut self, process_id: ProcessId) -> Result<(), AllocationError> {
        if !self.registry.contains(process_id) {
            return Err(AllocationError::ProcessNotFound(process_id));
        }
        let index = self
            .partition
            .position_of(process_id)
            .ok_or(AllocationError::ProcessNotFound(process_id))?;

        self.partition.release(index)?;
        self.registry.remove(process_id);
        let merges = self.partition.coalesce();

        debug!("released {} (merged {} free neighbours)", process_id, merges);
        Ok(())
    }

    /// Free regions in address order
    pub fn free_blocks(&self) -> Vec<FreeExtent> {
        self.partition
            .free_blocks()
            .map(|block| FreeExtent {
                start: block.start(),
                size: block.size(),
            })
            .collect()
    }

    /// Allocated regions in address order
    pub fn allocated_blocks(&self) -> Vec<AllocatedExtent> {
        self.partition
            .blocks()
            .iter()
            .filter_map(|block| {
                block.owner().map(|process_id| AllocatedExtent {
                    process_id,
                    start: block.start(),
                    size: block.size(),
                })
            })
            .collect()
    }

    /// Sum of free block sizes
    pub fn total_free(&self) -> usize {
        self.partition.free_blocks().map(Block::size).sum()
    }

    /// Number of free blocks
    pub fn free_block_count(&self) -> usize {
        self.partition.free_blocks().count()
    }

    /// Allocated space: `total_size - total_free`
    pub fn allocated_total(&self) -> usize {
        self.partition.total_size() - self.total_free()
    }

    pub fn fragmentation_stats(&self) -> FragmentationStats {
        FragmentationStats::measure(&self.partition)
    }

    /// Process owning `offset`, or `None` if the offset is in free space
    ///
    /// # Errors
    ///
    /// Returns `InvalidOffset` if `offset` is not below the address-space size.
    pub fn locate_owner_at(&self, offset: usize) -> Result<Option<ProcessId>, AllocationError> {
        let index = self
            .partition
            .block_containing(offset)
            .ok_or(AllocationError::InvalidOffset {
                offset,
                total_size: self.partition.total_size(),
            })?;
        Ok(self.partition.get(index).and_then(Block::owner))
    }

    pub fn total_size(&self) -> usize {
        self.partition.total_size()
    }

    /// Read-only view of the current layout
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Index chosen by the last successful next-fit allocation
    pub fn next_fit_cursor(&self) -> Option<usize> {
        self.next_fit_cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fit_allocates_in_place() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let pid = engine.allocate(100, PlacementStrategy::FirstFit).unwrap();
        assert_eq!(engine.partition().len(), 1);
        assert_eq!(engine.partition().blocks()[0], Block::allocated(0, 100, pid));
    }

    #[test]
    fn test_split_leaves_free_remainder() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let pid = engine.allocate(30, PlacementStrategy::BestFit).unwrap();
        assert_eq!(
            engine.partition().blocks(),
            &[Block::allocated(0, 30, pid), Block::free(30, 70)]
        );
    }

    #[test]
    fn test_invalid_sizes() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        assert_eq!(
            engine.allocate(0, PlacementStrategy::FirstFit),
            Err(AllocationError::InvalidSize { requested: 0, total_size: 100 })
        );
        assert_eq!(
            engine.allocate(101, PlacementStrategy::WorstFit),
            Err(AllocationError::InvalidSize { requested: 101, total_size: 100 })
        );
        assert_eq!(engine.registry().next_id(), ProcessId::FIRST);
    }

    #[test]
    fn test_failed_allocation_consumes_nothing() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        engine.allocate(100, PlacementStrategy::FirstFit).unwrap();
        assert_eq!(
            engine.allocate(1, PlacementStrategy::NextFit),
            Err(AllocationError::NoSpace { requested: 1, strategy: PlacementStrategy::NextFit })
        );
        assert_eq!(engine.registry().next_id(), ProcessId::new(2));
        assert_eq!(engine.next_fit_cursor(), None);
    }

    #[test]
    fn test_deallocate_unknown() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let pid = engine.allocate(10, PlacementStrategy::FirstFit).unwrap();
        engine.deallocate(pid).unwrap();
        assert_eq!(engine.deallocate(pid), Err(AllocationError::ProcessNotFound(pid)));
        assert_eq!(
            engine.deallocate(ProcessId::new(42)),
            Err(AllocationError::ProcessNotFound(ProcessId::new(42)))
        );
    }

    #[test]
    fn test_locate_owner_bounds() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let pid = engine.allocate(10, PlacementStrategy::FirstFit).unwrap();
        assert_eq!(engine.locate_owner_at(9), Ok(Some(pid)));
        assert_eq!(engine.locate_owner_at(10), Ok(None));
        assert_eq!(
            engine.locate_owner_at(100),
            Err(AllocationError::InvalidOffset { offset: 100, total_size: 100 })
        );
    }

    #[test]
    fn test_new_rejects_empty_space() {
        assert_eq!(
            PartitionAllocator::new(0).unwrap_err(),
            AllocationError::InvalidSize { requested: 0, total_size: 0 }
        );
    }

    #[test]
    fn test_gap_pattern_rejects_overflowing_layout() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let before = engine.partition().clone();
        assert_eq!(
            engine.initialize_with_gap_pattern(&[30, 30], 20),
            Err(AllocationError::InvalidSize { requested: 120, total_size: 100 })
        );
        assert_eq!(
            engine.initialize_with_gap_pattern(&[10, 0], 20),
            Err(AllocationError::InvalidSize { requested: 0, total_size: 100 })
        );
        assert_eq!(engine.partition(), &before);
    }

    #[test]
    fn test_gap_pattern_size_overflow() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        let before = engine.partition().clone();
        assert_eq!(
            engine.initialize_with_gap_pattern(&[usize::MAX / 2, usize::MAX / 2], 10),
            Err(AllocationError::PatternOverflow { total_size: 100 })
        );
        assert_eq!(engine.partition(), &before);
        assert!(engine.allocate(10, PlacementStrategy::FirstFit).is_ok());
    }

    #[test]
    fn test_gap_pattern_exact_fill_has_no_tail() {
        let engine = PartitionAllocator::with_gap_pattern(100, &[20], 40).unwrap();
        assert_eq!(engine.free_blocks(), vec![FreeExtent { start: 40, size: 20 }]);
        assert_eq!(engine.allocated_blocks().len(), 2);
        assert!(engine.partition().check_invariants().is_ok());
    }

    #[test]
    fn test_derived_totals() {
        let mut engine = PartitionAllocator::new(100).unwrap();
        engine.allocate(30, PlacementStrategy::FirstFit).unwrap();
        assert_eq!(engine.total_free(), 70);
        assert_eq!(engine.free_block_count(), 1);
        assert_eq!(engine.allocated_total(), 30);
    }
}
