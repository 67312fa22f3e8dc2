//! Partition Entity
//!
//! Provides the `Partition` struct: the ordered, gapless sequence of blocks
//! covering a fixed-size address space.
//!
//! ## Overview
//!
//! A partition starts as one free block (or an explicit block list checked
//! against the layout invariants) and is mutated in place by four structural
//! operations:
//!
//! - `split`: carve an allocated prefix out of a larger free block
//! - `assign`: allocate a free block in place (exact fit)
//! - `release`: return an allocated block to the free state
//! - `coalesce`: merge runs of adjacent free blocks
//!
//! Indices handed out by `position_of` or `block_containing` are only valid
//! until the next structural operation. Splits shift every later block right
//! by one, merges shift them left.

use std::collections::HashSet;

use thiserror::Error;

use crate::block::{Block, BlockStatus, ProcessId};

/// Errors reported by partition operations and layout validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The address space has zero size
    #[error("address space must have a positive size")]
    EmptySpace,
    /// Block index does not exist
    #[error("block index {index} out of range ({len} blocks)")]
    IndexOutOfRange { index: usize, len: usize },
    /// Split amount is zero or not smaller than the block
    #[error("cannot split {amount} units off a block of {size}")]
    InvalidSplit { amount: usize, size: usize },
    /// Operation requires a free block
    #[error("block {index} is not free")]
    NotFree { index: usize },
    /// Operation requires an allocated block
    #[error("block {index} is not allocated")]
    NotAllocated { index: usize },
    /// A block has zero size
    #[error("block {index} has zero size")]
    ZeroSizedBlock { index: usize },
    /// A block does not start where its predecessor ends
    #[error("block {index} starts at {found}, expected {expected}")]
    CoverageGap {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// The blocks do not end exactly at the end of the address space
    #[error("blocks cover {covered} units of a {total_size}-unit space")]
    CoverageOverrun { covered: usize, total_size: usize },
    /// Two neighbouring blocks are both free
    #[error("blocks {index} and {} are both free", .index + 1)]
    AdjacentFree { index: usize },
    /// A process owns more than one block
    #[error("{owner} owns more than one block")]
    DuplicateOwner { owner: ProcessId },
}

/// Ordered block list covering `[0, total_size)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    total_size: usize,
    blocks: Vec<Block>,
}

impl Partition {
    /// Create a partition holding one free block spanning the whole space
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::EmptySpace` if `total_size` is 0.
    pub fn new(total_size: usize) -> Result<Self, PartitionError> {
        if total_size == 0 {
            return Err(PartitionError::EmptySpace);
        }
        Ok(Self {
            total_size,
            blocks: vec![Block::free(0, total_size)],
        })
    }

    /// Build a partition from an explicit block list
    ///
    /// The list must already satisfy every layout invariant; it is validated
    /// with [`check_invariants`](Self::check_invariants) and rejected
    /// otherwise.
    pub fn from_blocks(total_size: usize, blocks: Vec<Block>) -> Result<Self, PartitionError> {
        if total_size == 0 {
            return Err(PartitionError::EmptySpace);
        }
        let partition = Self { total_size, blocks };
        partition.check_invariants()?;
        Ok(partition)
    }

    /// Size of the address space
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Blocks in ascending start order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false for a valid partition; provided for API completeness
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the block at `index`
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Iterate over free blocks in address order
    pub fn free_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(|b| b.is_free())
    }

    /// Iterate over allocated blocks in address order
    pub fn allocated_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter().filter(|b| !b.is_free())
    }

    /// Index of the block owned by `owner`
    pub fn position_of(&self, owner: ProcessId) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.status() == BlockStatus::Allocated(owner))
    }

    /// Index of the block containing `offset`, or `None` past the end
    pub fn block_containing(&self, offset: usize) -> Option<usize> {
        if offset >= self.total_size {
            return None;
        }
        // First block starting after `offset`; the one before it holds the offset.
        let after = self.blocks.partition_point(|b| b.start() <= offset);
        after.checked_sub(1)
    }

    /// Split the free block at `index` into an allocated prefix and a free
    /// remainder
    ///
    /// The prefix has length `amount` and is owned by `owner`; the remainder
    /// keeps the rest of the block and stays free. Both occupy `index` and
    /// `index + 1`, and every later block moves one slot to the right.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if there is no block at `index`
    /// - `NotFree` if the block is allocated
    /// - `InvalidSplit` unless `0 < amount < size`
    /// - `DuplicateOwner` if `owner` already holds a block
    ///
    /// The partition is unchanged on error.
    pub fn split(&mut self, index: usize, amount: usize, owner: ProcessId) -> Result<(), PartitionError> {
        let block = *self.block_ref(index)?;
        if !block.is_free() {
            return Err(PartitionError::NotFree { index });
        }
        self.ensure_unowned(owner)?;
        if amount == 0 || amount >= block.size() {
            return Err(PartitionError::InvalidSplit {
                amount,
                size: block.size(),
            });
        }

        let remainder = Block::free(block.start() + amount, block.size() - amount);
        let prefix = &mut self.blocks[index];
        prefix.shrink_to(amount);
        prefix.set_status(BlockStatus::Allocated(owner));
        self.blocks.insert(index + 1, remainder);
        Ok(())
    }

    /// Allocate the free block at `index` in place
    ///
    /// Fails with `NotFree` on an allocated block and `DuplicateOwner` if
    /// `owner` already holds a block.
    pub fn assign(&mut self, index: usize, owner: ProcessId) -> Result<(), PartitionError> {
        if !self.block_ref(index)?.is_free() {
            return Err(PartitionError::NotFree { index });
        }
        self.ensure_unowned(owner)?;
        self.block_mut(index)?.set_status(BlockStatus::Allocated(owner));
        Ok(())
    }

    fn ensure_unowned(&self, owner: ProcessId) -> Result<(), PartitionError> {
        match self.position_of(owner) {
            Some(_) => Err(PartitionError::DuplicateOwner { owner }),
            None => Ok(()),
        }
    }

    /// Return the allocated block at `index` to the free state
    ///
    /// Returns the former owner. Neighbouring free blocks are left alone;
    /// call [`coalesce`](Self::coalesce) afterwards to restore the
    /// no-adjacent-free invariant.
    pub fn release(&mut self, index: usize) -> Result<ProcessId, PartitionError> {
        let block = self.block_mut(index)?;
        let owner = block.owner().ok_or(PartitionError::NotAllocated { index })?;
        block.set_status(BlockStatus::Free);
        Ok(owner)
    }

    /// Merge every run of consecutive free blocks into a single block
    ///
    /// One forward pass suffices: after a merge the same position is checked
    /// again against its new right neighbour. Returns the number of merges.
    pub fn coalesce(&mut self) -> usize {
        let mut merges = 0;
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let absorbed = self.blocks.remove(i + 1);
                self.blocks[i].grow(absorbed.size());
                merges += 1;
            } else {
                i += 1;
            }
        }
        merges
    }

    /// Verify the layout invariants, reporting the first violation found
    pub fn check_invariants(&self) -> Result<(), PartitionError> {
        let mut expected = 0;
        let mut owners = HashSet::new();

        for (index, block) in self.blocks.iter().enumerate() {
            if block.size() == 0 {
                return Err(PartitionError::ZeroSizedBlock { index });
            }
            if block.start() != expected {
                return Err(PartitionError::CoverageGap {
                    index,
                    expected,
                    found: block.start(),
                });
            }
            if let Some(owner) = block.owner() {
                if !owners.insert(owner) {
                    return Err(PartitionError::DuplicateOwner { owner });
                }
            }
            if block.is_free() && self.blocks.get(index + 1).is_some_and(Block::is_free) {
                return Err(PartitionError::AdjacentFree { index });
            }
            expected = block.end();
        }

        if expected != self.total_size {
            return Err(PartitionError::CoverageOverrun {
                covered: expected,
                total_size: self.total_size,
            });
        }
        Ok(())
    }

    fn block_ref(&self, index: usize) -> Result<&Block, PartitionError> {
        let len = self.blocks.len();
        self.blocks
            .get(index)
            .ok_or(PartitionError::IndexOutOfRange { index, len })
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block, PartitionError> {
        let len = self.blocks.len();
        self.blocks
            .get_mut(index)
            .ok_or(PartitionError::IndexOutOfRange { index, len })
    }
}
