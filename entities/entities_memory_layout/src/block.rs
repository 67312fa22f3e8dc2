//! Block Entity
//!
//! Provides the `Block` struct describing one contiguous region of the
//! address space, together with its ownership status.
//!
//! Ownership is a single tagged value: a block is either `Free` or
//! `Allocated` to exactly one process. There is no way to build a free
//! block that still names an owner.

use std::fmt;

/// Process identifier
///
/// Issued by the allocation engine from a monotonically increasing counter
/// starting at 1. Displayed as `P<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(u64);

impl ProcessId {
    /// The first id handed out by a fresh engine
    pub const FIRST: ProcessId = ProcessId(1);

    /// Wrap a raw id value
    pub const fn new(raw: u64) -> Self {
        ProcessId(raw)
    }

    /// Get the raw id value
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one
    pub const fn next(self) -> Self {
        ProcessId(self.0 + 1)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u64> for ProcessId {
    fn from(raw: u64) -> Self {
        ProcessId(raw)
    }
}

/// Ownership state of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockStatus {
    /// Region is available for placement
    Free,
    /// Region is held by the given process
    Allocated(ProcessId),
}

impl BlockStatus {
    /// Check if the status is `Free`
    pub fn is_free(self) -> bool {
        matches!(self, BlockStatus::Free)
    }

    /// Get the owning process, if any
    pub fn owner(self) -> Option<ProcessId> {
        match self {
            BlockStatus::Free => None,
            BlockStatus::Allocated(pid) => Some(pid),
        }
    }
}

/// One contiguous region `[start, start + size)` of the address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    start: usize,
    size: usize,
    status: BlockStatus,
}

impl Block {
    /// Create a free block
    pub fn free(start: usize, size: usize) -> Self {
        Self {
            start,
            size,
            status: BlockStatus::Free,
        }
    }

    /// Create a block allocated to `owner`
    pub fn allocated(start: usize, size: usize, owner: ProcessId) -> Self {
        Self {
            start,
            size,
            status: BlockStatus::Allocated(owner),
        }
    }

    /// Start offset
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length of the region
    pub fn size(&self) -> usize {
        self.size
    }

    /// One past the last offset of the region
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    /// Ownership state
    pub fn status(&self) -> BlockStatus {
        self.status
    }

    pub fn is_free(&self) -> bool {
        self.status.is_free()
    }

    pub fn owner(&self) -> Option<ProcessId> {
        self.status.owner()
    }

    /// Check whether `offset` lies inside the region
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Check whether a request of `request` units could be placed here
    pub fn fits(&self, request: usize) -> bool {
        self.is_free() && self.size >= request
    }

    /// Space left over after placing `request` units, or `None` if the block
    /// is not eligible
    pub fn leftover(&self, request: usize) -> Option<usize> {
        if self.fits(request) {
            Some(self.size - request)
        } else {
            None
        }
    }

    pub(crate) fn set_status(&mut self, status: BlockStatus) {
        self.status = status;
    }

    pub(crate) fn grow(&mut self, extra: usize) {
        self.size += extra;
    }

    pub(crate) fn shrink_to(&mut self, size: usize) {
        self.size = size;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            BlockStatus::Free => write!(f, "[{}..{}) free", self.start, self.end()),
            BlockStatus::Allocated(pid) => write!(f, "[{}..{}) {}", self.start, self.end(), pid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::new(7).to_string(), "P7");
        assert_eq!(ProcessId::FIRST.next(), ProcessId::new(2));
    }

    #[test]
    fn test_block_bounds() {
        let block = Block::free(50, 25);
        assert_eq!(block.end(), 75);
        assert!(block.contains(50));
        assert!(block.contains(74));
        assert!(!block.contains(75));
        assert!(!block.contains(49));
    }

    #[test]
    fn test_fits_requires_free() {
        let free = Block::free(0, 10);
        let taken = Block::allocated(0, 10, ProcessId::new(1));

        assert!(free.fits(10));
        assert!(!free.fits(11));
        assert!(!taken.fits(1));
        assert_eq!(free.leftover(4), Some(6));
        assert_eq!(taken.leftover(4), None);
    }

    #[test]
    fn test_status_owner() {
        assert_eq!(BlockStatus::Free.owner(), None);
        let status = BlockStatus::Allocated(ProcessId::new(3));
        assert_eq!(status.owner(), Some(ProcessId::new(3)));
        assert!(!status.is_free());
    }

    #[test]
    fn test_block_display() {
        assert_eq!(Block::free(0, 10).to_string(), "[0..10) free");
        assert_eq!(Block::allocated(10, 5, ProcessId::new(2)).to_string(), "[10..15) P2");
    }
}
