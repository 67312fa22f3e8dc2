//! Next-Fit Placement
//!
//! Implements next-fit placement strategy.
//!
//! Next-fit behaves like first-fit but resumes scanning just after the block
//! chosen by the previous next-fit placement, wrapping around to the start of
//! the block list. Every block is visited at most once per search.
//!
//! The cursor is owned by the allocation engine, not by this module: it only
//! moves when a next-fit placement succeeds, so failed searches and placements
//! made with other strategies leave it where it was.

use entities_memory_layout::Block;

use super::allocator::FitStrategy;

/// Next-fit placement resuming after a cursor
#[derive(Debug, Clone, Copy, Default)]
pub struct NextFit {
    /// Index chosen by the last successful next-fit placement
    cursor: Option<usize>,
}

impl NextFit {
    /// Create a next-fit search starting after `cursor`
    ///
    /// With no cursor the search starts at index 0. A cursor beyond the end of
    /// the block list (blocks may have merged since) wraps modulo the block count.
    pub fn resuming_after(cursor: Option<usize>) -> Self {
        Self { cursor }
    }

    /// Index the scan begins at for a list of `len` blocks
    pub fn scan_start(&self, len: usize) -> usize {
        match self.cursor {
            Some(cursor) if len > 0 => (cursor + 1) % len,
            _ => 0,
        }
    }
}

impl FitStrategy for NextFit {
    fn find(&self, blocks: &[Block], request: usize) -> Option<usize> {
        let len = blocks.len();
        let begin = self.scan_start(len);
        (0..len)
            .map(|step| (begin + step) % len)
            .find(|&index| blocks[index].fits(request))
    }
}
