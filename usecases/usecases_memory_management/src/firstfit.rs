//! First-Fit Placement
//!
//! Implements first-fit placement strategy.
//!
//! First-fit takes the first free block, in address order, that is large
//! enough to satisfy the request. It is the cheapest scan but tends to
//! accumulate small fragments near the start of the address space.

use entities_memory_layout::Block;

use super::allocator::FitStrategy;

/// First-fit placement
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl FitStrategy for FirstFit {
    fn find(&self, blocks: &[Block], request: usize) -> Option<usize> {
        blocks.iter().position(|block| block.fits(request))
    }
}
