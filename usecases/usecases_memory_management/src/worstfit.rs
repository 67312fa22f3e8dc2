//! Worst-Fit Placement
//!
//! Implements worst-fit placement strategy.
//!
//! Worst-fit picks the free block that leaves the largest leftover, on the
//! theory that big remainders stay useful for later requests. Ties go to the
//! lowest address.

use entities_memory_layout::Block;

use super::allocator::FitStrategy;

/// Worst-fit placement
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFit;

impl FitStrategy for WorstFit {
    fn find(&self, blocks: &[Block], request: usize) -> Option<usize> {
        let mut worst: Option<(usize, usize)> = None;

        for (index, block) in blocks.iter().enumerate() {
            let Some(leftover) = block.leftover(request) else {
                continue;
            };
            if worst.map_or(true, |(_, max)| leftover > max) {
                worst = Some((index, leftover));
            }
        }

        worst.map(|(index, _)| index)
    }
}
