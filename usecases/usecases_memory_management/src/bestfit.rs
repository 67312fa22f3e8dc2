//! Best-Fit Placement
//!
//! Implements best-fit placement strategy.
//!
//! Best-fit finds the free block that leaves the smallest leftover after the
//! request is placed. This minimizes wasted space in the chosen block but
//! tends to produce many tiny fragments. Ties go to the lowest address.

use entities_memory_layout::Block;

use super::allocator::FitStrategy;

/// Best-fit placement
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFit;

impl FitStrategy for BestFit {
    fn find(&self, blocks: &[Block], request: usize) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;

        for (index, block) in blocks.iter().enumerate() {
            let Some(leftover) = block.leftover(request) else {
                continue;
            };
            // Strict comparison keeps the earliest of equal candidates
            if best.map_or(true, |(_, min)| leftover < min) {
                best = Some((index, leftover));
            }
        }

        best.map(|(index, _)| index)
    }
}
