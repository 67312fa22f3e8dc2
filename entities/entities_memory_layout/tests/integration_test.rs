//! Integration tests for entities_memory_layout crate
//!
//! These tests drive a partition through sequences of splits, releases and
//! coalesces and check that the layout stays consistent end-to-end.

use entities_memory_layout::{Block, Partition, PartitionError, ProcessId};
use proptest::prelude::*;

#[test]
fn test_carve_and_restore_whole_space() {
    let mut partition = Partition::new(1000).unwrap();

    // Carve four regions from the front, one at a time
    for (i, size) in [100, 200, 50, 150].into_iter().enumerate() {
        let pid = ProcessId::new(i as u64 + 1);
        partition.split(i, size, pid).unwrap();
        partition.check_invariants().unwrap();
    }
    assert_eq!(partition.len(), 5);
    assert_eq!(partition.blocks()[4], Block::free(500, 500));

    // Release in an interleaved order, coalescing after each
    for raw in [2, 4, 1, 3] {
        let index = partition.position_of(ProcessId::new(raw)).unwrap();
        partition.release(index).unwrap();
        partition.coalesce();
        partition.check_invariants().unwrap();
    }
    assert_eq!(partition.blocks(), &[Block::free(0, 1000)]);
}

#[test]
fn test_positions_shift_after_split() {
    let mut partition = Partition::new(100).unwrap();
    partition.split(0, 10, ProcessId::new(1)).unwrap();
    partition.split(1, 10, ProcessId::new(2)).unwrap();
    assert_eq!(partition.position_of(ProcessId::new(2)), Some(1));

    // Freeing P1 and merging does not move P2, but freeing P2 merges with P1's region
    let p1 = partition.position_of(ProcessId::new(1)).unwrap();
    partition.release(p1).unwrap();
    partition.coalesce();
    assert_eq!(partition.position_of(ProcessId::new(2)), Some(1));

    let p2 = partition.position_of(ProcessId::new(2)).unwrap();
    partition.release(p2).unwrap();
    assert_eq!(partition.coalesce(), 2);
    assert_eq!(partition.len(), 1);
}

#[test]
fn test_from_blocks_accepts_valid_layout() {
    let blocks = vec![
        Block::allocated(0, 50, ProcessId::new(1)),
        Block::free(50, 25),
        Block::allocated(75, 25, ProcessId::new(2)),
    ];
    let partition = Partition::from_blocks(100, blocks).unwrap();
    assert_eq!(partition.free_blocks().count(), 1);
    assert_eq!(partition.allocated_blocks().count(), 2);
    assert_eq!(Partition::from_blocks(0, Vec::new()), Err(PartitionError::EmptySpace));
}

proptest! {
    #[test]
    fn prop_split_release_keeps_layout(total in 10usize..500, cuts in prop::collection::vec(1usize..40, 1..20)) {
        let mut partition = Partition::new(total).unwrap();
        let mut next = 1u64;

        for cut in cuts {
            // Split the last free block if the cut fits strictly inside it
            let last = partition.len() - 1;
            let block = *partition.get(last).unwrap();
            if block.is_free() && cut < block.size() {
                partition.split(last, cut, ProcessId::new(next)).unwrap();
                next += 1;
            }
            prop_assert!(partition.check_invariants().is_ok());
        }

        let sum: usize = partition.blocks().iter().map(|b| b.size()).sum();
        prop_assert_eq!(sum, total);

        // Release every other process, then the rest
        for raw in (1..next).step_by(2).chain((2..next).step_by(2)) {
            let index = partition.position_of(ProcessId::new(raw)).unwrap();
            partition.release(index).unwrap();
            partition.coalesce();
            prop_assert!(partition.check_invariants().is_ok());
        }
        prop_assert_eq!(partition.blocks(), &[Block::free(0, total)][..]);
    }
}
