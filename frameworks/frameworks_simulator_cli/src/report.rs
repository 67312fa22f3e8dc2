//! Text Report Rendering
//!
//! Renders a [`SessionSnapshot`] as plain text: a proportional bar of the
//! address space (`#` allocated, `.` free), the free list, the allocated list
//! and the statistics line.

use std::fmt::Write;

use api_facades::SessionSnapshot;

/// Default number of columns of the memory bar
pub const BAR_WIDTH: usize = 64;

/// Draw the address space as `width` columns
///
/// Column `i` shows the state of offset `i * total / width`, computed in
/// `u128` so address spaces up to `usize::MAX` units scale without overflow.
pub fn render_bar(snapshot: &SessionSnapshot, width: usize) -> String {
    let total_size = snapshot.stats.total_size as u128;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for column in 0..width {
        // Below total_size, so the narrowing cast is lossless
        let offset = (column as u128 * total_size / width as u128) as usize;
        let allocated = snapshot
            .allocated
            .iter()
            .any(|extent| offset >= extent.start && offset - extent.start < extent.size);
        bar.push(if allocated { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

/// Full multi-line report
pub fn render_report(snapshot: &SessionSnapshot, width: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "strategy: {}", snapshot.strategy);
    let _ = writeln!(out, "{}", render_bar(snapshot, width));

    let _ = writeln!(out, "free blocks ({}):", snapshot.free.len());
    for extent in &snapshot.free {
        let _ = writeln!(
            out,
            "  [{}..{}) {} units",
            extent.start,
            extent.start + extent.size,
            extent.size
        );
    }

    let _ = writeln!(out, "allocated blocks ({}):", snapshot.allocated.len());
    for extent in &snapshot.allocated {
        let _ = writeln!(
            out,
            "  {} [{}..{}) {} units",
            extent.process_id,
            extent.start,
            extent.start + extent.size,
            extent.size
        );
    }

    let _ = writeln!(out, "{}", snapshot.summary());
    let _ = writeln!(
        out,
        "external fragmentation: {:.1}%",
        snapshot.stats.external_fragmentation() * 100.0
    );
    out
}
