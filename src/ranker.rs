use std::cmp::Ordering;

use crate::models::BidLine;

/// Highest total pay first; equal pay falls back to line number, then seat.
pub fn compare(a: &BidLine, b: &BidLine) -> Ordering {
    b.pay_total()
        .cmp(&a.pay_total())
        .then_with(|| a.line_number().cmp(&b.line_number()))
        .then_with(|| a.position().cmp(&b.position()))
}

pub fn rank(mut lines: Vec<BidLine>) -> Vec<BidLine> {
    lines.sort_by(compare);
    lines
}
