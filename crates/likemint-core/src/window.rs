//! Attribution window predicate
//!
//! A reaction belongs to the current mint cycle only if it happened strictly
//! after the pair's recorded range close. Reactions at or before the boundary
//! were already attributed to an earlier mint.

use crate::value_objects::Timestamp;

#[inline]
pub fn is_attributable(reaction_time: Timestamp, range_boundary: Timestamp) -> bool {
    reaction_time > range_boundary
}
