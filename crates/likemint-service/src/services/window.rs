//! Window filter
//!
//! A reaction is attributable to this mint only if it happened strictly
//! after the (target, reactor) range close recorded on chain.

use likemint_core::{is_attributable, ReactorEntry, ReactorTally, ScanResult, Timestamp};

/// Outcome of filtering one reactor's tally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    Attributable(ReactorEntry),
    NoAttributableActivity,
}

impl Attribution {
    pub fn entry(self) -> Option<ReactorEntry> {
        match self {
            Self::Attributable(entry) => Some(entry),
            Self::NoAttributableActivity => None,
        }
    }
}

pub struct WindowFilter;

impl WindowFilter {
    /// Keep the sightings after `boundary`; the window spans the survivors
    pub fn attribute(tally: &ReactorTally, boundary: Timestamp) -> Attribution {
        let mut surviving = tally
            .sightings()
            .iter()
            .copied()
            .filter(|t| is_attributable(*t, boundary));

        let Some(first) = surviving.next() else {
            return Attribution::NoAttributableActivity;
        };
        let (count, start, end) = surviving.fold((1u64, first, first), |(n, lo, hi), t| {
            (n + 1, lo.min(t), hi.max(t))
        });

        Attribution::Attributable(ReactorEntry::new(tally.id(), count, start, end))
    }

    /// Attribute every reactor of a scan against its attached boundary
    ///
    /// Reactors with nothing attributable are omitted; order follows the scan.
    pub fn attribute_all(scan: &ScanResult) -> Vec<ReactorEntry> {
        scan.tallies()
            .filter_map(|tally| Self::attribute(tally, scan.boundary(tally.id())).entry())
            .collect()
    }
}
