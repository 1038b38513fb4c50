//! Mappers from service-layer results to response DTOs

use likemint_core::ScanResult;

use super::responses::ScanResponse;
use crate::services::{Attribution, WindowFilter};

impl From<&ScanResult> for ScanResponse {
    fn from(scan: &ScanResult) -> Self {
        let mut response = ScanResponse {
            reactor_ids: scan.reactor_ids().to_vec(),
            count: scan.count(),
            ..ScanResponse::default()
        };

        for tally in scan.tallies() {
            let id = tally.id();
            let boundary = scan.boundary(id);
            let mintable = match WindowFilter::attribute(tally, boundary) {
                Attribution::Attributable(entry) => entry.count,
                Attribution::NoAttributableActivity => 0,
            };

            response.counts.insert(id, tally.like_count());
            response.names.insert(id, tally.display_name().to_string());
            response.last_reaction_time.insert(id, tally.last_reaction_time());
            response.last_mint_boundary.insert(id, boundary);
            response.mintable.insert(id, mintable);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use likemint_core::{AccountId, ReactorTally};
    use std::collections::HashMap;

    #[test]
    fn test_scan_mapping() {
        let a = AccountId::new(1);
        let mut tally = ReactorTally::new(a, "alice", 100);
        tally.record(200);
        let scan = ScanResult::from_tallies(HashMap::from([(a, tally)]))
            .with_boundaries(HashMap::from([(a, 150)]));

        let response = ScanResponse::from(&scan);
        assert_eq!(response.reactor_ids, vec![a]);
        assert_eq!(response.counts[&a], 2);
        assert_eq!(response.names[&a], "alice");
        assert_eq!(response.last_reaction_time[&a], 200);
        assert_eq!(response.last_mint_boundary[&a], 150);
        assert_eq!(response.mintable[&a], 1);
        assert_eq!(response.count, 1);
    }
}
