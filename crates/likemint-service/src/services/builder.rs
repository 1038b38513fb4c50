//! Mint-argument builder

use likemint_core::{AccountId, Address, DomainError, MintArguments, ReactorEntry};

use super::error::ServiceResult;

pub struct MintArgumentBuilder;

impl MintArgumentBuilder {
    /// Lay out the surviving entries as the canonical argument arrays
    ///
    /// Zero-count entries are dropped and the rest keep their input order.
    /// Fails with `NothingToMint` if nothing is left.
    pub fn build(
        target_address: Address,
        target_id: AccountId,
        entries: &[ReactorEntry],
    ) -> ServiceResult<MintArguments> {
        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries.iter().filter(|e| e.count > 0) {
            if entry.window_start < 0 || entry.window_end < entry.window_start {
                return Err(DomainError::validation(format!(
                    "invalid window [{}, {}] for reactor {}",
                    entry.window_start, entry.window_end, entry.reactor_id
                ))
                .into());
            }
            kept.push(*entry);
        }

        if kept.is_empty() {
            return Err(DomainError::NothingToMint.into());
        }

        Ok(MintArguments::from_entries(target_address, target_id, &kept))
    }
}
