//! Chain event entity <-> model mapper

use likemint_core::{ChainEvent, DomainError};

use crate::models::ChainEventModel;

/// Rows are only written by this crate, so a decode failure means the
/// table was edited by hand.
impl TryFrom<ChainEventModel> for ChainEvent {
    type Error = DomainError;

    fn try_from(model: ChainEventModel) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, detail: String| {
            DomainError::Database(format!(
                "corrupt chain_events row {}:{} ({field}: {detail})",
                model.tx_hash, model.log_index
            ))
        };

        Ok(ChainEvent {
            kind: model.kind.parse().map_err(|e| corrupt("kind", e))?,
            recipient: model
                .recipient
                .parse()
                .map_err(|e| corrupt("recipient", format!("{e}")))?,
            account_id: model
                .account_id
                .parse()
                .map_err(|e| corrupt("account_id", format!("{e}")))?,
            amount: model
                .amount
                .parse()
                .map_err(|e| corrupt("amount", format!("{e}")))?,
            block_number: u64::try_from(model.block_number)
                .map_err(|e| corrupt("block_number", e.to_string()))?,
            log_index: u32::try_from(model.log_index)
                .map_err(|e| corrupt("log_index", e.to_string()))?,
            tx_hash: model.tx_hash,
        })
    }
}

/// Values bound for insertion; uint256 columns travel as text
pub struct ChainEventInsert<'a> {
    pub tx_hash: &'a str,
    pub log_index: i32,
    pub kind: &'static str,
    pub recipient: String,
    pub account_id: String,
    pub amount: String,
    pub block_number: i64,
}

impl<'a> ChainEventInsert<'a> {
    pub fn new(event: &'a ChainEvent) -> Result<Self, DomainError> {
        Ok(Self {
            tx_hash: &event.tx_hash,
            log_index: i32::try_from(event.log_index)
                .map_err(|_| DomainError::validation("log index out of range"))?,
            kind: event.kind.as_str(),
            recipient: event.recipient.to_string(),
            account_id: event.account_id.to_string(),
            amount: event.amount.to_string(),
            block_number: i64::try_from(event.block_number)
                .map_err(|_| DomainError::validation("block number out of range"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use likemint_core::{AccountId, Address, ChainEventKind};

    fn event() -> ChainEvent {
        ChainEvent {
            kind: ChainEventKind::Claim,
            recipient: Address::new([0xab; 20]),
            account_id: AccountId::new(99),
            amount: u128::MAX,
            block_number: 1_234,
            tx_hash: "0xdead".to_string(),
            log_index: 3,
        }
    }

    #[test]
    fn test_insert_then_model_maps_back() {
        let original = event();
        let insert = ChainEventInsert::new(&original).unwrap();
        let model = ChainEventModel {
            tx_hash: insert.tx_hash.to_string(),
            log_index: insert.log_index,
            kind: insert.kind.to_string(),
            recipient: insert.recipient,
            account_id: insert.account_id,
            amount: insert.amount,
            block_number: insert.block_number,
        };
        assert_eq!(ChainEvent::try_from(model).unwrap(), original);
    }

    #[test]
    fn test_corrupt_row_is_database_error() {
        let model = ChainEventModel {
            tx_hash: "0x1".to_string(),
            log_index: 0,
            kind: "burn".to_string(),
            recipient: "0x0000000000000000000000000000000000000001".to_string(),
            account_id: "1".to_string(),
            amount: "1".to_string(),
            block_number: 1,
        };
        let err = ChainEvent::try_from(model).unwrap_err();
        assert!(matches!(err, DomainError::Database(ref msg) if msg.contains("kind")));
    }
}
