//! Chain event database model

use sqlx::FromRow;

/// Row of `chain_events`; NUMERIC columns are selected as text
#[derive(Debug, Clone, FromRow)]
pub struct ChainEventModel {
    pub tx_hash: String,
    pub log_index: i32,
    pub kind: String,
    pub recipient: String,
    pub account_id: String,
    pub amount: String,
    pub block_number: i64,
}
