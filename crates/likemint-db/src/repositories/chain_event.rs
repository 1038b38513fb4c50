//! PostgreSQL implementation of ChainEventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use likemint_core::traits::{ChainEventRepository, RepoResult};
use likemint_core::{Address, ChainEvent, DomainError};

use crate::mappers::ChainEventInsert;
use crate::models::ChainEventModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ChainEventRepository
#[derive(Clone)]
pub struct PgChainEventRepository {
    pool: PgPool,
}

impl PgChainEventRepository {
    /// Create a new PgChainEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChainEventRepository for PgChainEventRepository {
    #[instrument(skip(self, events), fields(count = events.len()))]
    async fn upsert_events(&self, events: &[ChainEvent]) -> RepoResult<u64> {
        if events.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut inserted = 0;

        for event in events {
            let row = ChainEventInsert::new(event)?;
            let result = sqlx::query(
                r#"
                INSERT INTO chain_events
                    (tx_hash, log_index, kind, recipient, account_id, amount, block_number)
                VALUES ($1, $2, $3, $4, $5::numeric, $6::numeric, $7)
                ON CONFLICT (tx_hash, log_index) DO NOTHING
                "#,
            )
            .bind(row.tx_hash)
            .bind(row.log_index)
            .bind(row.kind)
            .bind(&row.recipient)
            .bind(&row.account_id)
            .bind(&row.amount)
            .bind(row.block_number)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn cursor(&self) -> RepoResult<Option<u64>> {
        let block = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT block_number FROM mirror_cursor WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        block
            .map(|b| {
                u64::try_from(b).map_err(|_| DomainError::Database(format!("negative cursor {b}")))
            })
            .transpose()
    }

    #[instrument(skip(self))]
    async fn set_cursor(&self, block: u64) -> RepoResult<()> {
        let block = i64::try_from(block)
            .map_err(|_| DomainError::validation("block number out of range"))?;

        sqlx::query(
            r#"
            INSERT INTO mirror_cursor (id, block_number, updated_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE
                SET block_number = EXCLUDED.block_number, updated_at = NOW()
            "#,
        )
        .bind(block)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_recipient(
        &self,
        recipient: &Address,
        limit: i64,
    ) -> RepoResult<Vec<ChainEvent>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, ChainEventModel>(
            r#"
            SELECT tx_hash, log_index, kind, recipient,
                   account_id::text AS account_id, amount::text AS amount, block_number
            FROM chain_events
            WHERE recipient = $1
            ORDER BY block_number DESC, log_index DESC
            LIMIT $2
            "#,
        )
        .bind(recipient.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ChainEvent::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
