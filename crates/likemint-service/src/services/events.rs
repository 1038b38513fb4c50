//! Read side of the chain event mirror

use tracing::instrument;

use likemint_core::{Address, ChainEvent};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mirrored events paid to `recipient`, newest first
    #[instrument(skip(self), fields(recipient = %recipient))]
    pub async fn list(&self, recipient: &Address, limit: Option<i64>) -> ServiceResult<Vec<ChainEvent>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(self.ctx.events()?.find_by_recipient(recipient, limit).await?)
    }
}
