//! Dependency readiness gate run before every scan or mint

use futures::future::try_join;
use tracing::warn;

use likemint_core::DomainError;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Wait for the feed and the chain to answer their readiness probes
///
/// Fails with `Fetch` if either probe fails or both have not answered
/// within the context's ready timeout.
pub async fn ensure_ready(ctx: &ServiceContext) -> ServiceResult<()> {
    let deadline = ctx.ready_timeout();
    let probes = try_join(ctx.feed().ready(), ctx.boundaries().ready());

    match tokio::time::timeout(deadline, probes).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => {
            warn!(error = %e, "dependency not ready");
            Err(e.into())
        }
        Err(_) => {
            warn!(timeout = ?deadline, "dependencies did not become ready in time");
            Err(DomainError::fetch(format!(
                "dependencies not ready within {}s",
                deadline.as_secs_f64()
            ))
            .into())
        }
    }
}
