//! Multi-signer attestation client
//!
//! Every configured signer independently recomputes the mint arguments and
//! signs them. The calls run concurrently and the first failure aborts the
//! whole request: a mint needs every signature, so a partial list is never
//! returned.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, instrument, warn};

use likemint_core::traits::Signer;
use likemint_core::{
    AttestationRequest, CombinedAttestation, DomainError, MintArguments, SignedAttestation,
};

use super::error::{ServiceError, ServiceResult};

pub struct AttestationClient<'a> {
    signers: &'a [Arc<dyn Signer>],
}

impl<'a> AttestationClient<'a> {
    pub fn new(signers: &'a [Arc<dyn Signer>]) -> Self {
        Self { signers }
    }

    /// Collect one signature per signer over `expected`
    ///
    /// Signatures come back in configuration order. A signer whose echoed
    /// arguments differ from `expected` is treated as a rejection.
    #[instrument(skip(self, expected), fields(reactor = %request.reactor_id, signers = self.signers.len()))]
    pub async fn attest(
        &self,
        request: &AttestationRequest,
        expected: &MintArguments,
    ) -> ServiceResult<CombinedAttestation> {
        if self.signers.is_empty() {
            return Err(ServiceError::validation("no signers configured"));
        }

        let calls = self.signers.iter().map(|signer| async move {
            let signed = signer.attest(request).await.inspect_err(|e| {
                warn!(signer = signer.index(), error = %e, "signer failed");
            })?;
            check_echo(signer.index(), signed, expected)
        });
        let signed = try_join_all(calls).await?;

        debug!(count = signed.len(), "all signers attested");

        Ok(CombinedAttestation {
            arguments: expected.clone(),
            signatures: signed.into_iter().map(|s| s.signature).collect(),
        })
    }
}

fn check_echo(
    index: usize,
    signed: SignedAttestation,
    expected: &MintArguments,
) -> Result<SignedAttestation, DomainError> {
    if signed.arguments != *expected {
        warn!(signer = index, "signer computed different arguments");
        return Err(DomainError::SignerRejected {
            signer: index,
            reason: "arguments mismatch".to_string(),
        });
    }
    Ok(signed)
}
