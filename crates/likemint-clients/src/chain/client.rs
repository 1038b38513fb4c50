//! Contract reads and event logs

use alloy_primitives::{B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use likemint_core::encoding::uint_id;
use likemint_core::traits::{BoundaryReader, ChainEventSource, RepoResult};
use likemint_core::{AccountId, Address, ChainEvent, ChainEventKind, DomainError, Timestamp};

use super::contract::ILikeMint;
use super::rpc::{decode_data, decode_quantity, encode_quantity, JsonRpcClient};

/// Reads range boundaries and Mint / Claim logs from the minting contract
pub struct ChainRpcClient {
    rpc: JsonRpcClient,
    contract: Address,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcLog {
    topics: Vec<String>,
    data: String,
    block_number: String,
    transaction_hash: String,
    log_index: String,
    #[serde(default)]
    removed: bool,
}

impl ChainRpcClient {
    pub fn new(http: reqwest::Client, rpc_url: impl Into<String>, contract: Address) -> Self {
        Self {
            rpc: JsonRpcClient::new(http, rpc_url),
            contract,
        }
    }

    async fn eth_call<C: SolCall>(&self, call: &C) -> RepoResult<Vec<u8>> {
        let result: String = self
            .rpc
            .call(
                "eth_call",
                json!([
                    { "to": self.contract.to_string(), "data": format!("0x{}", hex::encode(call.abi_encode())) },
                    "latest"
                ]),
            )
            .await?;
        decode_data(&result)
    }
}

fn abi_error(what: &str) -> impl FnOnce(alloy_sol_types::Error) -> DomainError + '_ {
    move |e| DomainError::fetch(format!("malformed {what}: {e}"))
}

fn to_timestamp(value: U256) -> RepoResult<Timestamp> {
    Timestamp::try_from(value)
        .map_err(|_| DomainError::fetch(format!("range close {value} out of range")))
}

fn decode_range_close(output: &[u8]) -> RepoResult<Timestamp> {
    let decoded = ILikeMint::getRangeCloseCall::abi_decode_returns(output, true)
        .map_err(abi_error("getRangeClose return"))?;
    to_timestamp(decoded._0)
}

fn decode_range_close_batch(output: &[u8], expected: usize) -> RepoResult<Vec<Timestamp>> {
    let values = ILikeMint::getRangeCloseBatchCall::abi_decode_returns(output, true)
        .map_err(abi_error("getRangeCloseBatch return"))?
        ._0;
    if values.len() != expected {
        return Err(DomainError::fetch(format!(
            "boundary batch returned {} values for {expected} pairs",
            values.len()
        )));
    }
    values.into_iter().map(to_timestamp).collect()
}

fn topic_word(topic: &str) -> RepoResult<B256> {
    B256::try_from(decode_data(topic)?.as_slice())
        .map_err(|_| DomainError::fetch(format!("topic is not 32 bytes: {topic}")))
}

fn event_topics() -> [B256; 2] {
    [ILikeMint::Mint::SIGNATURE_HASH, ILikeMint::Claim::SIGNATURE_HASH]
}

fn account_id(value: U256) -> RepoResult<AccountId> {
    u64::try_from(value)
        .map(AccountId::new)
        .map_err(|_| DomainError::fetch(format!("account id {value} exceeds u64")))
}

fn amount(value: U256) -> RepoResult<u128> {
    u128::try_from(value).map_err(|_| DomainError::fetch(format!("amount {value} exceeds u128")))
}

/// Decode one log; `Ok(None)` for logs that are not ours or were reorged out
fn decode_log(log: RpcLog) -> RepoResult<Option<ChainEvent>> {
    if log.removed || log.topics.len() != 3 {
        return Ok(None);
    }
    let topics = log
        .topics
        .iter()
        .map(String::as_str)
        .map(topic_word)
        .collect::<RepoResult<Vec<_>>>()?;
    let data = decode_data(&log.data)?;

    let (kind, recipient, account, value) = if topics[0] == ILikeMint::Mint::SIGNATURE_HASH {
        let event = ILikeMint::Mint::decode_raw_log(topics, &data, true)
            .map_err(abi_error("Mint log"))?;
        (ChainEventKind::Mint, event.to, event.targetId, event.amount)
    } else if topics[0] == ILikeMint::Claim::SIGNATURE_HASH {
        let event = ILikeMint::Claim::decode_raw_log(topics, &data, true)
            .map_err(abi_error("Claim log"))?;
        (ChainEventKind::Claim, event.to, event.reactorId, event.amount)
    } else {
        return Ok(None);
    };

    Ok(Some(ChainEvent {
        kind,
        recipient: recipient.into(),
        account_id: account_id(account)?,
        amount: amount(value)?,
        block_number: decode_quantity(&log.block_number)?,
        log_index: u32::try_from(decode_quantity(&log.log_index)?)
            .map_err(|_| DomainError::fetch("log index exceeds u32"))?,
        tx_hash: log.transaction_hash.to_lowercase(),
    }))
}

#[async_trait]
impl BoundaryReader for ChainRpcClient {
    #[instrument(skip(self))]
    async fn range_close(
        &self,
        target_id: AccountId,
        reactor_id: AccountId,
    ) -> RepoResult<Timestamp> {
        let call = ILikeMint::getRangeCloseCall {
            targetId: uint_id(target_id),
            reactorId: uint_id(reactor_id),
        };
        decode_range_close(&self.eth_call(&call).await?)
    }

    #[instrument(skip(self, target_ids, reactor_ids), fields(pairs = reactor_ids.len()))]
    async fn range_close_batch(
        &self,
        target_ids: &[AccountId],
        reactor_ids: &[AccountId],
    ) -> RepoResult<Vec<Timestamp>> {
        if target_ids.len() != reactor_ids.len() {
            return Err(DomainError::validation(format!(
                "boundary batch length mismatch: {} targets, {} reactors",
                target_ids.len(),
                reactor_ids.len()
            )));
        }
        if target_ids.is_empty() {
            return Ok(Vec::new());
        }

        let call = ILikeMint::getRangeCloseBatchCall {
            targetIds: target_ids.iter().copied().map(uint_id).collect(),
            reactorIds: reactor_ids.iter().copied().map(uint_id).collect(),
        };
        decode_range_close_batch(&self.eth_call(&call).await?, reactor_ids.len())
    }

    async fn ready(&self) -> RepoResult<()> {
        self.head_block().await.map(|_| ())
    }
}

#[async_trait]
impl ChainEventSource for ChainRpcClient {
    #[instrument(skip(self))]
    async fn head_block(&self) -> RepoResult<u64> {
        let head: String = self.rpc.call("eth_blockNumber", json!([])).await?;
        decode_quantity(&head)
    }

    #[instrument(skip(self))]
    async fn events(&self, from_block: u64, to_block: u64) -> RepoResult<Vec<ChainEvent>> {
        let topics: Vec<String> = event_topics()
            .iter()
            .map(|topic| format!("0x{}", hex::encode(topic)))
            .collect();

        let logs: Vec<RpcLog> = self
            .rpc
            .call(
                "eth_getLogs",
                json!([{
                    "address": self.contract.to_string(),
                    "fromBlock": encode_quantity(from_block),
                    "toBlock": encode_quantity(to_block),
                    "topics": [topics],
                }]),
            )
            .await?;

        let total = logs.len();
        let mut events = Vec::with_capacity(total);
        for log in logs {
            match decode_log(log)? {
                Some(event) => events.push(event),
                None => warn!("skipping unrecognised or removed log"),
            }
        }
        debug!(total, decoded = events.len(), "fetched contract logs");
        Ok(events)
    }
}
