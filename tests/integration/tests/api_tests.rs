//! End-to-end tests: API server + two signer services over loopback HTTP
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::fixtures::{chain_event, REACTOR_A, REACTOR_B, SIGNER_KEYS, TARGET_ID};
use integration_tests::{assert_json, assert_status, World};
use likemint_common::{recover_address, EthereumKey};
use likemint_core::encoding::personal_digest;
use likemint_core::{Address, ChainEvent, ChainEventKind, ReactorEntry};
use likemint_service::dto::{ApiResponse, MintResponse, ScanResponse, SignerInfoResponse};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let world = World::start().await.unwrap();
    let response = world.api.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let world = World::start().await.unwrap();
    let response = world.api.get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Scan Tests
// ============================================================================

#[tokio::test]
async fn test_scan_reference_scenario() {
    let world = World::start().await.unwrap();
    let path = format!("/scan?address={}", world.target.address());

    let response = world.api.get(&path).await.unwrap();
    let body: ApiResponse<ScanResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let scan = body.result;

    assert_eq!(scan.reactor_ids, vec![REACTOR_A, REACTOR_B]);
    assert_eq!(scan.count, 2);
    assert_eq!(scan.counts[&REACTOR_A], 2);
    assert_eq!(scan.last_reaction_time[&REACTOR_A], 200);
    assert_eq!(scan.last_mint_boundary[&REACTOR_A], 150);
    assert_eq!(scan.mintable[&REACTOR_A], 1);
    assert_eq!(scan.mintable[&REACTOR_B], 1);
}

#[tokio::test]
async fn test_scan_unknown_address() {
    let world = World::start().await.unwrap();
    let path = format!("/scan?address={}", Address::new([0x11; 20]));

    let response = world.api.get(&path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["code"], "UNKNOWN_ACCOUNT");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_scan_malformed_address() {
    let world = World::start().await.unwrap();
    let response = world.api.get("/scan?address=0x1234").await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["code"], "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_session_rejects_foreign_signature() {
    let world = World::start().await.unwrap();
    let other = EthereumKey::from_hex(SIGNER_KEYS[0]).unwrap();
    let message = world.challenge().await.unwrap();
    let signature = other
        .sign_hash(&likemint_core::encoding::personal_message_hash(message.as_bytes()))
        .unwrap();

    let response = world
        .api
        .post(
            "/session",
            &json!({
                "address": world.target.address(),
                "message": message,
                "signature": signature,
            }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_challenge_shape() {
    let world = World::start().await.unwrap();

    let response = world
        .api
        .post(
            "/session/challenge",
            &json!({ "address": world.target.address() }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let message = body["result"]["message"].as_str().unwrap();
    let nonce = body["result"]["nonce"].as_str().unwrap();
    assert!(message.contains(&world.target.address().to_string()));
    assert!(message.contains(nonce));
    assert_eq!(body["result"]["expiresIn"], 300);
}

#[tokio::test]
async fn test_session_signature_cannot_be_replayed() {
    let world = World::start().await.unwrap();
    let body = world
        .signed_session(&world.challenge().await.unwrap())
        .unwrap();

    let first = world.api.post("/session", &body).await.unwrap();
    assert_status(first, StatusCode::OK).await.unwrap();

    let replay = world.api.post("/session", &body).await.unwrap();
    let body: Value = assert_json(replay, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["code"], "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_session_requires_issued_challenge() {
    let world = World::start().await.unwrap();
    let body = world.signed_session("Sign in to likemint").unwrap();

    let response = world.api.post("/session", &body).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["code"], "INVALID_SIGNATURE");
}

// ============================================================================
// Mint Tests
// ============================================================================

#[tokio::test]
async fn test_mint_collects_both_signatures() {
    let world = World::start().await.unwrap();
    let token = world.session().await.unwrap();

    let response = world
        .api
        .post_auth("/mint", &token, &json!({ "reactorId": REACTOR_A }))
        .await
        .unwrap();
    let body: ApiResponse<MintResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let combined = body.result.mint_arguments;

    assert_eq!(combined.arguments.target_address(), world.target.address());
    assert_eq!(combined.arguments.target_id(), TARGET_ID);
    assert_eq!(
        combined.arguments.entries(),
        vec![ReactorEntry::new(REACTOR_A, 1, 200, 200)]
    );
    assert_eq!(combined.signatures.len(), 2);

    // Signatures are in signer order and recover to each signer's address
    let hash = personal_digest(&combined.arguments.digest());
    for (signer, signature) in world.signers.iter().zip(&combined.signatures) {
        let info: SignerInfoResponse =
            assert_json(signer.get("/address").await.unwrap(), StatusCode::OK)
                .await
                .unwrap();
        assert_eq!(recover_address(&hash, signature).unwrap(), info.address);
    }
}

#[tokio::test]
async fn test_mint_wire_form_is_positional() {
    let world = World::start().await.unwrap();
    let token = world.session().await.unwrap();

    let response = world
        .api
        .post_auth("/mint", &token, &json!({ "reactorId": REACTOR_B }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let tuple = body["result"]["mintArguments"].as_array().unwrap();

    assert_eq!(tuple.len(), 7);
    assert_eq!(tuple[1], json!(TARGET_ID));
    assert_eq!(tuple[2], json!([REACTOR_B]));
    assert_eq!(tuple[3], json!([1]));
    assert_eq!(tuple[4], json!([150]));
    assert_eq!(tuple[5], json!([150]));
    assert_eq!(tuple[6].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_mint_is_deterministic() {
    let world = World::start().await.unwrap();
    let token = world.session().await.unwrap();
    let request = json!({ "reactorId": REACTOR_A });

    let first: Value = assert_json(
        world.api.post_auth("/mint", &token, &request).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let second: Value = assert_json(
        world.api.post_auth("/mint", &token, &request).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_mint_requires_session() {
    let world = World::start().await.unwrap();

    let response = world
        .api
        .post("/mint", &json!({ "reactorId": REACTOR_A }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["code"], "INVALID_SESSION");

    let response = world
        .api
        .post_auth("/mint", "garbage", &json!({ "reactorId": REACTOR_A }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_mint_unknown_reactor_is_nothing_to_mint() {
    let world = World::start().await.unwrap();
    let token = world.session().await.unwrap();

    let response = world
        .api
        .post_auth("/mint", &token, &json!({ "reactorId": 77 }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(body["code"], "NOTHING_TO_MINT");
}

#[tokio::test]
async fn test_mint_fails_when_a_signer_is_down() {
    let world = World::builder().dead_signer().start().await.unwrap();
    let token = world.session().await.unwrap();

    let response = world
        .api
        .post_auth("/mint", &token, &json!({ "reactorId": REACTOR_A }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(body["code"], "SIGNER_UNREACHABLE");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_mint_fails_when_a_signer_refuses() {
    let world = World::builder().wrong_token_for(1).start().await.unwrap();
    let token = world.session().await.unwrap();

    let response = world
        .api
        .post_auth("/mint", &token, &json!({ "reactorId": REACTOR_A }))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(body["code"], "SIGNER_REJECTED");
}

// ============================================================================
// Signer Tests
// ============================================================================

#[tokio::test]
async fn test_signer_requires_bearer_token() {
    let world = World::start().await.unwrap();
    let request = json!({
        "reactorId": REACTOR_A,
        "targetId": TARGET_ID,
        "targetAddress": world.target.address(),
    });

    let response = world.signers[0].post("/attest", &request).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_signer_checks_target_independently() {
    let world = World::start().await.unwrap();
    let request = json!({
        "reactorId": REACTOR_A,
        "targetId": 12345,
        "targetAddress": world.target.address(),
    });

    let response = world.signers[0]
        .post_auth("/attest", "signer-token-0", &request)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body["code"], "UNVERIFIED_ADDRESS");
}

// ============================================================================
// Event Tests
// ============================================================================

#[tokio::test]
async fn test_events_newest_first() {
    let recipient = Address::new([0x22; 20]);
    let world = World::builder()
        .events(vec![
            chain_event(ChainEventKind::Mint, recipient, 10),
            chain_event(ChainEventKind::Claim, recipient, 30),
            chain_event(ChainEventKind::Mint, Address::new([0x33; 20]), 20),
        ])
        .start()
        .await
        .unwrap();

    let response = world
        .api
        .get(&format!("/events?address={recipient}"))
        .await
        .unwrap();
    let body: ApiResponse<Vec<ChainEvent>> = assert_json(response, StatusCode::OK).await.unwrap();

    let blocks: Vec<u64> = body.result.iter().map(|e| e.block_number).collect();
    assert_eq!(blocks, vec![30, 10]);
    assert_eq!(body.result[0].kind, ChainEventKind::Claim);
}

#[tokio::test]
async fn test_events_limit_validated() {
    let world = World::start().await.unwrap();
    let path = format!("/events?address={}&limit=500", Address::new([0x22; 20]));
    let response = world.api.get(&path).await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
