//! # REST + WebSocket API
//!
//! The axum router in front of the devnet. All handlers share [`AppState`]
//! through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path      | Description                          |
//! |--------|-----------|--------------------------------------|
//! | GET    | `/health` | Liveness probe                       |
//! | GET    | `/status` | Node and contract summary            |
//! | POST   | `/rpc`    | JSON-RPC 2.0 gateway to the contracts|
//! | GET    | `/ws`     | WebSocket push of emitted events     |
//!
//! ## JSON-RPC
//!
//! Positional params. State-changing methods take the caller address
//! first; the devnet trusts it (there are no signatures on a devnet).
//!
//! | Method                    | Params                          |
//! |---------------------------|---------------------------------|
//! | `claim_addClaimBatch`     | `[from, root]`                  |
//! | `claim_setActiveStatus`   | `[from, id, active]`            |
//! | `claim_claimBatches`      | `[id]`                          |
//! | `claim_batchCount`        | `[]`                            |
//! | `claim_hashLeaf`          | `[entry]`                       |
//! | `claim_isClaimed`         | `[batchId, digest]`             |
//! | `claim_claim`             | `[from, entry, proof, batchId]` |
//! | `claim_balanceOf`         | `[addr]`                        |
//! | `claim_ownerOf`           | `[id]`                          |
//! | `shape_setRailgunAddress` | `[from, addr]`                  |
//! | `shape_railgun`           | `[]`                            |
//! | `shape_setBaseURI`        | `[from, uri]`                   |
//! | `shape_baseURI`           | `[]`                            |
//! | `shape_tokenURI`          | `[id]`                          |
//! | `shape_mint`              | `[from]`                        |
//! | `shape_transferFrom`      | `[from, owner, to, id]`         |
//! | `shape_ownerOf`           | `[id]`                          |
//! | `rail_owner`              | `[]`                            |
//!
//! A contract revert is error `-32000` whose message is the contract
//! error's text, e.g. `"NFTMultiClaim: Invalid Claim"`.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use rail_nft_contracts::{ClaimEntry, ContractError, ContractEvent};
use rail_nft_protocol::token::{LedgerEvent, TokenId};
use rail_nft_protocol::{Address, Bytes32};

use crate::devnet::Devnet;
use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared state for every request handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Reported version string.
    pub version: String,
    /// Network identifier.
    pub network: String,
    /// When the node started serving.
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// The hosted contracts.
    pub devnet: Arc<RwLock<Devnet>>,
    /// Live event fan-out for WebSocket subscribers.
    pub event_tx: broadcast::Sender<NodeEvent>,
    /// Prometheus metrics.
    pub metrics: SharedMetrics,
}

/// Events pushed to WebSocket subscribers, tagged by where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum NodeEvent {
    /// Emitted by the multi-claim contract.
    MultiClaim { event: ContractEvent },
    /// Emitted by the multi-claim contract's ledger.
    MultiClaimLedger { event: LedgerEvent },
    /// Emitted by the shape-shift contract.
    ShapeShift { event: ContractEvent },
    /// Emitted by the shape-shift contract's ledger.
    ShapeShiftLedger { event: LedgerEvent },
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the API router with CORS and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/rpc", post(rpc_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// JSON-RPC Types
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version. Must be "2.0".
    pub jsonrpc: String,
    /// The method to invoke.
    pub method: String,
    /// Positional parameters.
    pub params: Option<Value>,
    /// Request identifier. Echoed back in the response.
    pub id: Value,
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version. Always "2.0".
    pub jsonrpc: String,
    /// The result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    /// Request identifier, echoed from the request.
    pub id: Value,
}

impl JsonRpcResponse {
    fn reply(id: Value, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            jsonrpc: "2.0".into(),
            result,
            error,
            id,
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code.
    pub code: i32,
    /// Short human-readable error description.
    pub message: String,
    /// Optional structured error data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Invalid request.
pub const INVALID_REQUEST: i32 = -32600;
/// Method not found.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid params.
pub const INVALID_PARAMS: i32 = -32602;
/// Internal error.
pub const INTERNAL_ERROR: i32 = -32603;
/// Contract call reverted.
pub const CONTRACT_REVERT: i32 = -32000;

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl From<ContractError> for JsonRpcError {
    fn from(err: ContractError) -> Self {
        JsonRpcError::new(CONTRACT_REVERT, err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// Network identifier.
    pub network: String,
    /// Owner of the multi-claim contract.
    pub claim_owner: Address,
    /// Owner of the shape-shift contract.
    pub shape_owner: Address,
    /// Number of published claim batches.
    pub batch_count: u64,
    /// Tokens issued through claims.
    pub claimed_supply: u64,
    /// Tokens minted on the shape-shift collection.
    pub shape_supply: u64,
    /// Seconds since start.
    pub uptime_secs: i64,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}

/// Result of `claim_claim`: the half-open range of issued token ids.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimReceipt {
    pub leaf: Bytes32,
    pub first_token: TokenId,
    pub end_token: TokenId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — 200 while the process is alive.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// `GET /status` — node and contract summary.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let devnet = state.devnet.read();
    let now = chrono::Utc::now();
    let resp = StatusResponse {
        version: state.version.clone(),
        network: state.network.clone(),
        claim_owner: devnet.multi_claim.owner(),
        shape_owner: devnet.shape_shift.owner(),
        batch_count: devnet.multi_claim.batch_count(),
        claimed_supply: devnet.multi_claim.ledger().total_supply(),
        shape_supply: devnet.shape_shift.ledger().total_supply(),
        uptime_secs: (now - state.started_at).num_seconds(),
        timestamp: now.to_rfc3339(),
    };
    Json(resp)
}

/// `POST /rpc` — JSON-RPC 2.0 gateway.
async fn rpc_handler(
    State(state): State<AppState>,
    Json(req): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    if req.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::reply(
            req.id,
            Err(JsonRpcError::new(
                INVALID_REQUEST,
                "Invalid Request: jsonrpc must be \"2.0\"",
            )),
        ));
    }

    let timer = state.metrics.rpc_latency_seconds.start_timer();
    let outcome = dispatch(&state, &req.method, req.params);
    timer.observe_duration();

    let label = match &outcome {
        Err(e) if e.code == METHOD_NOT_FOUND => "unknown",
        _ => req.method.as_str(),
    };
    state
        .metrics
        .rpc_requests_total
        .with_label_values(&[label])
        .inc();

    if let Err(e) = &outcome {
        tracing::debug!(method = %req.method, code = e.code, message = %e.message, "rpc error");
    }
    Json(JsonRpcResponse::reply(req.id, outcome))
}

/// Decodes positional params into a tuple (or any other array-shaped type).
fn params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(params.unwrap_or_else(|| Value::Array(Vec::new())))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {}", e)))
}

/// Runs `f` under the write lock, then broadcasts whatever events it
/// produced. Events are drained even on failure so nothing stale leaks
/// into the next call; a failed call emits none.
fn with_devnet_mut<R>(
    state: &AppState,
    f: impl FnOnce(&mut Devnet) -> Result<R, ContractError>,
) -> Result<R, JsonRpcError> {
    let (outcome, events) = {
        let mut devnet = state.devnet.write();
        let outcome = f(&mut devnet);
        (outcome, devnet.drain_events())
    };
    for event in events {
        // No subscribers is fine.
        let _ = state.event_tx.send(event);
    }
    outcome.map_err(JsonRpcError::from)
}

/// Routes one JSON-RPC call.
fn dispatch(state: &AppState, method: &str, raw: Option<Value>) -> Result<Value, JsonRpcError> {
    match method {
        // -- multi claim ----------------------------------------------------
        "claim_addClaimBatch" => {
            let (from, root): (Address, Bytes32) = params(raw)?;
            let id = with_devnet_mut(state, |d| d.multi_claim.add_claim_batch(&from, root))?;
            state.metrics.batches_created_total.inc();
            to_json(id)
        }
        "claim_setActiveStatus" => {
            let (from, id, active): (Address, u64, bool) = params(raw)?;
            with_devnet_mut(state, |d| d.multi_claim.set_active_status(&from, id, active))?;
            Ok(Value::Null)
        }
        "claim_claimBatches" => {
            let (id,): (u64,) = params(raw)?;
            let batch = state.devnet.read().multi_claim.claim_batch(id)?;
            to_json(batch)
        }
        "claim_batchCount" => to_json(state.devnet.read().multi_claim.batch_count()),
        "claim_hashLeaf" => {
            let (entry,): (ClaimEntry,) = params(raw)?;
            to_json(state.devnet.read().multi_claim.hash_leaf(&entry))
        }
        "claim_isClaimed" => {
            let (batch_id, digest): (u64, Bytes32) = params(raw)?;
            to_json(state.devnet.read().multi_claim.is_claimed(batch_id, &digest))
        }
        "claim_claim" => {
            // The submitter is recorded in logs only; tokens always go to
            // the entry's claimer.
            let (from, entry, proof, batch_id): (Address, ClaimEntry, Vec<Bytes32>, u64) =
                params(raw)?;
            tracing::debug!(from = %from, batch_id, claimer = %entry.claimer, "claim submitted");
            match with_devnet_mut(state, |d| d.multi_claim.claim(&entry, &proof, batch_id)) {
                Ok(range) => {
                    state.metrics.claims_accepted_total.inc();
                    state.metrics.tokens_issued_total.inc_by(range.end - range.start);
                    to_json(ClaimReceipt {
                        leaf: entry.digest(),
                        first_token: range.start,
                        end_token: range.end,
                    })
                }
                Err(e) => {
                    state.metrics.claims_rejected_total.inc();
                    Err(e)
                }
            }
        }
        "claim_balanceOf" => {
            let (owner,): (Address,) = params(raw)?;
            to_json(state.devnet.read().multi_claim.balance_of(&owner)?)
        }
        "claim_ownerOf" => {
            let (id,): (TokenId,) = params(raw)?;
            to_json(state.devnet.read().multi_claim.owner_of(id)?)
        }

        // -- shape shift ----------------------------------------------------
        "shape_setRailgunAddress" => {
            let (from, railgun): (Address, Address) = params(raw)?;
            with_devnet_mut(state, |d| d.shape_shift.set_railgun_address(&from, railgun))?;
            Ok(Value::Null)
        }
        "shape_railgun" => to_json(state.devnet.read().shape_shift.railgun()),
        "shape_setBaseURI" => {
            let (from, uri): (Address, String) = params(raw)?;
            with_devnet_mut(state, |d| d.shape_shift.set_base_uri(&from, uri))?;
            Ok(Value::Null)
        }
        "shape_baseURI" => to_json(state.devnet.read().shape_shift.base_uri()),
        "shape_tokenURI" => {
            let (id,): (TokenId,) = params(raw)?;
            to_json(state.devnet.read().shape_shift.token_uri(id)?)
        }
        "shape_mint" => {
            let (from,): (Address,) = params(raw)?;
            let id = with_devnet_mut(state, |d| d.shape_shift.mint(&from))?;
            state.metrics.tokens_issued_total.inc();
            to_json(id)
        }
        "shape_transferFrom" => {
            let (from, owner, to, id): (Address, Address, Address, TokenId) = params(raw)?;
            with_devnet_mut(state, |d| d.shape_shift.transfer_from(&from, owner, to, id))?;
            Ok(Value::Null)
        }
        "shape_ownerOf" => {
            let (id,): (TokenId,) = params(raw)?;
            to_json(state.devnet.read().shape_shift.owner_of(id)?)
        }

        // -- node -----------------------------------------------------------
        "rail_owner" => {
            let devnet = state.devnet.read();
            Ok(json!({
                "claim": devnet.multi_claim.owner(),
                "shape": devnet.shape_shift.owner(),
            }))
        }
        _ => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )),
    }
}

/// `GET /ws` — push stream of [`NodeEvent`]s.
///
/// Client messages are ignored.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Forwards broadcast events until the client disconnects or the channel
/// closes.
async fn handle_ws_connection(mut socket: WebSocket, state: AppState) {
    let mut rx = state.event_tx.subscribe();

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(ev) => {
                        let payload = match serde_json::to_string(&ev) {
                            Ok(s) => s,
                            Err(e) => {
                                tracing::warn!("failed to serialize ws event: {}", e);
                                continue;
                            }
                        };
                        if socket.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("ws subscriber lagged by {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }
}
