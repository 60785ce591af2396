use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::models::{AddressInfo, Block, ChainStats, Transaction};
use crate::serve_stats::{ServeSnapshot, SERVE_STATS};
use crate::service::{Explorer, DEFAULT_HISTORY_LEN};

#[derive(Clone)]
pub struct AppState {
    pub explorer: Arc<Explorer>,
    pub default_chain: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct BlocksResponse {
    blocks: Vec<Block>,
}

#[derive(Serialize)]
struct TransactionsResponse {
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct BlocksQuery {
    page: Option<u64>,
    page_size: Option<u64>,
    query: Option<String>,
}

#[derive(Deserialize)]
struct ChainCountQuery {
    chain: Option<String>,
    count: Option<u64>,
}

#[derive(Deserialize)]
struct HistoryQuery {
    count: Option<usize>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn list_blocks(
    State(state): State<AppState>,
    Query(params): Query<BlocksQuery>,
) -> Json<BlocksResponse> {
    let blocks = state
        .explorer
        .list_blocks(
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(10),
            params.query.as_deref(),
        )
        .await;
    Json(BlocksResponse { blocks })
}

async fn latest_blocks(
    State(state): State<AppState>,
    Query(params): Query<ChainCountQuery>,
) -> Json<BlocksResponse> {
    let chain = params.chain.unwrap_or_else(|| state.default_chain.clone());
    let blocks = state
        .explorer
        .latest_blocks(&chain, params.count.unwrap_or(10))
        .await;
    Json(BlocksResponse { blocks })
}

async fn latest_transactions(
    State(state): State<AppState>,
    Query(params): Query<ChainCountQuery>,
) -> Json<TransactionsResponse> {
    let chain = params.chain.unwrap_or_else(|| state.default_chain.clone());
    let transactions = state
        .explorer
        .latest_transactions(&chain, params.count.unwrap_or(10))
        .await;
    Json(TransactionsResponse { transactions })
}

async fn transaction_by_hash(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Json<Transaction> {
    Json(state.explorer.transaction_by_hash(&hash).await)
}

async fn address_info(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<AddressInfo> {
    Json(state.explorer.address_info(&address).await)
}

async fn address_history(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Json<TransactionsResponse> {
    let transactions = state
        .explorer
        .address_history(&address, params.count.unwrap_or(DEFAULT_HISTORY_LEN))
        .await;
    Json(TransactionsResponse { transactions })
}

async fn chain_stats(
    State(state): State<AppState>,
    Path(chain): Path<String>,
) -> Json<ChainStats> {
    Json(state.explorer.stats(&chain).await)
}

async fn serve_stats() -> Json<ServeSnapshot> {
    Json(SERVE_STATS.snapshot())
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/blocks", get(list_blocks))
        .route("/blocks/latest", get(latest_blocks))
        .route("/tx/latest", get(latest_transactions))
        .route("/tx/:hash", get(transaction_by_hash))
        .route("/address/:address", get(address_info))
        .route("/address/:address/txs", get(address_history))
        .route("/stats/serve", get(serve_stats))
        .route("/stats/:chain", get(chain_stats))
        .with_state(state)
}

pub async fn run_http_server(addr: &str, state: AppState) -> Result<()> {
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
