use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use super::decision::{DecisionDocument, DecisionReceipt};
use super::domain::CanonicalQuote;
use super::insights::InsightsProvider;
use super::service::QuoteDecisionService;
use crate::error::AppError;

/// Envelope accepted by `/receive`.
#[derive(Debug, Deserialize)]
pub struct ReceiveRequest {
    pub data: Value,
}

/// Router exposing the quote pipeline over HTTP.
pub fn quote_router<P>(service: Arc<QuoteDecisionService<P>>) -> Router
where
    P: InsightsProvider + ?Sized + 'static,
{
    Router::new()
        .route("/", get(home_handler))
        .route("/receive", post(receive_handler::<P>))
        .route("/api/v1/quotes/decision", post(decision_handler::<P>))
        .route("/api/v1/quotes/normalize", post(normalize_handler::<P>))
        .with_state(service)
}

pub(crate) async fn home_handler() -> Json<Value> {
    Json(json!({ "message": "OptimaAI Underwriter is running" }))
}

pub(crate) async fn receive_handler<P>(
    State(service): State<Arc<QuoteDecisionService<P>>>,
    request: Result<Json<ReceiveRequest>, JsonRejection>,
) -> Result<Json<DecisionReceipt>, AppError>
where
    P: InsightsProvider + ?Sized + 'static,
{
    let Json(request) = request?;
    let document = run_pipeline(service, request.data).await?;
    Ok(Json(document.receipt()))
}

pub(crate) async fn decision_handler<P>(
    State(service): State<Arc<QuoteDecisionService<P>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DecisionDocument>, AppError>
where
    P: InsightsProvider + ?Sized + 'static,
{
    let Json(payload) = payload?;
    let document = run_pipeline(service, payload).await?;
    Ok(Json(document))
}

pub(crate) async fn normalize_handler<P>(
    State(service): State<Arc<QuoteDecisionService<P>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CanonicalQuote>, AppError>
where
    P: InsightsProvider + ?Sized + 'static,
{
    let Json(payload) = payload?;
    Ok(Json(service.normalize(payload)?))
}

async fn run_pipeline<P>(
    service: Arc<QuoteDecisionService<P>>,
    payload: Value,
) -> Result<DecisionDocument, AppError>
where
    P: InsightsProvider + ?Sized + 'static,
{
    let document = tokio::task::spawn_blocking(move || service.decide(payload))
        .await
        .map_err(|err| {
            error!(error = %err, "quote pipeline task failed");
            AppError::from(err)
        })??;
    Ok(document)
}
