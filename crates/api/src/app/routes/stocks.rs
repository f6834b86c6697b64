use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stocks_core::{DomainError, Stock, StockDraft, StockId};

use crate::app::dto::MutationResponse;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/stock", get(get_all_stocks))
        .route("/newstock", post(create_stock))
        .route(
            "/stocks/:id",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
}

fn parse_id(raw: &str) -> Result<StockId, ApiError> {
    Ok(raw.parse::<StockId>()?)
}

pub async fn create_stock(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<StockDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(draft) = body?;
    let id = services.stocks().insert(&draft).await?;
    tracing::info!(stock_id = %id, "stock created");

    Ok((StatusCode::CREATED, Json(MutationResponse::created(id))))
}

pub async fn get_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Stock>, ApiError> {
    let id = parse_id(&id)?;
    let stock = services
        .stocks()
        .get_by_id(id)
        .await?
        .ok_or_else(DomainError::not_found)?;
    Ok(Json(stock))
}

pub async fn get_all_stocks(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Stock>>, ApiError> {
    Ok(Json(services.stocks().get_all().await?))
}

pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<StockDraft>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = parse_id(&id)?;
    let Json(draft) = body?;
    let affected = services.stocks().update(id, &draft).await?;
    tracing::info!(stock_id = %id, rows_affected = affected, "stock updated");

    Ok(Json(MutationResponse::updated(id, affected)))
}

pub async fn delete_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = parse_id(&id)?;
    let affected = services.stocks().delete(id).await?;
    tracing::info!(stock_id = %id, rows_affected = affected, "stock deleted");

    Ok(Json(MutationResponse::deleted(id, affected)))
}
