use axum::Router;

pub mod stocks;
pub mod system;

/// Router for all API endpoints.
pub fn router() -> Router {
    Router::new().nest("/api", stocks::router())
}
