pub mod todos;

use axum::{routing::get, Router};

use super::cors;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .layer(cors::cors_layer())
}
