//! Router assembly

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{catalog, health, personalized_list};
use crate::state::AppState;

/// Build the application router. Cross-cutting layers (CORS, tracing,
/// timeouts) are added by the server binary.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/personalized-list", post(personalized_list::create_list))
        .route("/sessions", post(personalized_list::init_empty))
        .route(
            "/personalized-list/{session_id}",
            get(personalized_list::get_list)
                .put(personalized_list::replace_list)
                .delete(personalized_list::delete_list),
        )
        .route(
            "/personalized-list/share-url/{session_id}",
            get(personalized_list::share_url),
        )
        .route("/personalized-list/qr/{session_id}", get(personalized_list::qr_code))
        .route(
            "/personalized-list/download-qr/{session_id}",
            get(personalized_list::download_qr),
        )
        .route(
            "/personalized-list/export/{session_id}",
            get(personalized_list::export_list),
        )
        .route(
            "/personalized-list/download-text/{session_id}",
            get(personalized_list::download_text),
        )
        .route(
            "/personalized-list/embed/{session_id}",
            get(personalized_list::embed_snippet),
        )
        .route("/apps", get(catalog::list_apps))
        .route("/categories", get(catalog::list_categories))
        .route("/country/{country_code}", get(catalog::country_page));

    Router::new()
        .route("/", get(health::home))
        .route("/healthz", get(health::healthz))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api/v1", api)
        .with_state(state)
}
