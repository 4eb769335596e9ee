//! Application router configuration.

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_TYPE},
    },
    middleware,
    routing::{delete, get},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{
    AppState,
    config::{Mode, RouterConfig},
    endpoints,
    logging::logging_middleware,
    method_not_allowed::get_405_method_not_allowed,
    not_found::get_404_not_found,
    transaction::{
        delete_transaction_endpoint, list_transactions_endpoint, post_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The transaction collection can be listed with either `GET` or an empty
/// `POST`, so clients written against either convention keep working.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let router = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(post_transactions_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .method_not_allowed_fallback(get_405_method_not_allowed);

    let router = match (config.mode, &config.static_dir) {
        (Mode::Production, Some(static_dir)) => {
            tracing::info!("Serving static files from {}", static_dir.display());
            let index = ServeFile::new(static_dir.join("index.html"));
            router.fallback_service(ServeDir::new(static_dir).fallback(index))
        }
        _ => router.fallback(get_404_not_found),
    };

    let router = match config.mode {
        Mode::Development => router.layer(middleware::from_fn(logging_middleware)),
        Mode::Production => router,
    };

    let router = match config.cors_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE, ACCEPT])
                .allow_credentials(true),
        ),
        Some(Err(error)) => {
            tracing::warn!("Ignoring invalid CORS origin {:?}: {error}", config.cors_origin);
            router
        }
        None => router,
    };

    router.with_state(state)
}
