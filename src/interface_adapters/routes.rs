use crate::domain::entities::ROLE_ADMIN;
use crate::interface_adapters::guard::{AccessPolicy, require_token};
use crate::interface_adapters::handlers::ai::{ai_settings, generate_slides};
use crate::interface_adapters::handlers::auth::login;
use crate::interface_adapters::handlers::presentations::{
    create_presentation, get_presentation, update_presentation,
};
use crate::interface_adapters::handlers::system::{health, status};
use crate::interface_adapters::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app(state: Arc<AppState>) -> Router {
    let authenticated = AccessPolicy::authenticated(Arc::clone(&state.tokens));
    let admin = AccessPolicy::role(Arc::clone(&state.tokens), ROLE_ADMIN);

    // Routes that need an admin token.
    let admin_routes = Router::new()
        .route("/api/presentations", post(create_presentation))
        .route("/api/admin/ai-settings", get(ai_settings))
        .route_layer(middleware::from_fn_with_state(admin, require_token));

    // Routes that need any valid token.
    let user_routes = Router::new()
        .route(
            "/api/presentations/{id}",
            get(get_presentation).put(update_presentation),
        )
        .route("/api/ai/generate", post(generate_slides))
        .route("/api/ai/generate-slides", post(generate_slides))
        .route_layer(middleware::from_fn_with_state(authenticated, require_token));

    Router::new()
        .route("/api/status", get(status))
        .route("/ping", get(status))
        .route("/health", get(health))
        .route("/health/", get(health))
        .route("/api/auth/login", post(login))
        .merge(admin_routes)
        .merge(user_routes)
        .layer(TraceLayer::new_for_http())
        // The browser frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
