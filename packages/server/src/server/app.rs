//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use catalog::{CatalogOptions, CatalogService};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::kernel::{CatalogAdapter, ExpoAdapter, ServerDeps, SessionHub};
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{jwt_auth_middleware, AuthUser};
use crate::server::routes::stream::stream_handler;
use crate::server::routes::{
    graphql_batch_handler, graphql_handler, graphql_playground, health_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract auth user from request extensions (populated by jwt_auth_middleware)
    let auth_user = request.extensions().get::<AuthUser>().cloned();

    // Create GraphQL context with shared state + per-request auth
    let context = GraphQLContext::new(state.db_pool.clone(), state.server_deps.clone(), auth_user);

    // Add context to request extensions
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
///
/// Returns (Router, Arc<ServerDeps>) - deps are shared with the SSE stream
/// route and available to the binary for anything it drives directly.
pub async fn build_app(
    pool: PgPool,
    expo_access_token: Option<String>,
    catalog_api_base: Option<String>,
    jwt_secret: String,
    jwt_issuer: String,
) -> (Router, Arc<ServerDeps>) {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(&jwt_secret, &jwt_issuer));

    // Catalog client for track metadata on likes and matches
    let catalog_options = catalog_api_base
        .map(|base_url| CatalogOptions { base_url })
        .unwrap_or_default();
    let catalog_service = Arc::new(CatalogService::new(catalog_options));

    let server_deps = Arc::new(ServerDeps::new(
        pool.clone(),
        Arc::new(ExpoAdapter::new(expo_access_token)),
        Arc::new(CatalogAdapter::new(catalog_service)),
        jwt_service.clone(),
        SessionHub::new(),
    ));

    // Create shared app state
    let app_state = AxumAppState {
        db_pool: pool,
        server_deps: server_deps.clone(),
        jwt_service: jwt_service.clone(),
    };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Clone jwt_service for middleware closure
    let jwt_service_for_middleware = jwt_service.clone();

    // Build router
    let mut router = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    let app = router
        // Health check
        .route("/health", get(health_handler))
        // Live session stream (SSE)
        .route("/api/streams/:topic", get(stream_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context)) // Create GraphQL context
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        })) // JWT authentication
        .layer(Extension(app_state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State (schema for GraphQL handlers)
        .with_state(schema);

    (app, server_deps)
}
