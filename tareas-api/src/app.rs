/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tareas_api::{app::AppState, config::Config};
/// use tareas_shared::store::memory::MemoryStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = tareas_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tareas_shared::{
    auth::{
        jwt::{Claims, JwtError},
        middleware::{authenticate, extract_token, AuthUser, AUTH_TOKEN_HEADER},
    },
    store::Store,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Claims for a freshly issued token with the configured lifetime
    pub fn claims_for(&self, user_id: uuid::Uuid) -> Result<Claims, JwtError> {
        let seconds = self.config.jwt.expiration_seconds;
        let expires_in = chrono::Duration::try_seconds(seconds).ok_or_else(|| {
            JwtError::CreateError(format!("Expiration of {} seconds is out of range", seconds))
        })?;

        Claims::with_expiration(user_id, expires_in)
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Health check (public)
/// └── /api/
///     ├── /usuarios                # POST register (public)
///     ├── /auth                    # POST login (public), GET current user
///     ├── /proyectos               # POST, GET
///     │   └── /:id                 # PUT, DELETE
///     └── /tareas                  # POST, GET ?proyecto=
///         └── /:id                 # PUT, DELETE ?proyecto=
/// ```
///
/// Everything except `/health`, registration and login sits behind the
/// token layer.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let auth_layer = axum::middleware::from_fn_with_state(state.clone(), jwt_auth_layer);

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration and login (public)
    let public_routes = Router::new()
        .route("/usuarios", post(routes::users::register))
        .route("/auth", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/auth", get(routes::auth::authenticated_user))
        .route(
            "/proyectos",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/proyectos/:id",
            put(routes::projects::update_project).delete(routes::projects::delete_project),
        )
        .route(
            "/tareas",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route(
            "/tareas/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route_layer(auth_layer);

    // Both routers register `/auth`, so they are merged method by method
    let api_routes = public_routes.merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                HeaderName::from_static(AUTH_TOKEN_HEADER),
            ])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the token, then injects [`AuthUser`] into
/// request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;
    let user_id = authenticate(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthUser { id: user_id });

    Ok(next.run(req).await)
}
