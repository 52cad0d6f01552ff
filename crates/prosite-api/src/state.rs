//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use prosite_auth::jwt::{JwtDecoder, JwtEncoder};
use prosite_auth::password::PasswordHasher;
use prosite_auth::scope::ScopeGate;
use prosite_core::config::AppConfig;
use prosite_database::repositories::UserRepository;
use prosite_service::auth::AuthService;

use crate::events::EventHub;
use crate::middleware::scope::ScopePolicy;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks. The auth configuration is
/// read once at startup; nothing here re-reads the environment per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Token signer.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// Token validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2id).
    pub password_hasher: Arc<PasswordHasher>,
    /// Authorization gate over validated claims.
    pub scope_gate: Arc<ScopeGate>,
    /// Declarative route → required-scope table.
    pub scope_policy: Arc<ScopePolicy>,
    /// User repository.
    pub user_repo: Arc<UserRepository>,
    /// Login orchestration service.
    pub auth_service: Arc<AuthService>,
    /// Broadcast hub for the WebSocket events channel.
    pub event_hub: Arc<EventHub>,
}

impl AppState {
    /// Wires the full dependency graph from configuration and a pool.
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let scope_gate = Arc::new(ScopeGate::from_config(&config.auth));
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            password_hasher.clone(),
            jwt_encoder.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            scope_gate,
            scope_policy: Arc::new(ScopePolicy::default()),
            user_repo,
            auth_service,
            event_hub: Arc::new(EventHub::new()),
        }
    }

    /// Replaces the route-scope table, for deployments that mount extra
    /// route groups with their own requirements.
    pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
        self.scope_policy = Arc::new(policy);
        self
    }
}
