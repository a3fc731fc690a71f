//! Application builder: wires store, services, triggers and router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use screams_auth::{IdentityGate, JwtDecoder, JwtEncoder, PasswordHasher};
use screams_core::config::AppConfig;
use screams_core::events::EventBus;
use screams_core::result::AppResult;
use screams_database::DocumentDatabase;
use screams_database::repositories::{
    CommentRepository, CredentialRepository, LikeRepository, NotificationRepository,
    ScreamRepository, UserRepository,
};
use screams_service::{NotificationService, ScreamService, UserService};
use screams_triggers::{TriggerDispatcher, TriggerRegistry, TriggerRunner};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// A fully wired application: HTTP state plus the trigger runner that
/// consumes the store's change events.
#[derive(Debug)]
pub struct Application {
    state: AppState,
    runner: Option<Arc<TriggerRunner>>,
}

impl Application {
    /// Connects the configured store and constructs every component.
    ///
    /// When triggers are disabled no runner is created and change events
    /// are discarded.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        // ── Step 1: Store + change events ────────────────────────────
        let (events, stream) = EventBus::new();
        let db = DocumentDatabase::new(&config.store, events).await?;

        // ── Step 2: Triggers ─────────────────────────────────────────
        let runner = if config.triggers.enabled {
            let registry = Arc::new(TriggerRegistry::with_defaults(&db).await);
            let dispatcher = Arc::new(TriggerDispatcher::new(
                registry,
                Duration::from_secs(config.triggers.handler_timeout_seconds),
            ));
            Some(Arc::new(TriggerRunner::new(
                dispatcher,
                stream,
                config.triggers.clone(),
            )))
        } else {
            info!("Triggers disabled");
            drop(stream);
            None
        };

        // ── Step 3: Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let credential_repo = Arc::new(CredentialRepository::new(db.clone()));
        let scream_repo = Arc::new(ScreamRepository::new(db.clone()));
        let comment_repo = Arc::new(CommentRepository::new(db.clone()));
        let like_repo = Arc::new(LikeRepository::new(db.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(db.clone()));

        // ── Step 4: Auth ─────────────────────────────────────────────
        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let identity = Arc::new(IdentityGate::new(
            JwtDecoder::new(&config.auth),
            UserRepository::new(db.clone()),
        ));

        // ── Step 5: Services ─────────────────────────────────────────
        let scream_service = Arc::new(ScreamService::new(
            Arc::clone(&scream_repo),
            Arc::clone(&comment_repo),
            Arc::clone(&like_repo),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&credential_repo),
            Arc::clone(&scream_repo),
            Arc::clone(&like_repo),
            Arc::clone(&notification_repo),
            password_hasher,
            jwt_encoder,
            config.users.default_image_url.clone(),
        ));
        let notification_service = Arc::new(NotificationService::new(notification_repo));

        let state = AppState {
            config: Arc::new(config),
            db,
            identity,
            scream_service,
            user_service,
            notification_service,
        };

        Ok(Self { state, runner })
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The trigger runner, if triggers are enabled.
    pub fn runner(&self) -> Option<&Arc<TriggerRunner>> {
        self.runner.as_ref()
    }

    /// Router with every route and middleware layer applied.
    pub fn router(&self) -> Router {
        build_app(self.state.clone())
    }
}
