//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use screams_auth::IdentityGate;
use screams_core::config::AppConfig;
use screams_database::DocumentDatabase;
use screams_service::{NotificationService, ScreamService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store handle (publishes change events)
    pub db: DocumentDatabase,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verification and caller lookup
    pub identity: Arc<IdentityGate>,

    // ── Services ─────────────────────────────────────────────
    /// Screams, comments and likes
    pub scream_service: Arc<ScreamService>,
    /// Accounts and profiles
    pub user_service: Arc<UserService>,
    /// Notification read state
    pub notification_service: Arc<NotificationService>,
}
