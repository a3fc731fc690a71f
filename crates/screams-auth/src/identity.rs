//! Resolution of a bearer token to the calling user.

use serde::{Deserialize, Serialize};
use tracing::debug;

use screams_core::error::AppError;
use screams_core::result::AppResult;
use screams_database::repositories::UserRepository;

use crate::jwt::JwtDecoder;

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id (token subject).
    pub user_id: String,
    /// Email from the token.
    pub email: String,
    /// The user's handle.
    pub handle: String,
    /// The user's current profile image URL.
    pub image_url: String,
}

/// Verifies tokens and looks up the user they belong to.
#[derive(Debug, Clone)]
pub struct IdentityGate {
    decoder: JwtDecoder,
    users: UserRepository,
}

impl IdentityGate {
    /// Creates a gate over a token decoder and the user repository.
    pub fn new(decoder: JwtDecoder, users: UserRepository) -> Self {
        Self { decoder, users }
    }

    /// Resolve a raw bearer token.
    ///
    /// Any failure (bad signature, expiry, unknown user) is `Unauthorized`.
    pub async fn authenticate(&self, token: &str) -> AppResult<Identity> {
        let claims = self.decoder.decode(token)?;

        let user = self
            .users
            .find_by_user_id(claims.user_id())
            .await?
            .ok_or_else(|| {
                debug!(user_id = %claims.sub, "Token subject has no profile");
                AppError::unauthorized("Unauthorized")
            })?;

        Ok(Identity {
            user_id: user.user_id,
            email: claims.email,
            handle: user.handle,
            image_url: user.image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use screams_core::config::AuthConfig;
    use screams_core::error::ErrorKind;
    use screams_core::events::EventBus;
    use screams_database::DocumentDatabase;
    use screams_entity::{Credential, User};

    use crate::jwt::JwtEncoder;

    async fn gate_with_alice() -> (IdentityGate, JwtEncoder) {
        let (bus, _stream) = EventBus::new();
        let users = UserRepository::new(DocumentDatabase::in_memory(bus));
        users
            .register(
                &User {
                    handle: "alice".into(),
                    user_id: "uid-alice".into(),
                    email: "alice@example.com".into(),
                    created_at: Utc::now(),
                    image_url: "https://img/alice.png".into(),
                    bio: None,
                    website: None,
                    location: None,
                },
                &Credential {
                    email: "alice@example.com".into(),
                    user_id: "uid-alice".into(),
                    handle: "alice".into(),
                    password_hash: "hash".into(),
                    created_at: Utc::now(),
                },
            )
            .await
            .expect("register");

        let cfg = AuthConfig::default();
        (
            IdentityGate::new(JwtDecoder::new(&cfg), users),
            JwtEncoder::new(&cfg),
        )
    }

    #[tokio::test]
    async fn test_resolves_handle_and_image() {
        let (gate, encoder) = gate_with_alice().await;
        let (token, _) = encoder.issue("uid-alice", "alice@example.com").expect("issue");
        let identity = gate.authenticate(&token).await.expect("authenticate");
        assert_eq!(identity.handle, "alice");
        assert_eq!(identity.image_url, "https://img/alice.png");
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthorized() {
        let (gate, encoder) = gate_with_alice().await;
        let (token, _) = encoder.issue("uid-ghost", "ghost@example.com").expect("issue");
        let err = gate.authenticate(&token).await.expect_err("no profile");
        assert!(err.is(ErrorKind::Unauthorized));
    }
}
