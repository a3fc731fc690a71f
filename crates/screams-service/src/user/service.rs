//! User operations: sign-up, login and profile management.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use screams_auth::{JwtEncoder, PasswordHasher};
use screams_core::error::{AppError, ErrorKind};
use screams_core::result::AppResult;
use screams_database::repositories::{
    CredentialRepository, LikeRepository, NotificationRepository, ScreamRepository,
    UserRepository,
};
use screams_entity::{Credential, Like, Notification, Scream, User, UserDetails};

use super::validation::{validate_login, validate_signup};
use crate::context::RequestContext;

/// Number of notifications returned with the authenticated user.
pub const RECENT_NOTIFICATIONS: usize = 10;

const WRONG_CREDENTIALS: &str = "Wrong credentials, please try again";

/// Sign-up request fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Desired handle.
    pub handle: String,
}

/// Login request fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// An issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Signed JWT.
    pub token: String,
}

/// The caller's own profile with their likes and latest notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Profile document.
    pub credentials: User,
    /// Every like the caller has given.
    pub likes: Vec<Like>,
    /// Latest notifications addressed to the caller, newest first.
    pub notifications: Vec<Notification>,
}

/// A user's public profile and screams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Profile document.
    pub user: User,
    /// The user's screams, newest first.
    pub screams: Vec<Scream>,
}

/// Handles account and profile use cases.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
    credentials: Arc<CredentialRepository>,
    screams: Arc<ScreamRepository>,
    likes: Arc<LikeRepository>,
    notifications: Arc<NotificationRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    default_image_url: String,
}

impl UserService {
    /// Creates a new user service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        credentials: Arc<CredentialRepository>,
        screams: Arc<ScreamRepository>,
        likes: Arc<LikeRepository>,
        notifications: Arc<NotificationRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        default_image_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            credentials,
            screams,
            likes,
            notifications,
            hasher,
            encoder,
            default_image_url: default_image_url.into(),
        }
    }

    /// Registers a new account and returns a token for it.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthToken> {
        validate_signup(
            &input.email,
            &input.password,
            &input.confirm_password,
            &input.handle,
        )?;

        let handle = input.handle.trim().to_string();
        let email = Credential::key_for(&input.email);

        if self.users.find_by_handle(&handle).await?.is_some() {
            return Err(handle_taken());
        }
        if self.credentials.find_by_email(&email).await?.is_some() {
            return Err(email_taken());
        }

        let now = Utc::now();
        let user_id = Uuid::new_v4().to_string();
        let credential = Credential {
            email: email.clone(),
            user_id: user_id.clone(),
            handle: handle.clone(),
            password_hash: self.hasher.hash_password(&input.password)?,
            created_at: now,
        };
        let user = User {
            handle: handle.clone(),
            user_id: user_id.clone(),
            email: email.clone(),
            created_at: now,
            image_url: self.default_image_url.clone(),
            bio: None,
            website: None,
            location: None,
        };

        // A concurrent sign-up can still take the handle or email between the
        // checks above and this commit; the batch then fails as a whole.
        self.users
            .register(&user, &credential)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => handle_or_email_taken(),
                _ => e,
            })?;

        let (token, _) = self.encoder.issue(&user_id, &email)?;
        info!(handle = %handle, "User signed up");
        Ok(AuthToken { token })
    }

    /// Exchanges email and password for a token.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthToken> {
        validate_login(&input.email, &input.password)?;

        let credential = self
            .credentials
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                debug!("Login for unknown email");
                AppError::forbidden(WRONG_CREDENTIALS)
            })?;

        if !self
            .hasher
            .verify_password(&input.password, &credential.password_hash)?
        {
            debug!(handle = %credential.handle, "Login with wrong password");
            return Err(AppError::forbidden(WRONG_CREDENTIALS));
        }

        let (token, _) = self.encoder.issue(&credential.user_id, &credential.email)?;
        info!(handle = %credential.handle, "User logged in");
        Ok(AuthToken { token })
    }

    /// Replaces the caller's profile image URL.
    pub async fn set_image(&self, ctx: &RequestContext, image_url: &str) -> AppResult<()> {
        self.users.update_image(&ctx.handle, image_url).await?;
        info!(handle = %ctx.handle, "Profile image updated");
        Ok(())
    }

    /// Merges cleaned-up optional details into the caller's profile.
    pub async fn add_details(&self, ctx: &RequestContext, details: UserDetails) -> AppResult<()> {
        let details = details.reduce();
        self.users.update_details(&ctx.handle, &details).await?;
        info!(handle = %ctx.handle, "Profile details updated");
        Ok(())
    }

    /// The caller's profile, likes and latest notifications.
    pub async fn authenticated_user(&self, ctx: &RequestContext) -> AppResult<AuthenticatedUser> {
        let credentials = self
            .users
            .find_by_handle(&ctx.handle)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let likes = self.likes.find_by_user(&ctx.handle).await?;
        let notifications = self
            .notifications
            .find_for_recipient(&ctx.handle, RECENT_NOTIFICATIONS)
            .await?;

        Ok(AuthenticatedUser {
            credentials,
            likes,
            notifications,
        })
    }

    /// Any user's public profile and screams.
    pub async fn user_details(&self, handle: &str) -> AppResult<UserProfile> {
        let user = self
            .users
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let screams = self.screams.find_by_author(handle).await?;
        Ok(UserProfile { user, screams })
    }
}

fn handle_taken() -> AppError {
    AppError::conflict("This handle is already taken")
        .with_details(json!({ "handle": "This handle is already taken" }))
}

fn email_taken() -> AppError {
    AppError::conflict("Email is already in use")
        .with_details(json!({ "email": "Email is already in use" }))
}

fn handle_or_email_taken() -> AppError {
    AppError::conflict("Handle or email is already taken")
}

#[cfg(test)]
mod tests {
    use super::*;
    use screams_auth::JwtDecoder;
    use screams_core::config::AuthConfig;
    use screams_core::events::EventBus;
    use screams_database::DocumentDatabase;

    fn service() -> UserService {
        let (bus, _stream) = EventBus::new();
        let db = DocumentDatabase::in_memory(bus);
        UserService::new(
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(CredentialRepository::new(db.clone())),
            Arc::new(ScreamRepository::new(db.clone())),
            Arc::new(LikeRepository::new(db.clone())),
            Arc::new(NotificationRepository::new(db)),
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&AuthConfig::default())),
            "https://img/default.png",
        )
    }

    fn signup(email: &str, handle: &str) -> SignupInput {
        SignupInput {
            email: email.into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            handle: handle.into(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let svc = service();
        let token = svc
            .signup(signup("Alice@Example.com", "alice"))
            .await
            .expect("signup");
        let claims = JwtDecoder::new(&AuthConfig::default())
            .decode(&token.token)
            .expect("decode");
        assert_eq!(claims.email, "alice@example.com");

        svc.login(LoginInput {
            email: "alice@example.com".into(),
            password: "secret".into(),
        })
        .await
        .expect("login");

        let profile = svc.user_details("alice").await.expect("profile");
        assert_eq!(profile.user.image_url, "https://img/default.png");
        assert_eq!(profile.user.user_id, claims.sub);
    }

    #[tokio::test]
    async fn test_taken_handle_and_email() {
        let svc = service();
        svc.signup(signup("alice@example.com", "alice"))
            .await
            .expect("signup");

        let err = svc
            .signup(signup("other@example.com", "alice"))
            .await
            .expect_err("handle taken");
        assert!(err.is(ErrorKind::Conflict));
        assert!(err.details.as_ref().is_some_and(|d| d.get("handle").is_some()));

        let err = svc
            .signup(signup("ALICE@example.com", "alice2"))
            .await
            .expect_err("email taken");
        assert!(err.details.as_ref().is_some_and(|d| d.get("email").is_some()));
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_forbidden() {
        let svc = service();
        svc.signup(signup("alice@example.com", "alice"))
            .await
            .expect("signup");

        for (email, password) in [("alice@example.com", "wrong"), ("ghost@example.com", "secret")] {
            let err = svc
                .login(LoginInput {
                    email: email.into(),
                    password: password.into(),
                })
                .await
                .expect_err("bad credentials");
            assert!(err.is(ErrorKind::Forbidden));
            assert_eq!(err.message, WRONG_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_add_details_reduces() {
        let svc = service();
        svc.signup(signup("alice@example.com", "alice"))
            .await
            .expect("signup");
        let ctx = RequestContext::new("uid", "alice", "img");
        svc.add_details(
            &ctx,
            UserDetails {
                bio: Some(" hi ".into()),
                website: Some("example.com".into()),
                location: Some("".into()),
            },
        )
        .await
        .expect("details");

        let me = svc.authenticated_user(&ctx).await.expect("me");
        assert_eq!(me.credentials.bio.as_deref(), Some("hi"));
        assert_eq!(me.credentials.website.as_deref(), Some("http://example.com"));
        assert!(me.credentials.location.is_none());
        assert!(me.likes.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_details() {
        let err = service().user_details("ghost").await.expect_err("missing");
        assert!(err.is(ErrorKind::NotFound));
        assert_eq!(err.message, "User not found");
    }
}
