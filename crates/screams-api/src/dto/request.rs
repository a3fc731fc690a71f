//! Request DTOs.
//!
//! Missing string fields default to empty so the services can answer with
//! their own field messages instead of a deserialization failure.

use serde::{Deserialize, Serialize};
use validator::Validate;

use screams_entity::UserDetails;
use screams_service::user::{LoginInput, SignupInput};

/// `POST /screams` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateScreamRequest {
    /// Scream text.
    #[serde(default)]
    pub body: String,
}

/// `POST /scream/{id}/comment` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    /// Comment text.
    #[serde(default)]
    pub body: String,
}

/// `POST /signup` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Repeated password.
    pub confirm_password: String,
    /// Desired handle.
    pub handle: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            handle: req.handle,
        }
    }
}

/// `POST /login` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

/// `POST /users/image` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetImageRequest {
    /// New profile image location.
    #[serde(default)]
    #[validate(url(message = "Must be a valid URL"))]
    pub image_url: String,
}

/// `POST /users` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddDetailsRequest {
    /// Biography.
    pub bio: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Location.
    pub location: Option<String>,
}

impl From<AddDetailsRequest> for UserDetails {
    fn from(req: AddDetailsRequest) -> Self {
        Self {
            bio: req.bio,
            website: req.website,
            location: req.location,
        }
    }
}
