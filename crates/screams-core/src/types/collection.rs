//! Named document collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The collections known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Short text posts.
    Screams,
    /// Comments on screams.
    Comments,
    /// One like per (user, scream).
    Likes,
    /// Like/comment notifications, keyed by the source document id.
    Notifications,
    /// User profiles, keyed by handle.
    Users,
    /// Login credentials, keyed by lower-cased email.
    Credentials,
}

impl Collection {
    /// All collections, in declaration order.
    pub const ALL: [Collection; 6] = [
        Self::Screams,
        Self::Comments,
        Self::Likes,
        Self::Notifications,
        Self::Users,
        Self::Credentials,
    ];

    /// Return the collection name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Screams => "screams",
            Self::Comments => "comments",
            Self::Likes => "likes",
            Self::Notifications => "notifications",
            Self::Users => "users",
            Self::Credentials => "credentials",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::database(format!("Unknown collection '{s}'")))
    }
}
