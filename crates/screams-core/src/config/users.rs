//! User profile defaults.

use serde::{Deserialize, Serialize};

/// Defaults applied to newly signed-up users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersConfig {
    /// Image URL assigned at sign-up until the user sets their own.
    #[serde(default = "default_image_url")]
    pub default_image_url: String,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_image_url: default_image_url(),
        }
    }
}

fn default_image_url() -> String {
    "https://storage.screams.local/images/no-img.png".to_string()
}
