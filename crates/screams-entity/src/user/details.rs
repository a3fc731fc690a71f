//! Optional profile details.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use screams_core::types::Fields;

/// Optional profile fields a user can edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Free-form biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Personal website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UserDetails {
    /// Trim every field, drop blank ones and give a scheme-less website an
    /// `http://` prefix.
    pub fn reduce(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let website = clean(self.website).map(|site| {
            if site.starts_with("http") {
                site
            } else {
                format!("http://{site}")
            }
        });

        Self {
            bio: clean(self.bio),
            website,
            location: clean(self.location),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.website.is_none() && self.location.is_none()
    }

    /// The set fields as a store update.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        for (key, value) in [
            ("bio", &self.bio),
            ("website", &self.website),
            ("location", &self.location),
        ] {
            if let Some(v) = value {
                fields.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_trims_and_drops_blanks() {
        let details = UserDetails {
            bio: Some("  hello  ".into()),
            website: Some("   ".into()),
            location: None,
        }
        .reduce();
        assert_eq!(details.bio.as_deref(), Some("hello"));
        assert!(details.website.is_none());
        assert_eq!(details.to_fields().len(), 1);
    }

    #[test]
    fn test_reduce_prefixes_website() {
        let details = UserDetails {
            website: Some("example.com".into()),
            ..Default::default()
        }
        .reduce();
        assert_eq!(details.website.as_deref(), Some("http://example.com"));

        let details = UserDetails {
            website: Some("https://example.com".into()),
            ..Default::default()
        }
        .reduce();
        assert_eq!(details.website.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_empty() {
        assert!(UserDetails::default().reduce().is_empty());
    }
}
