use serde::{Deserialize, Serialize};

/// A connection a template requires and the account has not linked.
///
/// This is a contract with the caller, not a free-text message: the UI
/// renders "connect your X" deep links off the stable `tag` without parsing
/// any error string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionRequirement {
    pub tag: String,
    pub display_name: String,
    pub description: String,
}

impl ConnectionRequirement {
    /// Builds the displayable requirement for a capability tag. Unknown tags
    /// still produce a usable requirement so a new provider in the catalog
    /// never breaks the gate.
    pub fn for_tag(tag: &str) -> Self {
        let (display_name, description) = match tag {
            "google-business" => (
                "Google Business Profile",
                "Link your Google Business Profile so customers can find and review your business.",
            ),
            "instagram" => (
                "Instagram",
                "Link your Instagram business account so follow and photo missions can be verified.",
            ),
            "facebook" => (
                "Facebook Page",
                "Link your Facebook page so follow missions can be verified.",
            ),
            "tiktok" => (
                "TikTok",
                "Link your TikTok business account so video missions can be verified.",
            ),
            _ => ("External account", "Link the required external account."),
        };

        Self {
            tag: tag.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Result of the connection gate. Missing connections are an expected,
/// user-actionable branch and are represented as data, never as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    Satisfied,
    Missing(ConnectionRequirement),
}
