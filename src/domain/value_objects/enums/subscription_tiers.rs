use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Paid plan tier for level >= 2 business accounts. Assigned by the external
/// billing flow; this subsystem only reads it.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    #[default]
    Starter,
    Silver,
    Gold,
    Platinum,
}

impl Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = match self {
            SubscriptionTier::Starter => "starter",
            SubscriptionTier::Silver => "silver",
            SubscriptionTier::Gold => "gold",
            SubscriptionTier::Platinum => "platinum",
        };
        write!(f, "{}", tier)
    }
}

impl SubscriptionTier {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "starter" => Some(SubscriptionTier::Starter),
            "silver" => Some(SubscriptionTier::Silver),
            "gold" => Some(SubscriptionTier::Gold),
            "platinum" => Some(SubscriptionTier::Platinum),
            _ => None,
        }
    }
}
