use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Published,
    Paused,
    Ended,
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Published => "published",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Ended => "ended",
        };
        write!(f, "{}", status)
    }
}

impl CampaignStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "draft" => CampaignStatus::Draft,
            "published" => CampaignStatus::Published,
            "paused" => CampaignStatus::Paused,
            _ => CampaignStatus::Ended,
        }
    }
}
