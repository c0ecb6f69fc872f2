use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationStatus {
    Active,
    #[default]
    Inactive,
}

impl Display for ActivationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            ActivationStatus::Active => "active",
            ActivationStatus::Inactive => "inactive",
        };
        write!(f, "{}", status)
    }
}

impl ActivationStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => ActivationStatus::Active,
            _ => ActivationStatus::Inactive,
        }
    }
}
