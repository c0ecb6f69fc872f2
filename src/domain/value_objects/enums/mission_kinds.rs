use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Explicit kind tag carried on every mission template from creation. Behavior
/// is routed by this tag, never re-derived from display text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    Follow,
    Review,
    Photo,
    Video,
    Event,
    CheckIn,
}

impl Display for MissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            MissionKind::Follow => "follow",
            MissionKind::Review => "review",
            MissionKind::Photo => "photo",
            MissionKind::Video => "video",
            MissionKind::Event => "event",
            MissionKind::CheckIn => "check_in",
        };
        write!(f, "{}", kind)
    }
}

impl MissionKind {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "follow" => Some(MissionKind::Follow),
            "review" => Some(MissionKind::Review),
            "photo" => Some(MissionKind::Photo),
            "video" => Some(MissionKind::Video),
            "event" => Some(MissionKind::Event),
            "check_in" => Some(MissionKind::CheckIn),
            _ => None,
        }
    }
}
