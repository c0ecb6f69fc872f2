use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::value_objects::enums::mission_kinds::MissionKind;
use crate::infrastructure::postgres::schema::mission_templates;

/// Catalog entry for a customer-facing mission type. Not business-owned.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = mission_templates)]
pub struct MissionTemplateEntity {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub required_connections: serde_json::Value,
    pub is_presence_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl MissionTemplateEntity {
    pub fn kind(&self) -> Option<MissionKind> {
        MissionKind::from_str(&self.kind)
    }

    /// Capability tags the activating account must have linked. Stored as a
    /// JSONB string array; an absent or malformed value means no requirement.
    pub fn required_connection_tags(&self) -> Vec<String> {
        serde_json::from_value(self.required_connections.clone()).unwrap_or_default()
    }
}
