use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::value_objects::enums::campaign_statuses::CampaignStatus;
use crate::infrastructure::postgres::schema::published_campaigns;

/// Customer-visible resource derived from an active activation record.
/// Sibling of the record, linked by `(account_id, template_id)`, never its
/// child: the two may fall out of sync on partial failure and are reconciled
/// independently.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = published_campaigns)]
pub struct PublishedCampaignEntity {
    pub id: Uuid,
    pub account_id: Uuid,
    pub template_id: Uuid,
    pub status: String,
    pub reward: i32,
    pub max_participants: i32,
    pub valid_until: Option<DateTime<Utc>>,
    pub cooldown_hours: i32,
    pub requires_approval: bool,
    pub check_in_method: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedCampaignEntity {
    pub fn status(&self) -> CampaignStatus {
        CampaignStatus::from_str(&self.status)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = published_campaigns)]
pub struct InsertPublishedCampaignEntity {
    pub account_id: Uuid,
    pub template_id: Uuid,
    pub status: String,
    pub reward: i32,
    pub max_participants: i32,
    pub valid_until: Option<DateTime<Utc>>,
    pub cooldown_hours: i32,
    pub requires_approval: bool,
    pub check_in_method: Option<String>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
