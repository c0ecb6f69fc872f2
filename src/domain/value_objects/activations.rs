use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    activation_records::ActivationRecordEntity, published_campaigns::PublishedCampaignEntity,
};
use crate::domain::value_objects::enums::{
    activation_statuses::ActivationStatus, campaign_statuses::CampaignStatus,
    check_in_methods::CheckInMethod,
};

/// Mission parameters supplied by the business at activation time. Stored on
/// the activation record and denormalized into the published campaign.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ActivationConfig {
    pub reward: i32,
    pub max_participants: i32,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cooldown_hours: i32,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub check_in_method: Option<CheckInMethod>,
}

impl ActivationConfig {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), String> {
        if self.reward <= 0 {
            return Err("reward must be positive".to_string());
        }
        if self.max_participants <= 0 {
            return Err("max_participants must be positive".to_string());
        }
        if self.cooldown_hours < 0 {
            return Err("cooldown_hours must not be negative".to_string());
        }
        if let Some(valid_until) = self.valid_until {
            if valid_until <= now {
                return Err("valid_until must be in the future".to_string());
            }
        }
        Ok(())
    }
}

/// Request body for the activate operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivateMissionModel {
    pub account_id: Uuid,
    pub template_id: Uuid,
    pub config: ActivationConfig,
}

/// Request body for the deactivate operation.
#[derive(Debug, Clone, Deserialize)]
pub struct DeactivateMissionModel {
    pub account_id: Uuid,
    pub template_id: Uuid,
}

/// Discriminated result of an activate call. Both variants are successes:
/// `AlreadyActive` is the idempotent short-circuit and callers reconcile
/// their local state to "active" instead of surfacing a failure.
#[derive(Debug, Clone)]
pub enum ActivationOutcome {
    Activated {
        record: ActivationRecordEntity,
        campaign: PublishedCampaignEntity,
    },
    AlreadyActive {
        record: ActivationRecordEntity,
    },
}

/// Discriminated result of a deactivate call. `NotActive` and `NotFound` are
/// idempotent no-ops, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationOutcome {
    Deactivated,
    NotActive,
    NotFound,
}

/// Read-path row: activation status joined with the sibling campaign so the
/// UI can render an "active — QR Only" badge without re-deriving rules.
#[derive(Debug, Clone, Serialize)]
pub struct MissionStatusDto {
    pub activation_id: Uuid,
    pub template_id: Uuid,
    pub status: ActivationStatus,
    pub reward: i32,
    pub max_participants: i32,
    pub valid_until: Option<DateTime<Utc>>,
    pub cooldown_hours: i32,
    pub requires_approval: bool,
    pub check_in_method: Option<CheckInMethod>,
    pub campaign_id: Option<Uuid>,
    pub campaign_status: Option<CampaignStatus>,
    pub created_at: DateTime<Utc>,
}

impl MissionStatusDto {
    pub fn from_pair(
        record: &ActivationRecordEntity,
        campaign: Option<&PublishedCampaignEntity>,
    ) -> Self {
        Self {
            activation_id: record.id,
            template_id: record.template_id,
            status: record.status(),
            reward: record.reward,
            max_participants: record.max_participants,
            valid_until: record.valid_until,
            cooldown_hours: record.cooldown_hours,
            requires_approval: record.requires_approval,
            check_in_method: record.check_in_method(),
            campaign_id: campaign.map(|campaign| campaign.id),
            campaign_status: campaign.map(|campaign| campaign.status()),
            created_at: record.created_at,
        }
    }
}

/// Catalog row for the template listing.
#[derive(Debug, Clone, Serialize)]
pub struct MissionTemplateDto {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub required_connections: Vec<String>,
    pub is_presence_verified: bool,
}
