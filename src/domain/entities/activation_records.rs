use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    activation_statuses::ActivationStatus, check_in_methods::CheckInMethod,
};
use crate::infrastructure::postgres::schema::activation_records;

/// Entitlement-side resource: "this account has turned this template on".
/// At most one row exists per `(account_id, template_id)`, and at most one of
/// them is ever `active`.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = activation_records)]
pub struct ActivationRecordEntity {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivationRecordEntity {
    pub fn status(&self) -> ActivationStatus {
        ActivationStatus::from_str(&self.status)
    }

    pub fn check_in_method(&self) -> Option<CheckInMethod> {
        self.check_in_method
            .as_deref()
            .and_then(CheckInMethod::from_str)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activation_records)]
pub struct InsertActivationRecordEntity {
    pub account_id: Uuid,
    pub template_id: Uuid,
    pub status: String,
    pub reward: i32,
    pub max_participants: i32,
    pub valid_until: Option<DateTime<Utc>>,
    pub cooldown_hours: i32,
    pub requires_approval: bool,
    pub check_in_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
