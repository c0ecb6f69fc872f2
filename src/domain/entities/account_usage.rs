use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::account_usage;

/// Calendar-month bucket the participant budget is tracked in.
pub fn current_period(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

/// Per-account quota counters. `active_campaigns` tracks currently active
/// missions; `participants_reserved` tracks the participant budget reserved
/// within `period` (a `YYYY-MM` calendar month). Both are only moved through
/// guarded updates so concurrent activations cannot both slip under a limit.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = account_usage)]
#[diesel(primary_key(account_id))]
pub struct AccountUsageEntity {
    pub account_id: Uuid,
    pub period: String,
    pub active_campaigns: i32,
    pub participants_reserved: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = account_usage)]
pub struct InsertAccountUsageEntity {
    pub account_id: Uuid,
    pub period: String,
    pub active_campaigns: i32,
    pub participants_reserved: i32,
    pub updated_at: DateTime<Utc>,
}
