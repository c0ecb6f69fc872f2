use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::value_objects::enums::subscription_tiers::SubscriptionTier;
use crate::infrastructure::postgres::schema::business_accounts;

/// A business on the marketplace. Level and tier are owned by the external
/// approval/billing flows; this subsystem never writes them.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = business_accounts)]
pub struct BusinessAccountEntity {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub display_name: Option<String>,
    pub level: i32,
    pub subscription_tier: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BusinessAccountEntity {
    pub fn subscription_tier(&self) -> Option<SubscriptionTier> {
        self.subscription_tier
            .as_deref()
            .and_then(SubscriptionTier::from_str)
    }
}
