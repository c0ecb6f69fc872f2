use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::business_connections;

/// A linked external account. Only presence/absence matters to this
/// subsystem; the OAuth handshake lives elsewhere.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = business_connections)]
#[diesel(primary_key(account_id, provider))]
pub struct BusinessConnectionEntity {
    pub account_id: Uuid,
    pub provider: String,
    pub connected_at: DateTime<Utc>,
}
