use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::business_accounts::BusinessAccountEntity,
    repositories::accounts::BusinessAccountRepository,
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::business_accounts,
};

pub struct BusinessAccountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessAccountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessAccountRepository for BusinessAccountPostgres {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<BusinessAccountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = business_accounts::table
            .find(account_id)
            .select(BusinessAccountEntity::as_select())
            .first::<BusinessAccountEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
