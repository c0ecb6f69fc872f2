use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::business_connections::BusinessConnectionEntity,
    repositories::connections::BusinessConnectionRepository,
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::business_connections,
};

pub struct BusinessConnectionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BusinessConnectionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BusinessConnectionRepository for BusinessConnectionPostgres {
    async fn list_connected_providers(&self, account_id: Uuid) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let connections = business_connections::table
            .filter(business_connections::account_id.eq(account_id))
            .select(BusinessConnectionEntity::as_select())
            .load::<BusinessConnectionEntity>(&mut conn)?;

        Ok(connections
            .into_iter()
            .map(|connection| connection.provider)
            .collect())
    }
}
