use anyhow::Result;
use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::mission_templates::MissionTemplateEntity,
    repositories::templates::MissionTemplateRepository,
};
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::mission_templates};

pub struct MissionTemplatePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl MissionTemplatePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl MissionTemplateRepository for MissionTemplatePostgres {
    async fn find_by_id(&self, template_id: Uuid) -> Result<Option<MissionTemplateEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = mission_templates::table
            .find(template_id)
            .select(MissionTemplateEntity::as_select())
            .first::<MissionTemplateEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_active(&self) -> Result<Vec<MissionTemplateEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = mission_templates::table
            .filter(mission_templates::is_active.eq(true))
            .order(mission_templates::name.asc())
            .select(MissionTemplateEntity::as_select())
            .load::<MissionTemplateEntity>(&mut conn)?;

        Ok(results)
    }
}
