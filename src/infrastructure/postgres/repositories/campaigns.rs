use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::published_campaigns::{InsertPublishedCampaignEntity, PublishedCampaignEntity},
    repositories::campaigns::PublishedCampaignRepository,
    value_objects::enums::campaign_statuses::CampaignStatus,
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::published_campaigns,
};

pub struct PublishedCampaignPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PublishedCampaignPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PublishedCampaignRepository for PublishedCampaignPostgres {
    async fn publish(
        &self,
        insert_published_campaign_entity: InsertPublishedCampaignEntity,
    ) -> Result<PublishedCampaignEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(published_campaigns::table)
            .values(&insert_published_campaign_entity)
            .returning(PublishedCampaignEntity::as_returning())
            .get_result::<PublishedCampaignEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_current_by_pair(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<PublishedCampaignEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = published_campaigns::table
            .filter(published_campaigns::account_id.eq(account_id))
            .filter(published_campaigns::template_id.eq(template_id))
            .filter(published_campaigns::status.ne(CampaignStatus::Ended.to_string()))
            .order(published_campaigns::published_at.desc())
            .select(PublishedCampaignEntity::as_select())
            .first::<PublishedCampaignEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn pause_by_pair(&self, account_id: Uuid, template_id: Uuid) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let paused = update(
            published_campaigns::table
                .filter(published_campaigns::account_id.eq(account_id))
                .filter(published_campaigns::template_id.eq(template_id))
                .filter(
                    published_campaigns::status.eq(CampaignStatus::Published.to_string()),
                ),
        )
        .set((
            published_campaigns::status.eq(CampaignStatus::Paused.to_string()),
            published_campaigns::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(paused)
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<PublishedCampaignEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = published_campaigns::table
            .filter(published_campaigns::account_id.eq(account_id))
            .order(published_campaigns::published_at.desc())
            .select(PublishedCampaignEntity::as_select())
            .load::<PublishedCampaignEntity>(&mut conn)?;

        Ok(results)
    }
}
