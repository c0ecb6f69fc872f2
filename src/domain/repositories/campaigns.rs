use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::published_campaigns::{
    InsertPublishedCampaignEntity, PublishedCampaignEntity,
};

#[async_trait]
#[automock]
pub trait PublishedCampaignRepository {
    async fn publish(
        &self,
        insert_published_campaign_entity: InsertPublishedCampaignEntity,
    ) -> Result<PublishedCampaignEntity>;

    /// Latest non-ended campaign for the pair, if any.
    async fn find_current_by_pair(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<PublishedCampaignEntity>>;

    /// Moves every published campaign for the pair to paused. History stays
    /// queryable; nothing is deleted. Returns the number of rows paused.
    async fn pause_by_pair(&self, account_id: Uuid, template_id: Uuid) -> Result<usize>;

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<PublishedCampaignEntity>>;
}
