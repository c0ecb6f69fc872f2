use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::mission_templates::MissionTemplateEntity;

#[async_trait]
#[automock]
pub trait MissionTemplateRepository {
    async fn find_by_id(&self, template_id: Uuid) -> Result<Option<MissionTemplateEntity>>;
    async fn list_active(&self) -> Result<Vec<MissionTemplateEntity>>;
}
