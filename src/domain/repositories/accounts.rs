use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::business_accounts::BusinessAccountEntity;

#[async_trait]
#[automock]
pub trait BusinessAccountRepository {
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<BusinessAccountEntity>>;
}
