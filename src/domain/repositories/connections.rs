use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait BusinessConnectionRepository {
    /// Capability tags of every external account the business has linked.
    async fn list_connected_providers(&self, account_id: Uuid) -> Result<Vec<String>>;
}
