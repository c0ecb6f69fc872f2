use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::activation_records::{
    ActivationRecordEntity, InsertActivationRecordEntity,
};
use crate::domain::value_objects::activations::ActivationConfig;

/// Activation-record persistence. Status transitions are compare-and-set:
/// two concurrent activations of the same pair both pass the read check, but
/// only one of `insert_if_absent` / `activate_if_inactive` can win.
#[async_trait]
#[automock]
pub trait ActivationRecordRepository {
    async fn find_by_pair(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<ActivationRecordEntity>>;

    /// Inserts a fresh record. Returns `None` when a record for the pair
    /// already exists (a concurrent call won the insert).
    async fn insert_if_absent(
        &self,
        insert_activation_record_entity: InsertActivationRecordEntity,
    ) -> Result<Option<ActivationRecordEntity>>;

    /// Transitions an inactive record back to active with a new config.
    /// Returns `None` when the record is already active (concurrent winner)
    /// or missing.
    async fn activate_if_inactive(
        &self,
        account_id: Uuid,
        template_id: Uuid,
        config: ActivationConfig,
    ) -> Result<Option<ActivationRecordEntity>>;

    /// Transitions an active record to inactive. Returns `None` when no
    /// active record exists for the pair.
    async fn deactivate_if_active(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<ActivationRecordEntity>>;

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<ActivationRecordEntity>>;
}
