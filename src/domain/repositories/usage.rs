use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::account_usage::AccountUsageEntity;

/// Quota counters, moved exclusively through guarded updates so that two
/// concurrent activations can never both read "one below the limit" and both
/// proceed.
#[async_trait]
#[automock]
pub trait AccountUsageRepository {
    /// Current counters for the account within `period`, zeroed if absent.
    async fn find_usage(&self, account_id: Uuid, period: String) -> Result<AccountUsageEntity>;

    /// Atomically takes one active-campaign slot. Returns `false` when the
    /// account is already at `max`.
    async fn try_reserve_active_slot(&self, account_id: Uuid, max: i64) -> Result<bool>;

    /// Returns a previously taken active-campaign slot.
    async fn release_active_slot(&self, account_id: Uuid) -> Result<()>;

    /// Atomically reserves `additional` participants against the monthly
    /// budget for `period`. Returns `false` when the reservation would exceed
    /// `max`.
    async fn try_reserve_participants(
        &self,
        account_id: Uuid,
        period: String,
        additional: i64,
        max: i64,
    ) -> Result<bool>;

    /// Returns a previously made participant reservation.
    async fn release_participants(
        &self,
        account_id: Uuid,
        period: String,
        amount: i64,
    ) -> Result<()>;
}
