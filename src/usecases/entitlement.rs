use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{
    entities::account_usage::current_period,
    repositories::{accounts::BusinessAccountRepository, usage::AccountUsageRepository},
    value_objects::entitlements::{EntitlementPreviewDto, ResourceLimits},
};
use crate::usecases::{
    errors::{MissionError, UseCaseResult},
    guards::ensure_account_owner,
};

/// Resolves the caller's effective limits and current usage for display.
/// Uses the exact same `ResourceLimits::resolve` the activation coordinator
/// enforces with, so preview and enforcement cannot disagree.
pub struct EntitlementUseCase<A, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    usage_repo: Arc<U>,
}

impl<A, U> EntitlementUseCase<A, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, usage_repo: Arc<U>) -> Self {
        Self {
            account_repo,
            usage_repo,
        }
    }

    pub async fn preview(
        &self,
        caller_user_id: Uuid,
        account_id: Uuid,
    ) -> UseCaseResult<EntitlementPreviewDto> {
        let account =
            ensure_account_owner(self.account_repo.as_ref(), caller_user_id, account_id).await?;

        let tier = account.subscription_tier();
        let limits = ResourceLimits::resolve(account.level, tier);
        let period = current_period(Utc::now());

        debug!(
            %account_id,
            level = account.level,
            tier = ?tier,
            "entitlements: resolved limits for preview"
        );

        let usage = self
            .usage_repo
            .find_usage(account_id, period.clone())
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "entitlements: failed to load usage counters"
                );
                MissionError::Internal(err)
            })?;

        Ok(EntitlementPreviewDto {
            account_id,
            level: account.level,
            tier,
            limits,
            current_active_campaigns: usage.active_campaigns.into(),
            participants_reserved_this_month: usage.participants_reserved.into(),
            period,
        })
    }
}
