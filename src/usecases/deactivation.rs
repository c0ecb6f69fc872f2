use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    repositories::{
        accounts::BusinessAccountRepository, activations::ActivationRecordRepository,
        campaigns::PublishedCampaignRepository, usage::AccountUsageRepository,
    },
    value_objects::activations::{DeactivateMissionModel, DeactivationOutcome},
};
use crate::usecases::{
    errors::{MissionError, UseCaseResult},
    guards::ensure_account_owner,
};

/// Mirror-image teardown of activation: the record goes inactive, the
/// published campaign is paused (never deleted, history stays queryable) and
/// the active-campaign slot is returned. Participant reservations for the
/// month are deliberately kept.
pub struct DeactivationUseCase<A, R, P, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    activation_repo: Arc<R>,
    campaign_repo: Arc<P>,
    usage_repo: Arc<U>,
}

impl<A, R, P, U> DeactivationUseCase<A, R, P, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        activation_repo: Arc<R>,
        campaign_repo: Arc<P>,
        usage_repo: Arc<U>,
    ) -> Self {
        Self {
            account_repo,
            activation_repo,
            campaign_repo,
            usage_repo,
        }
    }

    pub async fn deactivate(
        &self,
        caller_user_id: Uuid,
        model: DeactivateMissionModel,
    ) -> UseCaseResult<DeactivationOutcome> {
        let DeactivateMissionModel {
            account_id,
            template_id,
        } = model;

        info!(
            %caller_user_id,
            %account_id,
            %template_id,
            "deactivation: deactivate requested"
        );

        ensure_account_owner(self.account_repo.as_ref(), caller_user_id, account_id).await?;

        let existing = self
            .activation_repo
            .find_by_pair(account_id, template_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %template_id,
                    db_error = ?err,
                    "deactivation: failed to load activation record"
                );
                MissionError::Internal(err)
            })?;

        if existing.is_none() {
            info!(
                %account_id,
                %template_id,
                "deactivation: no activation record for pair"
            );
            return Ok(DeactivationOutcome::NotFound);
        }

        // Compare-and-set: only the call that actually flips the status
        // pauses the campaign and returns the slot.
        let deactivated = self
            .activation_repo
            .deactivate_if_active(account_id, template_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %template_id,
                    db_error = ?err,
                    "deactivation: failed to deactivate activation record"
                );
                MissionError::Internal(err)
            })?;

        let Some(record) = deactivated else {
            // Already inactive. Still reconcile a stray published campaign
            // left behind by an earlier partial teardown.
            self.pause_campaigns(account_id, template_id).await;
            info!(
                %account_id,
                %template_id,
                "deactivation: pair already inactive"
            );
            return Ok(DeactivationOutcome::NotActive);
        };

        if let Err(err) = self.usage_repo.release_active_slot(account_id).await {
            error!(
                %account_id,
                db_error = ?err,
                "deactivation: failed to release active-campaign slot"
            );
        }

        self.pause_campaigns(account_id, template_id).await;

        info!(
            %account_id,
            %template_id,
            activation_id = %record.id,
            "deactivation: mission deactivated and campaign paused"
        );

        Ok(DeactivationOutcome::Deactivated)
    }

    async fn pause_campaigns(&self, account_id: Uuid, template_id: Uuid) {
        match self.campaign_repo.pause_by_pair(account_id, template_id).await {
            Ok(paused) if paused > 0 => {
                info!(
                    %account_id,
                    %template_id,
                    paused,
                    "deactivation: published campaigns paused"
                );
            }
            Ok(_) => {}
            Err(err) => {
                // Left for the NotActive reconciliation path of a retry.
                warn!(
                    %account_id,
                    %template_id,
                    db_error = ?err,
                    "deactivation: failed to pause published campaigns"
                );
            }
        }
    }
}
