use anyhow::anyhow;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{
        account_usage::current_period,
        activation_records::{ActivationRecordEntity, InsertActivationRecordEntity},
        mission_templates::MissionTemplateEntity,
        published_campaigns::InsertPublishedCampaignEntity,
    },
    repositories::{
        accounts::BusinessAccountRepository, activations::ActivationRecordRepository,
        campaigns::PublishedCampaignRepository, connections::BusinessConnectionRepository,
        templates::MissionTemplateRepository, usage::AccountUsageRepository,
    },
    value_objects::{
        activations::{
            ActivateMissionModel, ActivationConfig, ActivationOutcome, MissionStatusDto,
            MissionTemplateDto,
        },
        connections::ConnectionCheck,
        entitlements::{
            LIMIT_MAX_ACTIVE_CAMPAIGNS, LIMIT_MAX_PARTICIPANTS_PER_MONTH, ResourceLimits,
        },
        enums::{activation_statuses::ActivationStatus, campaign_statuses::CampaignStatus},
    },
};
use crate::usecases::{
    connection_gate::ConnectionGate,
    errors::{MissionError, UseCaseResult},
    guards::ensure_account_owner,
};

/// Orchestrates mission activation: entitlement resolution, connection
/// gating, verification-method capture, quota reservation and the
/// two-resource commit (activation record, then published campaign).
///
/// The two writes are not atomic by design. A record that went active while
/// the campaign publish failed is a recoverable state: the next activate
/// call for the pair short-circuits to `AlreadyActive` and republishes the
/// missing campaign.
pub struct ActivationUseCase<A, T, C, R, P, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    template_repo: Arc<T>,
    connection_gate: Arc<ConnectionGate<C>>,
    activation_repo: Arc<R>,
    campaign_repo: Arc<P>,
    usage_repo: Arc<U>,
}

impl<A, T, C, R, P, U> ActivationUseCase<A, T, C, R, P, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    pub fn new(
        account_repo: Arc<A>,
        template_repo: Arc<T>,
        connection_gate: Arc<ConnectionGate<C>>,
        activation_repo: Arc<R>,
        campaign_repo: Arc<P>,
        usage_repo: Arc<U>,
    ) -> Self {
        Self {
            account_repo,
            template_repo,
            connection_gate,
            activation_repo,
            campaign_repo,
            usage_repo,
        }
    }

    pub async fn activate(
        &self,
        caller_user_id: Uuid,
        model: ActivateMissionModel,
    ) -> UseCaseResult<ActivationOutcome> {
        let ActivateMissionModel {
            account_id,
            template_id,
            config,
        } = model;

        info!(
            %caller_user_id,
            %account_id,
            %template_id,
            "activation: activate requested"
        );

        let account =
            ensure_account_owner(self.account_repo.as_ref(), caller_user_id, account_id).await?;
        let limits = ResourceLimits::resolve(account.level, account.subscription_tier());

        let template = self
            .template_repo
            .find_by_id(template_id)
            .await
            .map_err(|err| {
                error!(
                    %template_id,
                    db_error = ?err,
                    "activation: failed to load mission template"
                );
                MissionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = MissionError::TemplateNotFound;
                warn!(
                    %template_id,
                    status = err.status_code().as_u16(),
                    "activation: mission template not found"
                );
                err
            })?;

        // An already-active pair has by definition already passed every gate;
        // short-circuit before any other check.
        let existing = self
            .activation_repo
            .find_by_pair(account_id, template_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    %template_id,
                    db_error = ?err,
                    "activation: failed to load existing activation record"
                );
                MissionError::Internal(err)
            })?;

        if let Some(record) = existing.as_ref() {
            if record.status() == ActivationStatus::Active {
                info!(
                    %account_id,
                    %template_id,
                    activation_id = %record.id,
                    "activation: pair already active, reconciling campaign"
                );
                self.heal_missing_campaign(record).await?;
                return Ok(ActivationOutcome::AlreadyActive {
                    record: record.clone(),
                });
            }
        }

        let now = Utc::now();
        config.validate(now).map_err(|reason| {
            let err = MissionError::Validation(reason);
            warn!(
                %account_id,
                %template_id,
                status = err.status_code().as_u16(),
                error = %err,
                "activation: invalid activation config"
            );
            err
        })?;

        match self
            .connection_gate
            .check(account_id, &template)
            .await
            .map_err(MissionError::Internal)?
        {
            ConnectionCheck::Satisfied => {}
            ConnectionCheck::Missing(requirement) => {
                warn!(
                    %account_id,
                    %template_id,
                    missing_tag = %requirement.tag,
                    status = axum::http::StatusCode::FORBIDDEN.as_u16(),
                    "activation: required business connection missing"
                );
                return Err(MissionError::MissingConnection(requirement));
            }
        }

        if template.is_presence_verified && config.check_in_method.is_none() {
            let err = MissionError::CheckInMethodRequired;
            warn!(
                %account_id,
                %template_id,
                status = err.status_code().as_u16(),
                "activation: presence-verified template needs a check-in method"
            );
            return Err(err);
        }

        let kind = template.kind().ok_or_else(|| {
            error!(
                %template_id,
                kind = %template.kind,
                "activation: template carries an unknown kind tag"
            );
            MissionError::Internal(anyhow!("unknown mission kind: {}", template.kind))
        })?;

        if !limits.supports_kind(kind) {
            let err = MissionError::KindNotAvailable { kind };
            warn!(
                %account_id,
                %template_id,
                kind = %kind,
                status = err.status_code().as_u16(),
                "activation: mission kind not available on current plan"
            );
            return Err(err);
        }

        let period = current_period(now);
        let reserved_participants = i64::from(config.max_participants);
        self.reserve_quotas(account_id, &period, reserved_participants, &limits)
            .await?;

        // Compare-and-set transition: of two concurrent calls for the same
        // pair, exactly one wins; the loser collapses to AlreadyActive.
        let cas_result = match existing {
            Some(_) => {
                self.activation_repo
                    .activate_if_inactive(account_id, template_id, config.clone())
                    .await
            }
            None => {
                self.activation_repo
                    .insert_if_absent(Self::record_insert(account_id, template_id, &config, now))
                    .await
            }
        };

        let record = match cas_result {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.release_reservations(account_id, &period, reserved_participants)
                    .await;
                info!(
                    %account_id,
                    %template_id,
                    "activation: lost activation race, collapsing to already-active"
                );
                let winner = self
                    .activation_repo
                    .find_by_pair(account_id, template_id)
                    .await
                    .map_err(MissionError::Internal)?
                    .ok_or_else(|| {
                        MissionError::Internal(anyhow!(
                            "activation record missing after losing activation race"
                        ))
                    })?;
                return Ok(ActivationOutcome::AlreadyActive { record: winner });
            }
            Err(err) => {
                self.release_reservations(account_id, &period, reserved_participants)
                    .await;
                error!(
                    %account_id,
                    %template_id,
                    db_error = ?err,
                    "activation: failed to write activation record"
                );
                return Err(MissionError::Internal(err));
            }
        };

        let campaign = self
            .campaign_repo
            .publish(Self::campaign_insert(&record, now))
            .await
            .map_err(|err| {
                // Record is active without a campaign. Recoverable: the next
                // activate for the pair republishes it.
                error!(
                    %account_id,
                    %template_id,
                    activation_id = %record.id,
                    db_error = ?err,
                    "activation: campaign publish failed after record activation"
                );
                MissionError::Internal(err)
            })?;

        info!(
            %account_id,
            %template_id,
            activation_id = %record.id,
            campaign_id = %campaign.id,
            "activation: mission activated and campaign published"
        );

        Ok(ActivationOutcome::Activated { record, campaign })
    }

    /// Read path for the UI: activation records joined with their sibling
    /// campaigns. This is also the plain re-query that re-discovers the
    /// result of an abandoned activate call.
    pub async fn list_missions(
        &self,
        caller_user_id: Uuid,
        account_id: Uuid,
    ) -> UseCaseResult<Vec<MissionStatusDto>> {
        ensure_account_owner(self.account_repo.as_ref(), caller_user_id, account_id).await?;

        let records = self
            .activation_repo
            .list_for_account(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "activation: failed to list activation records"
                );
                MissionError::Internal(err)
            })?;

        let campaigns = self
            .campaign_repo
            .list_for_account(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "activation: failed to list published campaigns"
                );
                MissionError::Internal(err)
            })?;

        let statuses = records
            .iter()
            .map(|record| {
                let campaign = campaigns
                    .iter()
                    .filter(|campaign| campaign.template_id == record.template_id)
                    .max_by_key(|campaign| campaign.published_at);
                MissionStatusDto::from_pair(record, campaign)
            })
            .collect();

        Ok(statuses)
    }

    pub async fn list_templates(&self) -> UseCaseResult<Vec<MissionTemplateDto>> {
        let templates = self.template_repo.list_active().await.map_err(|err| {
            error!(db_error = ?err, "activation: failed to list mission templates");
            MissionError::Internal(err)
        })?;

        Ok(templates.into_iter().map(Self::template_dto).collect())
    }

    async fn reserve_quotas(
        &self,
        account_id: Uuid,
        period: &str,
        participants: i64,
        limits: &ResourceLimits,
    ) -> UseCaseResult<()> {
        let slot_taken = self
            .usage_repo
            .try_reserve_active_slot(account_id, limits.max_active_campaigns)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "activation: failed to reserve active-campaign slot"
                );
                MissionError::Internal(err)
            })?;

        if !slot_taken {
            let current = self.current_usage(account_id, period).await?.0;
            let err = MissionError::QuotaExceeded {
                limit_name: LIMIT_MAX_ACTIVE_CAMPAIGNS,
                current,
                max: limits.max_active_campaigns,
            };
            warn!(
                %account_id,
                current,
                max = limits.max_active_campaigns,
                status = err.status_code().as_u16(),
                "activation: active-campaign quota exceeded"
            );
            return Err(err);
        }

        let participants_reserved = self
            .usage_repo
            .try_reserve_participants(
                account_id,
                period.to_string(),
                participants,
                limits.max_participants_per_month,
            )
            .await;

        match participants_reserved {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.release_active_slot(account_id).await;
                let current = self.current_usage(account_id, period).await?.1;
                let err = MissionError::QuotaExceeded {
                    limit_name: LIMIT_MAX_PARTICIPANTS_PER_MONTH,
                    current,
                    max: limits.max_participants_per_month,
                };
                warn!(
                    %account_id,
                    requested = participants,
                    current,
                    max = limits.max_participants_per_month,
                    status = err.status_code().as_u16(),
                    "activation: monthly participant quota exceeded"
                );
                Err(err)
            }
            Err(err) => {
                self.release_active_slot(account_id).await;
                error!(
                    %account_id,
                    db_error = ?err,
                    "activation: failed to reserve monthly participants"
                );
                Err(MissionError::Internal(err))
            }
        }
    }

    /// `(active_campaigns, participants_reserved)` for quota error payloads.
    async fn current_usage(&self, account_id: Uuid, period: &str) -> UseCaseResult<(i64, i64)> {
        let usage = self
            .usage_repo
            .find_usage(account_id, period.to_string())
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "activation: failed to load usage counters"
                );
                MissionError::Internal(err)
            })?;
        Ok((
            usage.active_campaigns.into(),
            usage.participants_reserved.into(),
        ))
    }

    async fn release_active_slot(&self, account_id: Uuid) {
        if let Err(err) = self.usage_repo.release_active_slot(account_id).await {
            error!(
                %account_id,
                db_error = ?err,
                "activation: failed to release active-campaign slot"
            );
        }
    }

    async fn release_reservations(&self, account_id: Uuid, period: &str, participants: i64) {
        self.release_active_slot(account_id).await;
        if let Err(err) = self
            .usage_repo
            .release_participants(account_id, period.to_string(), participants)
            .await
        {
            error!(
                %account_id,
                db_error = ?err,
                "activation: failed to release participant reservation"
            );
        }
    }

    /// Republishes the campaign for an active record whose publish step
    /// failed earlier. Dangling active-but-unpublished pairs heal here.
    async fn heal_missing_campaign(&self, record: &ActivationRecordEntity) -> UseCaseResult<()> {
        let current = self
            .campaign_repo
            .find_current_by_pair(record.account_id, record.template_id)
            .await
            .map_err(|err| {
                error!(
                    account_id = %record.account_id,
                    template_id = %record.template_id,
                    db_error = ?err,
                    "activation: failed to load campaign during reconciliation"
                );
                MissionError::Internal(err)
            })?;

        if current.is_some() {
            return Ok(());
        }

        warn!(
            account_id = %record.account_id,
            template_id = %record.template_id,
            activation_id = %record.id,
            "activation: active record without published campaign, republishing"
        );

        self.campaign_repo
            .publish(Self::campaign_insert(record, Utc::now()))
            .await
            .map_err(|err| {
                error!(
                    account_id = %record.account_id,
                    template_id = %record.template_id,
                    db_error = ?err,
                    "activation: reconciliation republish failed"
                );
                MissionError::Internal(err)
            })?;

        Ok(())
    }

    fn record_insert(
        account_id: Uuid,
        template_id: Uuid,
        config: &ActivationConfig,
        now: DateTime<Utc>,
    ) -> InsertActivationRecordEntity {
        InsertActivationRecordEntity {
            account_id,
            template_id,
            status: ActivationStatus::Active.to_string(),
            reward: config.reward,
            max_participants: config.max_participants,
            valid_until: config.valid_until,
            cooldown_hours: config.cooldown_hours,
            requires_approval: config.requires_approval,
            check_in_method: config.check_in_method.map(|method| method.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn campaign_insert(
        record: &ActivationRecordEntity,
        now: DateTime<Utc>,
    ) -> InsertPublishedCampaignEntity {
        InsertPublishedCampaignEntity {
            account_id: record.account_id,
            template_id: record.template_id,
            status: CampaignStatus::Published.to_string(),
            reward: record.reward,
            max_participants: record.max_participants,
            valid_until: record.valid_until,
            cooldown_hours: record.cooldown_hours,
            requires_approval: record.requires_approval,
            check_in_method: record.check_in_method.clone(),
            published_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn template_dto(template: MissionTemplateEntity) -> MissionTemplateDto {
        let required_connections = template.required_connection_tags();
        MissionTemplateDto {
            id: template.id,
            name: template.name,
            kind: template.kind,
            required_connections,
            is_presence_verified: template.is_presence_verified,
        }
    }
}

#[cfg(test)]
mod tests;
