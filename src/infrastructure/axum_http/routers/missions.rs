use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::{
    repositories::{
        accounts::BusinessAccountRepository, activations::ActivationRecordRepository,
        campaigns::PublishedCampaignRepository, connections::BusinessConnectionRepository,
        templates::MissionTemplateRepository, usage::AccountUsageRepository,
    },
    value_objects::activations::{
        ActivateMissionModel, ActivationOutcome, DeactivateMissionModel, DeactivationOutcome,
        MissionStatusDto,
    },
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{
        accounts::BusinessAccountPostgres, activations::ActivationRecordPostgres,
        campaigns::PublishedCampaignPostgres, connections::BusinessConnectionPostgres,
        templates::MissionTemplatePostgres, usage::AccountUsagePostgres,
    },
};
use crate::usecases::{
    activation::ActivationUseCase, connection_gate::ConnectionGate,
    deactivation::DeactivationUseCase, errors::MissionError,
};

/// Shared router state: activation and deactivation run over the same
/// repository set and always see the same storage.
pub struct MissionRouterState<A, T, C, R, P, U>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    pub activation: ActivationUseCase<A, T, C, R, P, U>,
    pub deactivation: DeactivationUseCase<A, R, P, U>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repo = Arc::new(BusinessAccountPostgres::new(Arc::clone(&db_pool)));
    let template_repo = Arc::new(MissionTemplatePostgres::new(Arc::clone(&db_pool)));
    let connection_repo = Arc::new(BusinessConnectionPostgres::new(Arc::clone(&db_pool)));
    let activation_repo = Arc::new(ActivationRecordPostgres::new(Arc::clone(&db_pool)));
    let campaign_repo = Arc::new(PublishedCampaignPostgres::new(Arc::clone(&db_pool)));
    let usage_repo = Arc::new(AccountUsagePostgres::new(Arc::clone(&db_pool)));

    let connection_gate = Arc::new(ConnectionGate::new(Arc::clone(&connection_repo)));

    let activation_usecase = ActivationUseCase::new(
        Arc::clone(&account_repo),
        Arc::clone(&template_repo),
        connection_gate,
        Arc::clone(&activation_repo),
        Arc::clone(&campaign_repo),
        Arc::clone(&usage_repo),
    );
    let deactivation_usecase = DeactivationUseCase::new(
        account_repo,
        activation_repo,
        campaign_repo,
        usage_repo,
    );

    Router::new()
        .route("/templates", get(list_templates))
        .route("/accounts/:account_id", get(list_missions))
        .route("/activate", post(activate))
        .route("/deactivate", post(deactivate))
        .with_state(Arc::new(MissionRouterState {
            activation: activation_usecase,
            deactivation: deactivation_usecase,
        }))
}

/// Wire form of a successful (or idempotent) activate call.
#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub code: &'static str,
    pub mission: MissionStatusDto,
}

#[derive(Debug, Serialize)]
pub struct DeactivateResponse {
    pub code: &'static str,
}

pub async fn activate<A, T, C, R, P, U>(
    State(state): State<Arc<MissionRouterState<A, T, C, R, P, U>>>,
    auth: AuthUser,
    Json(activate_mission_model): Json<ActivateMissionModel>,
) -> Result<impl IntoResponse, MissionError>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    let outcome = state
        .activation
        .activate(auth.user_id, activate_mission_model)
        .await?;

    // Both variants are successes; the distinct status code lets clients that
    // retried a timed-out call tell "I just activated it" from "it already
    // was".
    let response = match outcome {
        ActivationOutcome::Activated { record, campaign } => (
            StatusCode::OK,
            Json(ActivateResponse {
                code: "ACTIVATED",
                mission: MissionStatusDto::from_pair(&record, Some(&campaign)),
            }),
        ),
        ActivationOutcome::AlreadyActive { record } => (
            StatusCode::CONFLICT,
            Json(ActivateResponse {
                code: "ALREADY_ACTIVE",
                mission: MissionStatusDto::from_pair(&record, None),
            }),
        ),
    };

    Ok(response)
}

pub async fn deactivate<A, T, C, R, P, U>(
    State(state): State<Arc<MissionRouterState<A, T, C, R, P, U>>>,
    auth: AuthUser,
    Json(deactivate_mission_model): Json<DeactivateMissionModel>,
) -> Result<impl IntoResponse, MissionError>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    let outcome = state
        .deactivation
        .deactivate(auth.user_id, deactivate_mission_model)
        .await?;

    let response = match outcome {
        DeactivationOutcome::Deactivated => {
            (StatusCode::OK, Json(DeactivateResponse { code: "DEACTIVATED" }))
        }
        DeactivationOutcome::NotActive => {
            (StatusCode::OK, Json(DeactivateResponse { code: "NOT_ACTIVE" }))
        }
        DeactivationOutcome::NotFound => {
            (StatusCode::NOT_FOUND, Json(DeactivateResponse { code: "NOT_FOUND" }))
        }
    };

    Ok(response)
}

pub async fn list_missions<A, T, C, R, P, U>(
    State(state): State<Arc<MissionRouterState<A, T, C, R, P, U>>>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, MissionError>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    let missions = state
        .activation
        .list_missions(auth.user_id, account_id)
        .await?;

    Ok(Json(missions))
}

pub async fn list_templates<A, T, C, R, P, U>(
    State(state): State<Arc<MissionRouterState<A, T, C, R, P, U>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, MissionError>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    T: MissionTemplateRepository + Send + Sync + 'static,
    C: BusinessConnectionRepository + Send + Sync + 'static,
    R: ActivationRecordRepository + Send + Sync + 'static,
    P: PublishedCampaignRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    let templates = state.activation.list_templates().await?;

    Ok(Json(templates))
}
