use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::repositories::{
    accounts::BusinessAccountRepository, usage::AccountUsageRepository,
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad,
    repositories::{accounts::BusinessAccountPostgres, usage::AccountUsagePostgres},
};
use crate::usecases::{entitlement::EntitlementUseCase, errors::MissionError};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let account_repo = BusinessAccountPostgres::new(Arc::clone(&db_pool));
    let usage_repo = AccountUsagePostgres::new(Arc::clone(&db_pool));

    let entitlement_usecase =
        EntitlementUseCase::new(Arc::new(account_repo), Arc::new(usage_repo));

    Router::new()
        .route("/accounts/:account_id", get(preview))
        .with_state(Arc::new(entitlement_usecase))
}

pub async fn preview<A, U>(
    State(entitlement_usecase): State<Arc<EntitlementUseCase<A, U>>>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, MissionError>
where
    A: BusinessAccountRepository + Send + Sync + 'static,
    U: AccountUsageRepository + Send + Sync + 'static,
{
    let preview = entitlement_usecase.preview(auth.user_id, account_id).await?;

    Ok(Json(preview))
}
