use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::{
    entities::business_accounts::BusinessAccountEntity,
    repositories::accounts::BusinessAccountRepository,
};
use crate::usecases::errors::{MissionError, UseCaseResult};

/// Loads the business account and enforces that it belongs to the caller.
/// The UI holds no authority; every operation re-checks ownership here.
pub async fn ensure_account_owner<A>(
    account_repo: &A,
    caller_user_id: Uuid,
    account_id: Uuid,
) -> UseCaseResult<BusinessAccountEntity>
where
    A: BusinessAccountRepository + Send + Sync,
{
    let account = account_repo
        .find_by_id(account_id)
        .await
        .map_err(|err| {
            error!(
                %account_id,
                db_error = ?err,
                "guards: failed to load business account"
            );
            MissionError::Internal(err)
        })?
        .ok_or_else(|| {
            let err = MissionError::AccountNotFound;
            warn!(
                %account_id,
                status = err.status_code().as_u16(),
                "guards: business account not found"
            );
            err
        })?;

    if account.owner_user_id != caller_user_id {
        let err = MissionError::NotAccountOwner;
        warn!(
            %caller_user_id,
            %account_id,
            status = err.status_code().as_u16(),
            "guards: caller does not own business account"
        );
        return Err(err);
    }

    Ok(account)
}
