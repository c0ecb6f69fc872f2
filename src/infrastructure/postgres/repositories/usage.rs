use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::account_usage::{AccountUsageEntity, InsertAccountUsageEntity},
    repositories::usage::AccountUsageRepository,
};
use crate::infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::account_usage};

pub struct AccountUsagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AccountUsagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// Makes sure a counter row exists and carries the current period. Stale
    /// rows from a previous month get their participant counter reset; the
    /// active-campaign counter survives rollover because active missions do.
    fn ensure_current_row(
        conn: &mut PgConnection,
        account_id: Uuid,
        period: &str,
    ) -> Result<()> {
        insert_into(account_usage::table)
            .values(&InsertAccountUsageEntity {
                account_id,
                period: period.to_string(),
                active_campaigns: 0,
                participants_reserved: 0,
                updated_at: Utc::now(),
            })
            .on_conflict(account_usage::account_id)
            .do_nothing()
            .execute(conn)?;

        update(
            account_usage::table
                .filter(account_usage::account_id.eq(account_id))
                .filter(account_usage::period.ne(period)),
        )
        .set((
            account_usage::period.eq(period),
            account_usage::participants_reserved.eq(0),
            account_usage::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;

        Ok(())
    }
}

#[async_trait]
impl AccountUsageRepository for AccountUsagePostgres {
    async fn find_usage(&self, account_id: Uuid, period: String) -> Result<AccountUsageEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = account_usage::table
            .find(account_id)
            .select(AccountUsageEntity::as_select())
            .first::<AccountUsageEntity>(&mut conn)
            .optional()?;

        let usage = match row {
            Some(mut usage) => {
                // A row left over from a previous month reports a fresh
                // participant budget without being rewritten here.
                if usage.period != period {
                    usage.period = period;
                    usage.participants_reserved = 0;
                }
                usage
            }
            None => AccountUsageEntity {
                account_id,
                period,
                active_campaigns: 0,
                participants_reserved: 0,
                updated_at: Utc::now(),
            },
        };

        Ok(usage)
    }

    async fn try_reserve_active_slot(&self, account_id: Uuid, max: i64) -> Result<bool> {
        if max <= 0 {
            return Ok(false);
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;
        Self::ensure_current_row(
            &mut conn,
            account_id,
            &crate::domain::entities::account_usage::current_period(Utc::now()),
        )?;

        let reserved = update(
            account_usage::table
                .filter(account_usage::account_id.eq(account_id))
                .filter(account_usage::active_campaigns.lt(max as i32)),
        )
        .set((
            account_usage::active_campaigns.eq(account_usage::active_campaigns + 1),
            account_usage::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(reserved == 1)
    }

    async fn release_active_slot(&self, account_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(
            account_usage::table
                .filter(account_usage::account_id.eq(account_id))
                .filter(account_usage::active_campaigns.gt(0)),
        )
        .set((
            account_usage::active_campaigns.eq(account_usage::active_campaigns - 1),
            account_usage::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(())
    }

    async fn try_reserve_participants(
        &self,
        account_id: Uuid,
        period: String,
        additional: i64,
        max: i64,
    ) -> Result<bool> {
        if additional > max {
            return Ok(false);
        }

        let mut conn = Arc::clone(&self.db_pool).get()?;
        Self::ensure_current_row(&mut conn, account_id, &period)?;

        let reserved = update(
            account_usage::table
                .filter(account_usage::account_id.eq(account_id))
                .filter(account_usage::period.eq(&period))
                .filter(account_usage::participants_reserved.le((max - additional) as i32)),
        )
        .set((
            account_usage::participants_reserved
                .eq(account_usage::participants_reserved + additional as i32),
            account_usage::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        Ok(reserved == 1)
    }

    async fn release_participants(
        &self,
        account_id: Uuid,
        period: String,
        amount: i64,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let released = update(
            account_usage::table
                .filter(account_usage::account_id.eq(account_id))
                .filter(account_usage::period.eq(&period))
                .filter(account_usage::participants_reserved.ge(amount as i32)),
        )
        .set((
            account_usage::participants_reserved
                .eq(account_usage::participants_reserved - amount as i32),
            account_usage::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)?;

        // A rollover between reserve and release can leave less on the
        // counter than was reserved; clamp to zero instead of going negative.
        if released == 0 {
            update(
                account_usage::table
                    .filter(account_usage::account_id.eq(account_id))
                    .filter(account_usage::period.eq(&period)),
            )
            .set((
                account_usage::participants_reserved.eq(0),
                account_usage::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;
        }

        Ok(())
    }
}
