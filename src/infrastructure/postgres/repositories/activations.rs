use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    entities::activation_records::{ActivationRecordEntity, InsertActivationRecordEntity},
    repositories::activations::ActivationRecordRepository,
    value_objects::{
        activations::ActivationConfig, enums::activation_statuses::ActivationStatus,
    },
};
use crate::infrastructure::postgres::{
    postgres_connection::PgPoolSquad, schema::activation_records,
};

pub struct ActivationRecordPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ActivationRecordPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ActivationRecordRepository for ActivationRecordPostgres {
    async fn find_by_pair(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<ActivationRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = activation_records::table
            .filter(activation_records::account_id.eq(account_id))
            .filter(activation_records::template_id.eq(template_id))
            .select(ActivationRecordEntity::as_select())
            .first::<ActivationRecordEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert_if_absent(
        &self,
        insert_activation_record_entity: InsertActivationRecordEntity,
    ) -> Result<Option<ActivationRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Unique index on (account_id, template_id); of two concurrent
        // inserts only one returns a row, the other sees the conflict.
        let result = insert_into(activation_records::table)
            .values(&insert_activation_record_entity)
            .on_conflict((
                activation_records::account_id,
                activation_records::template_id,
            ))
            .do_nothing()
            .returning(ActivationRecordEntity::as_returning())
            .get_result::<ActivationRecordEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn activate_if_inactive(
        &self,
        account_id: Uuid,
        template_id: Uuid,
        config: ActivationConfig,
    ) -> Result<Option<ActivationRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Transition only when not already active; the status predicate is
        // the optimistic-concurrency token.
        let result = update(
            activation_records::table
                .filter(activation_records::account_id.eq(account_id))
                .filter(activation_records::template_id.eq(template_id))
                .filter(
                    activation_records::status.ne(ActivationStatus::Active.to_string()),
                ),
        )
        .set((
            activation_records::status.eq(ActivationStatus::Active.to_string()),
            activation_records::reward.eq(config.reward),
            activation_records::max_participants.eq(config.max_participants),
            activation_records::valid_until.eq(config.valid_until),
            activation_records::cooldown_hours.eq(config.cooldown_hours),
            activation_records::requires_approval.eq(config.requires_approval),
            activation_records::check_in_method
                .eq(config.check_in_method.map(|method| method.to_string())),
            activation_records::updated_at.eq(Utc::now()),
        ))
        .returning(ActivationRecordEntity::as_returning())
        .get_result::<ActivationRecordEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }

    async fn deactivate_if_active(
        &self,
        account_id: Uuid,
        template_id: Uuid,
    ) -> Result<Option<ActivationRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(
            activation_records::table
                .filter(activation_records::account_id.eq(account_id))
                .filter(activation_records::template_id.eq(template_id))
                .filter(
                    activation_records::status.eq(ActivationStatus::Active.to_string()),
                ),
        )
        .set((
            activation_records::status.eq(ActivationStatus::Inactive.to_string()),
            activation_records::updated_at.eq(Utc::now()),
        ))
        .returning(ActivationRecordEntity::as_returning())
        .get_result::<ActivationRecordEntity>(&mut conn)
        .optional()?;

        Ok(result)
    }

    async fn list_for_account(&self, account_id: Uuid) -> Result<Vec<ActivationRecordEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = activation_records::table
            .filter(activation_records::account_id.eq(account_id))
            .order(activation_records::created_at.desc())
            .select(ActivationRecordEntity::as_select())
            .load::<ActivationRecordEntity>(&mut conn)?;

        Ok(results)
    }
}
