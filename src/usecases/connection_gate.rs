use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{
    entities::mission_templates::MissionTemplateEntity,
    repositories::connections::BusinessConnectionRepository,
    value_objects::connections::{ConnectionCheck, ConnectionRequirement},
};

/// Checks whether an account has linked the external accounts a template
/// requires. A missing connection is a normal, user-actionable outcome and
/// comes back as `ConnectionCheck::Missing`; `Err` is reserved for genuinely
/// unexpected conditions.
pub struct ConnectionGate<C>
where
    C: BusinessConnectionRepository + Send + Sync + 'static,
{
    connection_repo: Arc<C>,
}

impl<C> ConnectionGate<C>
where
    C: BusinessConnectionRepository + Send + Sync + 'static,
{
    pub fn new(connection_repo: Arc<C>) -> Self {
        Self { connection_repo }
    }

    pub async fn check(
        &self,
        account_id: Uuid,
        template: &MissionTemplateEntity,
    ) -> Result<ConnectionCheck> {
        let required = template.required_connection_tags();
        if required.is_empty() {
            debug!(
                %account_id,
                template_id = %template.id,
                "connection_gate: template has no connection requirements"
            );
            return Ok(ConnectionCheck::Satisfied);
        }

        let connected = self
            .connection_repo
            .list_connected_providers(account_id)
            .await
            .map_err(|err| {
                error!(
                    %account_id,
                    db_error = ?err,
                    "connection_gate: failed to load connected providers"
                );
                err
            })?;

        for tag in &required {
            if !connected.iter().any(|provider| provider == tag) {
                debug!(
                    %account_id,
                    template_id = %template.id,
                    missing_tag = %tag,
                    "connection_gate: required connection missing"
                );
                return Ok(ConnectionCheck::Missing(ConnectionRequirement::for_tag(tag)));
            }
        }

        Ok(ConnectionCheck::Satisfied)
    }
}
