use super::*;
use crate::domain::entities::{
    account_usage::AccountUsageEntity, business_accounts::BusinessAccountEntity,
    published_campaigns::PublishedCampaignEntity,
};
use crate::domain::repositories::{
    accounts::MockBusinessAccountRepository, activations::MockActivationRecordRepository,
    campaigns::MockPublishedCampaignRepository, connections::MockBusinessConnectionRepository,
    templates::MockMissionTemplateRepository, usage::MockAccountUsageRepository,
};
use crate::domain::value_objects::enums::{
    check_in_methods::CheckInMethod, mission_kinds::MissionKind,
};
use mockall::predicate::eq;

struct Mocks {
    account_repo: MockBusinessAccountRepository,
    template_repo: MockMissionTemplateRepository,
    connection_repo: MockBusinessConnectionRepository,
    activation_repo: MockActivationRecordRepository,
    campaign_repo: MockPublishedCampaignRepository,
    usage_repo: MockAccountUsageRepository,
}

fn sample_account(account_id: Uuid, owner: Uuid, level: i32, tier: &str) -> BusinessAccountEntity {
    BusinessAccountEntity {
        id: account_id,
        owner_user_id: owner,
        display_name: Some("Blue Bottle Bakery".to_string()),
        level,
        subscription_tier: Some(tier.to_string()),
        created_at: Utc::now(),
    }
}

fn sample_template(
    template_id: Uuid,
    kind: &str,
    required: serde_json::Value,
    presence: bool,
) -> MissionTemplateEntity {
    MissionTemplateEntity {
        id: template_id,
        name: "Sample mission".to_string(),
        kind: kind.to_string(),
        required_connections: required,
        is_presence_verified: presence,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn sample_config() -> ActivationConfig {
    ActivationConfig {
        reward: 100,
        max_participants: 20,
        valid_until: None,
        cooldown_hours: 24,
        requires_approval: false,
        check_in_method: None,
    }
}

fn active_record(account_id: Uuid, template_id: Uuid) -> ActivationRecordEntity {
    let now = Utc::now();
    ActivationRecordEntity {
        id: Uuid::new_v4(),
        account_id,
        template_id,
        status: "active".to_string(),
        reward: 100,
        max_participants: 20,
        valid_until: None,
        cooldown_hours: 24,
        requires_approval: false,
        check_in_method: None,
        created_at: now,
        updated_at: now,
    }
}

fn record_from_insert(insert: &InsertActivationRecordEntity) -> ActivationRecordEntity {
    ActivationRecordEntity {
        id: Uuid::new_v4(),
        account_id: insert.account_id,
        template_id: insert.template_id,
        status: insert.status.clone(),
        reward: insert.reward,
        max_participants: insert.max_participants,
        valid_until: insert.valid_until,
        cooldown_hours: insert.cooldown_hours,
        requires_approval: insert.requires_approval,
        check_in_method: insert.check_in_method.clone(),
        created_at: insert.created_at,
        updated_at: insert.updated_at,
    }
}

fn campaign_from_insert(insert: &InsertPublishedCampaignEntity) -> PublishedCampaignEntity {
    PublishedCampaignEntity {
        id: Uuid::new_v4(),
        account_id: insert.account_id,
        template_id: insert.template_id,
        status: insert.status.clone(),
        reward: insert.reward,
        max_participants: insert.max_participants,
        valid_until: insert.valid_until,
        cooldown_hours: insert.cooldown_hours,
        requires_approval: insert.requires_approval,
        check_in_method: insert.check_in_method.clone(),
        published_at: insert.published_at,
        created_at: insert.created_at,
        updated_at: insert.updated_at,
    }
}

fn sample_usage(account_id: Uuid, active: i32, participants: i32) -> AccountUsageEntity {
    AccountUsageEntity {
        account_id,
        period: current_period(Utc::now()),
        active_campaigns: active,
        participants_reserved: participants,
        updated_at: Utc::now(),
    }
}

impl Mocks {
    fn new() -> Self {
        Self {
            account_repo: MockBusinessAccountRepository::new(),
            template_repo: MockMissionTemplateRepository::new(),
            connection_repo: MockBusinessConnectionRepository::new(),
            activation_repo: MockActivationRecordRepository::new(),
            campaign_repo: MockPublishedCampaignRepository::new(),
            usage_repo: MockAccountUsageRepository::new(),
        }
    }

    fn with_account(mut self, account: BusinessAccountEntity) -> Self {
        self.account_repo
            .expect_find_by_id()
            .with(eq(account.id))
            .returning(move |_| {
                let account = account.clone();
                Box::pin(async move { Ok(Some(account)) })
            });
        self
    }

    fn with_template(mut self, template: MissionTemplateEntity) -> Self {
        self.template_repo
            .expect_find_by_id()
            .with(eq(template.id))
            .returning(move |_| {
                let template = template.clone();
                Box::pin(async move { Ok(Some(template)) })
            });
        self
    }

    fn with_no_connections(mut self) -> Self {
        self.connection_repo
            .expect_list_connected_providers()
            .returning(|_| Box::pin(async { Ok(vec![]) }));
        self
    }

    fn with_open_quotas(mut self) -> Self {
        self.usage_repo
            .expect_try_reserve_active_slot()
            .returning(|_, _| Box::pin(async { Ok(true) }));
        self.usage_repo
            .expect_try_reserve_participants()
            .returning(|_, _, _, _| Box::pin(async { Ok(true) }));
        self
    }

    fn build(
        self,
    ) -> ActivationUseCase<
        MockBusinessAccountRepository,
        MockMissionTemplateRepository,
        MockBusinessConnectionRepository,
        MockActivationRecordRepository,
        MockPublishedCampaignRepository,
        MockAccountUsageRepository,
    > {
        ActivationUseCase::new(
            Arc::new(self.account_repo),
            Arc::new(self.template_repo),
            Arc::new(ConnectionGate::new(Arc::new(self.connection_repo))),
            Arc::new(self.activation_repo),
            Arc::new(self.campaign_repo),
            Arc::new(self.usage_repo),
        )
    }
}

#[tokio::test]
async fn fresh_pair_activates_and_publishes() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 3, "silver"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ))
        .with_open_quotas();

    mocks
        .activation_repo
        .expect_find_by_pair()
        .with(eq(account_id), eq(template_id))
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .activation_repo
        .expect_insert_if_absent()
        .withf(|insert| insert.status == "active")
        .times(1)
        .returning(|insert| {
            let record = record_from_insert(&insert);
            Box::pin(async move { Ok(Some(record)) })
        });
    mocks
        .campaign_repo
        .expect_publish()
        .withf(|insert| insert.status == "published")
        .times(1)
        .returning(|insert| {
            let campaign = campaign_from_insert(&insert);
            Box::pin(async move { Ok(campaign) })
        });

    let usecase = mocks.build();
    let outcome = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap();

    match outcome {
        ActivationOutcome::Activated { record, campaign } => {
            assert_eq!(record.status(), ActivationStatus::Active);
            assert_eq!(campaign.status(), CampaignStatus::Published);
            assert_eq!(campaign.template_id, template_id);
        }
        ActivationOutcome::AlreadyActive { .. } => panic!("expected a fresh activation"),
    }
}

#[tokio::test]
async fn second_activation_short_circuits_to_already_active() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 3, "silver"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!(["instagram"]),
            false,
        ));

    let existing = active_record(account_id, template_id);
    let existing_id = existing.id;
    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(move |_, _| {
            let existing = existing.clone();
            Box::pin(async move { Ok(Some(existing)) })
        });
    // Sibling campaign already exists, so nothing is republished. No gate,
    // quota, or write expectations are registered: touching them would fail
    // the test, which is exactly the "no further checks" contract.
    mocks
        .campaign_repo
        .expect_find_current_by_pair()
        .returning(move |account_id, template_id| {
            Box::pin(async move {
                let now = Utc::now();
                Ok(Some(PublishedCampaignEntity {
                    id: Uuid::new_v4(),
                    account_id,
                    template_id,
                    status: "published".to_string(),
                    reward: 100,
                    max_participants: 20,
                    valid_until: None,
                    cooldown_hours: 24,
                    requires_approval: false,
                    check_in_method: None,
                    published_at: now,
                    created_at: now,
                    updated_at: now,
                }))
            })
        });

    let usecase = mocks.build();
    let outcome = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap();

    match outcome {
        ActivationOutcome::AlreadyActive { record } => assert_eq!(record.id, existing_id),
        ActivationOutcome::Activated { .. } => panic!("expected the idempotent short-circuit"),
    }
}

#[tokio::test]
async fn missing_connection_blocks_without_creating_a_record() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 3, "gold"))
        .with_template(sample_template(
            template_id,
            "review",
            serde_json::json!(["google-business"]),
            false,
        ))
        .with_no_connections();

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    match err {
        MissionError::MissingConnection(requirement) => {
            assert_eq!(requirement.tag, "google-business");
        }
        other => panic!("expected MissingConnection, got {other:?}"),
    }
}

#[tokio::test]
async fn presence_template_requires_a_check_in_method() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 2, "starter"))
        .with_template(sample_template(
            template_id,
            "check_in",
            serde_json::json!([]),
            true,
        ));

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, MissionError::CheckInMethodRequired));
}

#[tokio::test]
async fn check_in_method_is_stored_verbatim() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 2, "starter"))
        .with_template(sample_template(
            template_id,
            "check_in",
            serde_json::json!([]),
            true,
        ))
        .with_open_quotas();

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .activation_repo
        .expect_insert_if_absent()
        .withf(|insert| insert.check_in_method.as_deref() == Some("GPS"))
        .times(1)
        .returning(|insert| {
            let record = record_from_insert(&insert);
            Box::pin(async move { Ok(Some(record)) })
        });
    mocks
        .campaign_repo
        .expect_publish()
        .withf(|insert| insert.check_in_method.as_deref() == Some("GPS"))
        .times(1)
        .returning(|insert| {
            let campaign = campaign_from_insert(&insert);
            Box::pin(async move { Ok(campaign) })
        });

    let mut config = sample_config();
    config.check_in_method = Some(CheckInMethod::Gps);

    let usecase = mocks.build();
    let outcome = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config,
            },
        )
        .await
        .unwrap();

    match outcome {
        ActivationOutcome::Activated { record, .. } => {
            assert_eq!(record.check_in_method(), Some(CheckInMethod::Gps));
        }
        ActivationOutcome::AlreadyActive { .. } => panic!("expected a fresh activation"),
    }
}

#[tokio::test]
async fn unsupported_kind_is_blocked_by_plan() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 2, "starter"))
        .with_template(sample_template(
            template_id,
            "video",
            serde_json::json!([]),
            false,
        ));

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MissionError::KindNotAvailable {
            kind: MissionKind::Video
        }
    ));
}

#[tokio::test]
async fn level_one_account_cannot_activate_anything() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 1, "platinum"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ));

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    // A locked-out account has every feature flag off, so the block lands
    // before any quota reservation is attempted.
    assert!(matches!(err, MissionError::KindNotAvailable { .. }));
}

#[tokio::test]
async fn active_campaign_quota_reports_limit_name() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 2, "starter"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ));

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .usage_repo
        .expect_try_reserve_active_slot()
        .with(eq(account_id), eq(1))
        .returning(|_, _| Box::pin(async { Ok(false) }));
    mocks
        .usage_repo
        .expect_find_usage()
        .returning(|account_id, _| {
            Box::pin(async move { Ok(sample_usage(account_id, 1, 20)) })
        });

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    match err {
        MissionError::QuotaExceeded {
            limit_name,
            current,
            max,
        } => {
            assert_eq!(limit_name, LIMIT_MAX_ACTIVE_CAMPAIGNS);
            assert_eq!(current, 1);
            assert_eq!(max, 1);
        }
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn participant_quota_failure_releases_the_active_slot() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 2, "starter"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ));

    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .usage_repo
        .expect_try_reserve_active_slot()
        .returning(|_, _| Box::pin(async { Ok(true) }));
    mocks
        .usage_repo
        .expect_try_reserve_participants()
        .returning(|_, _, _, _| Box::pin(async { Ok(false) }));
    mocks
        .usage_repo
        .expect_release_active_slot()
        .with(eq(account_id))
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));
    mocks
        .usage_repo
        .expect_find_usage()
        .returning(|account_id, _| {
            Box::pin(async move { Ok(sample_usage(account_id, 0, 45)) })
        });

    let usecase = mocks.build();
    let err = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap_err();

    match err {
        MissionError::QuotaExceeded { limit_name, .. } => {
            assert_eq!(limit_name, LIMIT_MAX_PARTICIPANTS_PER_MONTH);
        }
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn losing_the_insert_race_collapses_to_already_active() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 3, "silver"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ))
        .with_open_quotas();

    let winner = active_record(account_id, template_id);
    let winner_id = winner.id;

    // First read sees no record; the conditional insert then loses to a
    // concurrent call, and the re-read surfaces the winner.
    let mut seq = mockall::Sequence::new();
    mocks
        .activation_repo
        .expect_find_by_pair()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .activation_repo
        .expect_insert_if_absent()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Box::pin(async { Ok(None) }));
    mocks
        .activation_repo
        .expect_find_by_pair()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_, _| {
            let winner = winner.clone();
            Box::pin(async move { Ok(Some(winner)) })
        });

    mocks
        .usage_repo
        .expect_release_active_slot()
        .times(1)
        .returning(|_| Box::pin(async { Ok(()) }));
    mocks
        .usage_repo
        .expect_release_participants()
        .times(1)
        .returning(|_, _, _| Box::pin(async { Ok(()) }));

    let usecase = mocks.build();
    let outcome = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap();

    match outcome {
        ActivationOutcome::AlreadyActive { record } => assert_eq!(record.id, winner_id),
        ActivationOutcome::Activated { .. } => panic!("the loser must not report Activated"),
    }
}

#[tokio::test]
async fn already_active_pair_republishes_a_missing_campaign() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new()
        .with_account(sample_account(account_id, owner, 3, "silver"))
        .with_template(sample_template(
            template_id,
            "follow",
            serde_json::json!([]),
            false,
        ));

    let existing = active_record(account_id, template_id);
    mocks
        .activation_repo
        .expect_find_by_pair()
        .returning(move |_, _| {
            let existing = existing.clone();
            Box::pin(async move { Ok(Some(existing)) })
        });
    mocks
        .campaign_repo
        .expect_find_current_by_pair()
        .returning(|_, _| Box::pin(async { Ok(None) }));
    mocks
        .campaign_repo
        .expect_publish()
        .times(1)
        .returning(|insert| {
            let campaign = campaign_from_insert(&insert);
            Box::pin(async move { Ok(campaign) })
        });

    let usecase = mocks.build();
    let outcome = usecase
        .activate(
            owner,
            ActivateMissionModel {
                account_id,
                template_id,
                config: sample_config(),
            },
        )
        .await
        .unwrap();

    assert!(matches!(outcome, ActivationOutcome::AlreadyActive { .. }));
}

#[tokio::test]
async fn list_missions_joins_records_with_latest_campaign() {
    let owner = Uuid::new_v4();
    let account_id = Uuid::new_v4();
    let template_id = Uuid::new_v4();

    let mut mocks = Mocks::new().with_account(sample_account(account_id, owner, 3, "silver"));

    let mut record = active_record(account_id, template_id);
    record.check_in_method = Some("QR_ONLY".to_string());
    let records = vec![record];
    mocks
        .activation_repo
        .expect_list_for_account()
        .with(eq(account_id))
        .returning(move |_| {
            let records = records.clone();
            Box::pin(async move { Ok(records) })
        });

    let now = Utc::now();
    let campaign = PublishedCampaignEntity {
        id: Uuid::new_v4(),
        account_id,
        template_id,
        status: "published".to_string(),
        reward: 100,
        max_participants: 20,
        valid_until: None,
        cooldown_hours: 24,
        requires_approval: false,
        check_in_method: Some("QR_ONLY".to_string()),
        published_at: now,
        created_at: now,
        updated_at: now,
    };
    let campaigns = vec![campaign];
    mocks
        .campaign_repo
        .expect_list_for_account()
        .with(eq(account_id))
        .returning(move |_| {
            let campaigns = campaigns.clone();
            Box::pin(async move { Ok(campaigns) })
        });

    let usecase = mocks.build();
    let statuses = usecase.list_missions(owner, account_id).await.unwrap();

    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].status, ActivationStatus::Active);
    assert_eq!(statuses[0].check_in_method, Some(CheckInMethod::QrOnly));
    assert_eq!(statuses[0].campaign_status, Some(CampaignStatus::Published));
}
