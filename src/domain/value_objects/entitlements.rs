use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{
    mission_kinds::MissionKind, subscription_tiers::SubscriptionTier,
};

/// Limit names reported inside quota errors so the UI can offer an upgrade
/// path for the specific limit that was hit.
pub const LIMIT_MAX_ACTIVE_CAMPAIGNS: &str = "max_active_campaigns";
pub const LIMIT_MAX_PARTICIPANTS_PER_MONTH: &str = "max_participants_per_month";

/// Quotas and feature flags derived from `(account level, subscription tier)`.
///
/// Never persisted and never cached across requests: the tier is owned by the
/// external billing flow and can change between calls, so every enforcement
/// and every preview resolves fresh. Resolution is a static lookup with no
/// I/O, which keeps the preview path and the server-side enforcement path
/// incapable of disagreeing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ResourceLimits {
    pub max_active_campaigns: i64,
    pub max_participants_per_month: i64,
    pub supports_follow_campaigns: bool,
    pub supports_review_campaigns: bool,
    pub supports_photo_campaigns: bool,
    pub supports_video_campaigns: bool,
    pub supports_events: bool,
}

impl ResourceLimits {
    /// Resolves the effective limits for a business account.
    ///
    /// Level-1 accounts are locked out entirely, whatever tier the billing
    /// document claims. From level 2 up, a missing or unparseable tier
    /// degrades to `STARTER` instead of failing.
    pub fn resolve(level: i32, tier: Option<SubscriptionTier>) -> Self {
        if level <= 1 {
            return Self::locked();
        }
        Self::for_tier(tier.unwrap_or_default())
    }

    /// Zero entitlement: no activations, no feature flags.
    pub fn locked() -> Self {
        Self::default()
    }

    fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Starter => Self {
                max_active_campaigns: 1,
                max_participants_per_month: 50,
                supports_follow_campaigns: true,
                supports_review_campaigns: true,
                supports_photo_campaigns: false,
                supports_video_campaigns: false,
                supports_events: false,
            },
            SubscriptionTier::Silver => Self {
                max_active_campaigns: 3,
                max_participants_per_month: 200,
                supports_follow_campaigns: true,
                supports_review_campaigns: true,
                supports_photo_campaigns: true,
                supports_video_campaigns: false,
                supports_events: false,
            },
            SubscriptionTier::Gold => Self {
                max_active_campaigns: 5,
                max_participants_per_month: 500,
                supports_follow_campaigns: true,
                supports_review_campaigns: true,
                supports_photo_campaigns: true,
                supports_video_campaigns: true,
                supports_events: false,
            },
            SubscriptionTier::Platinum => Self {
                max_active_campaigns: 10,
                max_participants_per_month: 2000,
                supports_follow_campaigns: true,
                supports_review_campaigns: true,
                supports_photo_campaigns: true,
                supports_video_campaigns: true,
                supports_events: true,
            },
        }
    }

    /// Whether the resolved plan allows activating a template of this kind.
    /// Check-in missions are available on every paid tier.
    pub fn supports_kind(&self, kind: MissionKind) -> bool {
        match kind {
            MissionKind::Follow => self.supports_follow_campaigns,
            MissionKind::Review => self.supports_review_campaigns,
            MissionKind::Photo => self.supports_photo_campaigns,
            MissionKind::Video => self.supports_video_campaigns,
            MissionKind::Event => self.supports_events,
            MissionKind::CheckIn => self.max_active_campaigns > 0,
        }
    }
}

/// Entitlement preview for the UI: the same resolution the coordinator
/// enforces, plus the usage counters it would enforce against.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementPreviewDto {
    pub account_id: uuid::Uuid,
    pub level: i32,
    pub tier: Option<SubscriptionTier>,
    pub limits: ResourceLimits,
    pub current_active_campaigns: i64,
    pub participants_reserved_this_month: i64,
    pub period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_one_is_locked_out_on_every_tier() {
        for tier in [
            None,
            Some(SubscriptionTier::Starter),
            Some(SubscriptionTier::Silver),
            Some(SubscriptionTier::Gold),
            Some(SubscriptionTier::Platinum),
        ] {
            let limits = ResourceLimits::resolve(1, tier);
            assert_eq!(limits.max_active_campaigns, 0);
            assert_eq!(limits, ResourceLimits::locked());
        }
    }

    #[test]
    fn missing_tier_defaults_to_starter() {
        assert_eq!(
            ResourceLimits::resolve(2, None),
            ResourceLimits::resolve(2, Some(SubscriptionTier::Starter)),
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let first = ResourceLimits::resolve(4, Some(SubscriptionTier::Gold));
        let second = ResourceLimits::resolve(4, Some(SubscriptionTier::Gold));
        assert_eq!(first, second);
    }

    #[test]
    fn tiers_scale_quotas_monotonically() {
        let starter = ResourceLimits::resolve(2, Some(SubscriptionTier::Starter));
        let silver = ResourceLimits::resolve(2, Some(SubscriptionTier::Silver));
        let gold = ResourceLimits::resolve(2, Some(SubscriptionTier::Gold));
        let platinum = ResourceLimits::resolve(2, Some(SubscriptionTier::Platinum));

        assert!(starter.max_active_campaigns < silver.max_active_campaigns);
        assert!(silver.max_active_campaigns < gold.max_active_campaigns);
        assert!(gold.max_active_campaigns < platinum.max_active_campaigns);
        assert!(starter.max_participants_per_month < platinum.max_participants_per_month);
    }

    #[test]
    fn feature_flags_gate_kinds() {
        let starter = ResourceLimits::resolve(2, Some(SubscriptionTier::Starter));
        assert!(starter.supports_kind(MissionKind::Follow));
        assert!(starter.supports_kind(MissionKind::CheckIn));
        assert!(!starter.supports_kind(MissionKind::Video));

        let platinum = ResourceLimits::resolve(6, Some(SubscriptionTier::Platinum));
        assert!(platinum.supports_kind(MissionKind::Event));
    }
}
