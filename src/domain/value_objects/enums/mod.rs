pub mod activation_statuses;
pub mod campaign_statuses;
pub mod check_in_methods;
pub mod mission_kinds;
pub mod subscription_tiers;
