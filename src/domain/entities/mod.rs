pub mod account_usage;
pub mod activation_records;
pub mod business_accounts;
pub mod business_connections;
pub mod mission_templates;
pub mod published_campaigns;
