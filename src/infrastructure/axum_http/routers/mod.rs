pub mod entitlements;
pub mod missions;
