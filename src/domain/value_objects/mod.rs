pub mod activations;
pub mod connections;
pub mod entitlements;
pub mod enums;
