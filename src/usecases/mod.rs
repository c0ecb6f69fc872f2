pub mod activation;
pub mod connection_gate;
pub mod deactivation;
pub mod entitlement;
pub mod errors;
pub mod guards;
