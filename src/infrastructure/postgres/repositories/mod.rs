pub mod accounts;
pub mod activations;
pub mod campaigns;
pub mod connections;
pub mod templates;
pub mod usage;
