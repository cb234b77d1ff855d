pub mod connectors;
pub mod error;
