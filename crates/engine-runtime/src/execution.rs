pub mod executor;
pub mod extract;
pub mod factory;
pub mod report;
