pub mod error;
pub mod filter;
pub mod orders;
pub mod prepare;
pub mod transform;
