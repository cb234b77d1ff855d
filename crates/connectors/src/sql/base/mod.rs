pub mod adapter;
pub mod error;
pub mod options;
pub mod row;
