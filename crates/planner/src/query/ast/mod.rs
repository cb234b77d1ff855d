pub mod common;
pub mod create_table;
pub mod expr;
pub mod insert;
pub mod select;
pub mod truncate;
