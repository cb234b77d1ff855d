pub mod destination;
pub mod memory;
pub mod sql;
