use crate::query::ast::common::TableRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Truncate {
    pub table: TableRef,
    /// Also reset identity/auto-increment counters where the dialect needs it spelled out.
    pub restart_identity: bool,
}
