use crate::query::ast::{common::TableRef, expr::Expr, insert::Insert};
use model::core::value::Value;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                ..Default::default()
            },
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.ast.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Appends one row; every value is bound as a parameter.
    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.ast
            .values
            .push(row.into_iter().map(Expr::Value).collect());
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
