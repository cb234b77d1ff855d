use crate::query::ast::{
    common::TableRef,
    create_table::{ColumnDef, CreateTable},
};
use model::core::data_type::DataType;

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    ast: CreateTable,
}

impl CreateTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: CreateTable {
                table,
                columns: Vec::new(),
                if_not_exists: false,
            },
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.ast.if_not_exists = true;
        self
    }

    pub fn column(mut self, name: &str, data_type: DataType) -> Self {
        self.ast.columns.push(ColumnDef::new(name, data_type));
        self
    }

    pub fn primary_key(mut self, name: &str, data_type: DataType) -> Self {
        let mut def = ColumnDef::new(name, data_type);
        def.is_primary_key = true;
        def.is_nullable = false;
        self.ast.columns.push(def);
        self
    }

    /// Adds a primary key whose values the database assigns.
    pub fn identity(mut self, name: &str, data_type: DataType) -> Self {
        let mut def = ColumnDef::new(name, data_type);
        def.is_primary_key = true;
        def.is_nullable = false;
        def.auto_increment = true;
        self.ast.columns.push(def);
        self
    }

    pub fn build(self) -> CreateTable {
        self.ast
    }
}
