//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::data_type::{DataType, SqlDialect};

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a generic `DataType` into a database-specific SQL type string.
    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String;

    /// The column clause that makes the database assign sequential values.
    fn auto_increment_clause(&self) -> &'static str;

    /// Trailing options for `TRUNCATE TABLE` that reset identity counters.
    /// Empty when the dialect resets them implicitly.
    fn truncate_restart_identity(&self) -> &'static str;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String {
        let mut type_name = data_type.postgres_name().into_owned();
        if data_type.supports_length(SqlDialect::Postgres)
            && let Some(max_len) = max_length
        {
            type_name = format!("{type_name}({max_len})");
        }
        type_name
    }

    fn auto_increment_clause(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }

    fn truncate_restart_identity(&self) -> &'static str {
        "RESTART IDENTITY"
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn render_data_type(&self, data_type: &DataType, max_length: Option<usize>) -> String {
        let mut type_name = data_type.mysql_name().into_owned();
        if data_type.supports_length(SqlDialect::MySql)
            && let Some(max_len) = max_length
        {
            type_name = format!("{type_name}({max_len})");
        }
        type_name
    }

    fn auto_increment_clause(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn truncate_restart_identity(&self) -> &'static str {
        // TRUNCATE always resets AUTO_INCREMENT in MySQL
        ""
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}
