use crate::query::{
    ast::create_table::{ColumnDef, CreateTable},
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.render(r);
        }
        r.sql.push_str(");");
    }
}

impl Render for ColumnDef {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
        r.sql.push(' ');
        r.sql
            .push_str(&r.dialect.render_data_type(&self.data_type, self.max_length));

        if self.auto_increment {
            r.sql.push(' ');
            r.sql.push_str(r.dialect.auto_increment_clause());
        }

        if self.is_primary_key {
            r.sql.push_str(" PRIMARY KEY");
        } else if !self.is_nullable {
            r.sql.push_str(" NOT NULL");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        query::{
            builder::create_table::CreateTableBuilder,
            dialect::{MySql, Postgres},
            renderer::render,
        },
        table_ref,
    };
    use model::core::data_type::DataType;

    #[test]
    fn test_render_create_table_postgres() {
        let ast = CreateTableBuilder::new(table_ref!("order_items"))
            .if_not_exists()
            .identity("order_item_id", DataType::Int)
            .column("subtotal", DataType::Float)
            .build();

        let (sql, params) = render(&ast, &Postgres);
        assert!(params.is_empty());
        assert_eq!(
            sql,
            concat!(
                r#"CREATE TABLE IF NOT EXISTS "order_items" ("#,
                r#""order_item_id" INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, "#,
                r#""subtotal" FLOAT);"#
            )
        );
    }

    #[test]
    fn test_render_create_table_mysql() {
        let ast = CreateTableBuilder::new(table_ref!("customers"))
            .primary_key("customer_id", DataType::Int)
            .column("customer_name", DataType::String)
            .build();

        let (sql, _) = render(&ast, &MySql);
        assert_eq!(
            sql,
            "CREATE TABLE `customers` (`customer_id` INT PRIMARY KEY, `customer_name` TEXT);"
        );
    }
}
