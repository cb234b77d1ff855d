use crate::query::{
    ast::expr::Expr,
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => {
                if let Some(qualifier) = &ident.qualifier {
                    r.sql.push_str(&r.dialect.quote_identifier(qualifier));
                    r.sql.push('.');
                }
                r.sql.push_str(&r.dialect.quote_identifier(&ident.name));
            }
            Expr::Value(value) => r.add_param(value.clone()),
            Expr::Literal(raw) => r.sql.push_str(raw),
        }
    }
}
