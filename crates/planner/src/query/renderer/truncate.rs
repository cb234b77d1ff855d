use crate::query::{
    ast::truncate::Truncate,
    renderer::{Render, Renderer},
};

impl Render for Truncate {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("TRUNCATE TABLE ");
        r.render_table_ref(&self.table);
        let restart = r.dialect.truncate_restart_identity();
        if self.restart_identity && !restart.is_empty() {
            r.sql.push(' ');
            r.sql.push_str(restart);
        }
        r.sql.push(';');
    }
}
