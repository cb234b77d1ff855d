use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column reference, optionally qualified by a table or alias.
    Identifier(Ident),
    /// A value bound as a query parameter.
    Value(Value),
    /// Raw SQL emitted verbatim.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub qualifier: Option<String>,
    pub name: String,
}
