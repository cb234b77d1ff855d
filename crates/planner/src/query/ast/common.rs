#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}
