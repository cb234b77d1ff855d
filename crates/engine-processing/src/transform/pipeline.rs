use crate::error::TransformError;
use model::records::table::Table;
use std::sync::Arc;
use tracing::debug;

/// One whole-table step. Takes the table by value and returns the next one.
pub trait Transform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, table: Table) -> Result<Table, TransformError>;
}

pub trait TransformPipelineExt {
    fn add_if<T, F>(self, condition: bool, factory: F) -> Self
    where
        T: Transform + 'static,
        F: FnOnce() -> T;
}

#[derive(Clone)]
pub struct TransformPipeline {
    transforms: Vec<Arc<dyn Transform>>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn apply(&self, table: Table) -> Result<Table, TransformError> {
        self.transforms.iter().try_fold(table, |acc, transform| {
            let out = transform.apply(acc)?;
            debug!(
                "{} -> {}: {} rows, columns {:?}",
                transform.name(),
                out.name(),
                out.row_count(),
                out.column_names()
            );
            Ok(out)
        })
    }

    pub fn add_transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Arc::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl TransformPipelineExt for TransformPipeline {
    fn add_if<T, F>(mut self, condition: bool, factory: F) -> Self
    where
        T: Transform + 'static,
        F: FnOnce() -> T,
    {
        if condition {
            self = self.add_transform(factory());
        }
        self
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
