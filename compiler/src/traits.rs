use std::collections::BTreeMap;
use std::io;

use crate::error::TransformerError;
use struct_transformer_schema::Models;

/// Provides destination models by the path named in a file's
/// `transformer.go_models_file_path` option.
pub trait ModelSource {
    fn load(&self, path: &str) -> Result<Models, TransformerError>;
}

/// Models already in memory, keyed by path.
impl ModelSource for BTreeMap<String, Models> {
    fn load(&self, path: &str) -> Result<Models, TransformerError> {
        self.get(path).cloned().ok_or_else(|| {
            TransformerError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("models {:?} not found", path),
            ))
        })
    }
}
