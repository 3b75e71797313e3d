use std::fs;
use std::path::{Path, PathBuf};

use struct_transformer_schema::Models;
use tracing::debug;

use crate::{
    error::TransformerError,
    parser::parse_go,
    tokenizer::tokenize_go,
    traits::ModelSource,
};

/// Extracts models from Go source text.
pub fn models_from_go(text: &str) -> Result<Models, TransformerError> {
    let tokens = tokenize_go(text)?;
    parse_go(&tokens)
}

/// Reads models from a `.json` document or introspects a Go source file.
pub fn load_models(path: &Path) -> Result<Models, TransformerError> {
    let text = fs::read_to_string(path)?;
    let models = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        _ => models_from_go(&text)?,
    };
    debug!(path = %path.display(), structures = models.structures.len(), "models loaded");
    Ok(models)
}

/// Loads models from files below a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsModelSource {
    root: PathBuf,
}

impl FsModelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsModelSource { root: root.into() }
    }
}

impl ModelSource for FsModelSource {
    fn load(&self, path: &str) -> Result<Models, TransformerError> {
        load_models(&self.root.join(path))
    }
}
