//! struct-transformer-compiler
//!
//! This crate implements:
//!  1) Field resolution: naming rules, the primitive type table, option
//!     extraction and the submessage registry feeding the [`resolver`],
//!  2) Function synthesis (`synth` → `ir` → `printer`) producing the Go
//!     conversion function families, plus oneof helpers and the options block,
//!  3) Unit processing over a whole request (`generate`, `process_file`),
//!  4) A tokenizer + parser extracting destination structures from Go source,
//!  5) Error types (`TransformerError`) and the `ModelSource` trait.

pub mod error;
pub mod types;
pub mod utils;
pub mod config;
pub mod naming;
pub mod type_table;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod ir;
pub mod printer;
pub mod synth;
pub mod oneof;
pub mod support;
pub mod tokenizer;
pub mod parser;
pub mod models;
pub mod compiler;
pub mod traits;

pub use compiler::{generate, generate_file, process_file, Generation, GeneratedFile, UnitOutput};
pub use config::Config;
pub use error::TransformerError;
pub use models::{load_models, FsModelSource};
pub use support::render_support;
