//! Certificate template model
//!
//! This crate provides:
//! - Template JSON schema types (text and image elements on a canvas)
//! - Editing operations (add, patch, delete elements)
//! - Variable token extraction and substitution (`{NOMBRE}` style)
//! - Coordinate scaling between canvas, screen and page space
//! - Asset resolution for image URLs
//!
//! # Example
//!
//! ```ignore
//! use template::Template;
//!
//! let mut template = Template::from_json(json)?;
//! let id = template.add_text();
//! let tokens = template.used_tokens();
//! ```

pub mod assets;
pub mod email;
mod model;
pub mod parser;
pub mod scale;
mod schema;
pub mod vars;

pub use assets::{AssetError, AssetSource, DirAssets, MemoryAssets};
pub use email::{EmailTemplate, ResolvedEmail};
pub use model::ElementPatch;
pub use parser::parse_template;
pub use schema::*;

use thiserror::Error;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse template: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
