//! Certificate PDF generation
//!
//! This crate provides:
//! - Building a single-page A4 landscape document from scratch
//! - Embedding TrueType fonts (Type0/CIDFontType2, Identity-H)
//! - Inserting aligned text and images at scaled positions
//! - The export pipeline mapping a certificate template onto the page
//!
//! # Example
//!
//! ```ignore
//! use pdf_export::Exporter;
//!
//! let mut exporter = Exporter::new();
//! exporter.add_font_family("Inter", &inter_regular, Some(&inter_bold))?;
//! let bytes = exporter.export_with_values(&template, &assets, &values)?;
//! std::fs::write(exporter.filename(&template), bytes)?;
//! ```

mod document;
mod export;
mod font;
mod image;
mod text;

pub use document::{Color, PdfDocument};
pub use export::Exporter;
pub use font::{FontData, FontFamily};
pub use image::ImageXObject;
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Output page width in points (ISO A4 landscape)
pub const PAGE_WIDTH: f64 = 842.0;

/// Output page height in points (ISO A4 landscape)
pub const PAGE_HEIGHT: f64 = 595.0;

/// Errors that can occur during PDF generation
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
