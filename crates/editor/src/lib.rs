//! Interactive certificate editor
//!
//! This crate provides:
//! - `EditorSession`: template working copy, selection, drag and
//!   inline-edit state
//! - `ImageStore`: decoded images, kept out of the serialized model
//! - Display-list generation for whatever surface hosts the editor
//!
//! # Example
//!
//! ```ignore
//! use editor::{draw_ops, EditorSession};
//!
//! let mut session = EditorSession::open(template, &assets);
//! session.set_container_size(800.0, 600.0);
//! let id = session.add_text();
//! let ops = draw_ops(&session);
//! ```

pub mod display;
pub mod images;
pub mod session;

pub use display::{draw_ops, DrawOp, TOKEN_TEXT_FILL};
pub use images::ImageStore;
pub use session::{EditorSession, Interaction, TextEditRequest, Viewport};
