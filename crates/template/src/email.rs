//! Email templates
//!
//! The dashboard pairs each certificate with a notification email whose
//! subject and HTML body share the same `{TOKEN}` grammar as the canvas
//! text elements.

use crate::vars;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Email template with substitutable subject and body
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EmailTemplate {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Subject line
    pub asunto: String,

    /// HTML body
    pub contenido_html: String,
}

/// A resolved email, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEmail {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    /// Apply the same bindings to subject and body independently
    pub fn resolve(&self, bindings: &HashMap<String, String>) -> ResolvedEmail {
        ResolvedEmail {
            subject: vars::substitute(&self.asunto, bindings),
            body: vars::substitute(&self.contenido_html, bindings),
        }
    }

    /// Tokens referenced by subject or body
    pub fn used_tokens(&self) -> BTreeSet<String> {
        let mut tokens = vars::extract_tokens(&self.asunto);
        tokens.extend(vars::extract_tokens(&self.contenido_html));
        tokens
    }
}
