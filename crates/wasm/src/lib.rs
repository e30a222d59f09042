//! WASM bindings for the certificate pipeline
//!
//! This crate provides a JavaScript-friendly API for:
//! - Loading certificate templates from JSON
//! - Inspecting the `{TOKEN}` placeholders a template uses
//! - Exporting the filled certificate as PDF bytes
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { CertificateTemplate } from 'certcanvas-wasm';
//!
//! await init();
//!
//! const cert = CertificateTemplate.fromJson(templateJson);
//! cert.loadFont('Inter', interRegular, interBold);
//! cert.loadAsset('fondo.png', backgroundBytes);
//!
//! // blank design, tokens left literal
//! const blank = cert.exportBlank();
//!
//! // trial certificate with sample data
//! const trial = cert.testGenerate({ NOMBRE: 'Ana', CURSO: 'Excel Básico' });
//!
//! // final certificate
//! const pdf = cert.exportPdf({ NOMBRE: 'Ana', CURSO: 'Excel Básico' });
//! download(pdf, cert.filename());
//! ```

use pdf_export::Exporter;
use std::collections::HashMap;
use template::{vars, MemoryAssets, Template};
use wasm_bindgen::prelude::*;

// Panic hook for readable errors in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Certificate template with its fonts and image assets
#[wasm_bindgen]
pub struct CertificateTemplate {
    template: Template,
    assets: MemoryAssets,
    exporter: Exporter,
}

#[wasm_bindgen]
impl CertificateTemplate {
    /// Create a template from JSON
    ///
    /// @param json - Template JSON string
    /// @returns CertificateTemplate instance
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<CertificateTemplate, JsValue> {
        let template =
            template::parse_template(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(CertificateTemplate {
            template,
            assets: MemoryAssets::new(),
            exporter: Exporter::new(),
        })
    }

    /// Load a font family. The font is parsed once here and reused by
    /// every export; the first family loaded is the fallback for
    /// elements naming an unknown family.
    ///
    /// @param name - Family name as referenced by text elements
    /// @param regular - Regular TTF bytes (Uint8Array)
    /// @param bold - Bold TTF bytes, or undefined
    #[wasm_bindgen(js_name = loadFont)]
    pub fn load_font(
        &mut self,
        name: &str,
        regular: &[u8],
        bold: Option<Vec<u8>>,
    ) -> Result<(), JsValue> {
        self.exporter
            .add_font_family(name, regular, bold.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Register image bytes for a URL the template references.
    /// `data:` URIs decode on their own and need no registration.
    ///
    /// @param url - URL as stored in the template
    /// @param bytes - Image bytes (Uint8Array)
    #[wasm_bindgen(js_name = loadAsset)]
    pub fn load_asset(&mut self, url: &str, bytes: &[u8]) {
        self.assets.insert(url, bytes.to_vec());
    }

    /// Tokens used across the template's text elements
    ///
    /// @returns Array of token names (without braces)
    pub fn tokens(&self) -> Vec<JsValue> {
        self.template
            .used_tokens()
            .into_iter()
            .map(|t| JsValue::from_str(&t))
            .collect()
    }

    /// Export with `{TOKEN}` placeholders substituted
    ///
    /// @param data - Object mapping token names to values
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self, data: JsValue) -> Result<Vec<u8>, JsValue> {
        let bindings: HashMap<String, String> = serde_wasm_bindgen::from_value(data)?;
        self.exporter
            .export_with_values(&self.template, &self.assets, &bindings)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Trial export: substitutes the caller's sample bindings so the
    /// design can be checked with demo data before sending anything
    ///
    /// @param data - Object mapping token names to sample values
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = testGenerate)]
    pub fn test_generate(&self, data: JsValue) -> Result<Vec<u8>, JsValue> {
        self.export_pdf(data)
    }

    /// Export as-is, tokens left literal (blank certificate download)
    ///
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = exportBlank)]
    pub fn export_blank(&self) -> Result<Vec<u8>, JsValue> {
        self.exporter
            .export_blank(&self.template, &self.assets)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Suggested download filename
    pub fn filename(&self) -> String {
        self.exporter.filename(&self.template)
    }

    /// Serialize the template back to JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.template
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Extract `{TOKEN}` names from a string
///
/// @param text - Text to scan
/// @returns Array of token names (without braces)
#[wasm_bindgen(js_name = extractTokens)]
pub fn extract_tokens(text: &str) -> Vec<JsValue> {
    vars::extract_tokens(text)
        .into_iter()
        .map(|t| JsValue::from_str(&t))
        .collect()
}

/// Substitute `{TOKEN}` placeholders in a string.
/// Unbound tokens stay literal.
///
/// @param text - Text with placeholders
/// @param data - Object mapping token names to values
#[wasm_bindgen(js_name = substituteTokens)]
pub fn substitute_tokens(text: &str, data: JsValue) -> Result<String, JsValue> {
    let bindings: HashMap<String, String> = serde_wasm_bindgen::from_value(data)?;
    Ok(vars::substitute(text, &bindings))
}
