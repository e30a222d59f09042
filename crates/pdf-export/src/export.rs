//! Template export pipeline
//!
//! Maps a certificate template onto the output page: canvas
//! coordinates are scaled per axis to A4 landscape, the background is
//! stretched over the whole page, and each element is drawn in
//! collection order. A broken element (missing asset, unparseable
//! image, no usable font) is skipped with a warning so the rest of
//! the certificate still renders.

use crate::document::{Color, PdfDocument};
use crate::font::FontFamily;
use crate::{PdfError, Result, PAGE_HEIGHT, PAGE_WIDTH};
use std::collections::HashMap;
use template::scale::PageScale;
use template::{vars, AssetSource, Element, Template};

/// Filename used when the template has no usable name
const DEFAULT_FILENAME: &str = "certificado.pdf";

struct LoadedFamily {
    name: String,
    family: FontFamily,
}

/// Renders templates to PDF bytes.
///
/// Font bytes are parsed once when a family is added and shared by
/// every export; each export builds its own document from them.
#[derive(Default)]
pub struct Exporter {
    families: Vec<LoadedFamily>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font family available to text elements. The first family
    /// added doubles as the fallback for unknown family names.
    pub fn add_font_family(
        &mut self,
        name: &str,
        regular: &[u8],
        bold: Option<&[u8]>,
    ) -> Result<()> {
        if self.families.iter().any(|f| f.name == name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }
        let family = FontFamily::new(name, regular, bold)?;
        self.families.push(LoadedFamily {
            name: name.to_string(),
            family,
        });
        Ok(())
    }

    /// Render the design as-is, `{TOKEN}`s left literal: the blank
    /// certificate download.
    pub fn export_blank(&self, template: &Template, assets: &dyn AssetSource) -> Result<Vec<u8>> {
        self.render(template, assets, None)
    }

    /// Render with `{TOKEN}` placeholders substituted from `bindings`.
    /// Test generation is this same path fed with sample bindings.
    pub fn export_with_values(
        &self,
        template: &Template,
        assets: &dyn AssetSource,
        bindings: &HashMap<String, String>,
    ) -> Result<Vec<u8>> {
        self.render(template, assets, Some(bindings))
    }

    /// Output filename derived from the template name. Path separators
    /// are folded to dashes so the result stays a bare filename.
    pub fn filename(&self, template: &Template) -> String {
        let nombre = template.nombre.trim();
        if nombre.is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            format!("{}.pdf", nombre.replace(['/', '\\'], "-"))
        }
    }

    fn render(
        &self,
        template: &Template,
        assets: &dyn AssetSource,
        bindings: Option<&HashMap<String, String>>,
    ) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new();
        for loaded in &self.families {
            doc.add_font_family(&loaded.name, loaded.family.clone())?;
        }
        self.render_into(&mut doc, template, assets, bindings)?;
        doc.to_bytes()
    }

    fn render_into(
        &self,
        doc: &mut PdfDocument,
        template: &Template,
        assets: &dyn AssetSource,
        bindings: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let scale = PageScale::new(template.canvas, PAGE_WIDTH, PAGE_HEIGHT);

        if let Some(url) = &template.background_image_url {
            match assets.fetch(url) {
                Ok(bytes) => {
                    if let Err(e) = doc.insert_image(&bytes, 0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT) {
                        log::warn!("skipping background {url}: {e}");
                    }
                }
                Err(e) => log::warn!("skipping background {url}: {e}"),
            }
        }

        for element in &template.fields {
            match element {
                Element::Text(e) => {
                    let text = match bindings {
                        Some(values) => vars::substitute(&e.text, values),
                        None => e.text.clone(),
                    };

                    let family = if doc.has_family(&e.font_family) {
                        e.font_family.clone()
                    } else if let Some(fallback) = doc.first_family() {
                        fallback.to_string()
                    } else {
                        log::warn!("skipping text {}: no fonts loaded", e.id);
                        continue;
                    };

                    doc.set_font(&family, scale.font_size(e.font_size))?;
                    doc.set_font_style(e.font_style);
                    doc.set_text_color(Color::from_hex(&e.fill).unwrap_or_else(Color::black));
                    if let Err(err) =
                        doc.insert_text(&text, e.x * scale.x, e.y * scale.y, e.align)
                    {
                        log::warn!("skipping text {}: {err}", e.id);
                    }
                }
                Element::Image(e) => {
                    let bytes = match assets.fetch(&e.image_url) {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            log::warn!("skipping image {}: {err}", e.id);
                            continue;
                        }
                    };
                    if let Err(err) = doc.insert_image(
                        &bytes,
                        e.x * scale.x,
                        e.y * scale.y,
                        e.width * scale.x,
                        e.height * scale.y,
                    ) {
                        log::warn!("skipping image {}: {err}", e.id);
                    }
                }
            }
        }

        Ok(())
    }
}
