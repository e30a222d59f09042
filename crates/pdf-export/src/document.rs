//! PDF document builder
//!
//! A `PdfDocument` is a single A4 landscape page built from scratch.
//! Content operators accumulate in a buffer while fonts record the
//! characters drawn through them; fonts, images and the content stream
//! are wired into the page when the document is serialized.

use crate::font::{FontData, FontFamily};
use crate::image::{generate_image_operators, ImageXObject};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{PdfError, Result, PAGE_HEIGHT, PAGE_WIDTH};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use template::{Align, FontStyle};

/// RGB color with components in the 0.0-1.0 range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex color
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::from_rgb(r, g, b))
    }

    pub fn black() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Single-page PDF document under construction
pub struct PdfDocument {
    inner: Document,
    page_id: ObjectId,
    /// Registered families in registration order
    family_order: Vec<String>,
    font_families: HashMap<String, FontFamily>,
    /// Variant name -> embedded font object ID (filled at save)
    embedded_fonts: HashMap<String, ObjectId>,
    /// Variant name -> page resource name ("F1", "F2", ...)
    font_resources: HashMap<String, String>,
    /// Image content hash -> (resource name, XObject ID)
    embedded_images: HashMap<u64, (String, ObjectId)>,
    next_font_number: u32,
    next_image_number: u32,
    content: Vec<u8>,
    current_family: Option<String>,
    current_style: FontStyle,
    current_font_size: f64,
    current_color: Color,
}

impl PdfDocument {
    /// Create an empty A4 landscape document
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.new_object_id();
        let page_id = inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH as f32),
                Object::Real(PAGE_HEIGHT as f32),
            ],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        inner.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            page_id,
            family_order: Vec::new(),
            font_families: HashMap::new(),
            embedded_fonts: HashMap::new(),
            font_resources: HashMap::new(),
            embedded_images: HashMap::new(),
            next_font_number: 1,
            next_image_number: 1,
            content: Vec::new(),
            current_family: None,
            current_style: FontStyle::Normal,
            current_font_size: 12.0,
            current_color: Color::black(),
        }
    }

    /// Register a parsed font family
    pub fn add_font_family(&mut self, family_name: &str, family: FontFamily) -> Result<()> {
        if self.font_families.contains_key(family_name) {
            return Err(PdfError::FontAlreadyExists(family_name.to_string()));
        }
        self.family_order.push(family_name.to_string());
        self.font_families.insert(family_name.to_string(), family);
        Ok(())
    }

    pub fn has_family(&self, family_name: &str) -> bool {
        self.font_families.contains_key(family_name)
    }

    /// First registered family, the fallback for unknown names
    pub fn first_family(&self) -> Option<&str> {
        self.family_order.first().map(|s| s.as_str())
    }

    /// Set the current font. The family must be registered.
    pub fn set_font(&mut self, family_name: &str, size: f64) -> Result<()> {
        if !self.font_families.contains_key(family_name) {
            return Err(PdfError::FontNotFound(family_name.to_string()));
        }
        self.current_family = Some(family_name.to_string());
        self.current_font_size = size;
        Ok(())
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.current_style = style;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.current_color = color;
    }

    /// Measure text in the current font, in points
    pub fn text_width(&self, text: &str) -> Result<f64> {
        let font = self.current_font()?;
        Ok(font.text_width_points(text, self.current_font_size))
    }

    fn current_font(&self) -> Result<&FontData> {
        let family_name = self
            .current_family
            .as_deref()
            .ok_or_else(|| PdfError::FontNotFound("no font set".to_string()))?;
        let family = self
            .font_families
            .get(family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.to_string()))?;
        Ok(family.variant(self.current_style))
    }

    /// Insert text at (x, y) in page coordinates (origin top-left).
    ///
    /// `x` is the alignment anchor: center/right text extends to the
    /// left of it. Uses the current font, style, size and color.
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64, align: Align) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let family_name = self
            .current_family
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("no font set".to_string()))?;
        let style = self.current_style;
        let size = self.current_font_size;

        let (variant_name, text_hex, text_width) = {
            let family = self
                .font_families
                .get_mut(&family_name)
                .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;
            let font = family.variant_mut(style);
            font.add_chars(text);
            (
                font.name.clone(),
                font.encode_text_hex(text),
                font.text_width_points(text, size),
            )
        };

        let resource_name = self.font_resource_name(&variant_name);
        let pdf_y = PAGE_HEIGHT - y;

        let ctx = TextRenderContext {
            font_name: resource_name,
            font_size: size,
            text_width,
            color: self.current_color,
        };
        let ops = generate_text_operators(&text_hex, x, pdf_y, align, &ctx);
        self.content.extend_from_slice(&ops);
        Ok(())
    }

    /// Insert an image at (x, y) in page coordinates (origin
    /// top-left), stretched to `width` x `height` points. Identical
    /// bytes reuse the same XObject.
    pub fn insert_image(
        &mut self,
        data: &[u8],
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let resource_name = self.image_resource_name(data)?;
        let pdf_y = PAGE_HEIGHT - y - height;
        let ops = generate_image_operators(&resource_name, x, pdf_y, width, height);
        self.content.extend_from_slice(&ops);
        Ok(())
    }

    /// Serialize the document, embedding fonts and wiring the page
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.embed_fonts()?;
        self.finalize_page()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    fn font_resource_name(&mut self, variant_name: &str) -> String {
        if let Some(name) = self.font_resources.get(variant_name) {
            return name.clone();
        }
        let name = format!("F{}", self.next_font_number);
        self.next_font_number += 1;
        self.font_resources
            .insert(variant_name.to_string(), name.clone());
        name
    }

    fn image_resource_name(&mut self, data: &[u8]) -> Result<String> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let key = hasher.finish();

        if let Some((name, _)) = self.embedded_images.get(&key) {
            return Ok(name.clone());
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());
        let name = format!("Im{}", self.next_image_number);
        self.next_image_number += 1;
        self.embedded_images.insert(key, (name.clone(), object_id));
        Ok(name)
    }

    /// Embed every font variant that was actually used
    fn embed_fonts(&mut self) -> Result<()> {
        let mut to_embed = Vec::new();
        for family_name in &self.family_order {
            if let Some(family) = self.font_families.get(family_name) {
                for font in family.variants() {
                    if !font.used_chars.is_empty()
                        && !self.embedded_fonts.contains_key(&font.name)
                    {
                        to_embed.push(font.clone());
                    }
                }
            }
        }
        for font in to_embed {
            let object_id = self.embed_font_object(&font)?;
            self.embedded_fonts.insert(font.name.clone(), object_id);
        }
        Ok(())
    }

    /// Write the PDF objects for one font and cross-link the references
    fn embed_font_object(&mut self, font: &FontData) -> Result<ObjectId> {
        let mut objects = font.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(objects.font_file_stream);
        objects
            .font_descriptor
            .set("FontFile2", Object::Reference(font_file_id));
        let descriptor_id = self
            .inner
            .add_object(Object::Dictionary(objects.font_descriptor));

        objects
            .cid_font
            .set("FontDescriptor", Object::Reference(descriptor_id));
        let cid_font_id = self.inner.add_object(Object::Dictionary(objects.cid_font));

        let tounicode_id = self.inner.add_object(objects.tounicode_stream);

        objects.type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );
        objects
            .type0_font
            .set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(Object::Dictionary(objects.type0_font)))
    }

    /// Attach the content stream and resource dictionaries to the page
    fn finalize_page(&mut self) -> Result<()> {
        let content = std::mem::take(&mut self.content);
        let content_id = self
            .inner
            .add_object(Stream::new(dictionary! {}, content));

        let mut font_dict = Dictionary::new();
        for (variant_name, resource_name) in &self.font_resources {
            if let Some(object_id) = self.embedded_fonts.get(variant_name) {
                font_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
            }
        }

        let mut xobject_dict = Dictionary::new();
        for (resource_name, object_id) in self.embedded_images.values() {
            xobject_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
        }

        let mut resources = Dictionary::new();
        if !font_dict.is_empty() {
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !xobject_dict.is_empty() {
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        let page = self
            .inner
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .map_err(|e| PdfError::ParseError(e.to_string()))?;
        let mut page = page.clone();
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources));
        self.inner
            .objects
            .insert(self.page_id, Object::Dictionary(page));
        Ok(())
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl PdfDocument {
    /// Insert a family backed by an unparsed font, for operator tests
    pub(crate) fn insert_stub_family(&mut self, name: &str) {
        self.family_order.push(name.to_string());
        self.font_families.insert(
            name.to_string(),
            FontFamily {
                regular: FontData::stub(&format!("{name}-regular")),
                bold: None,
            },
        );
    }

    pub(crate) fn content_str(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#ff0000").unwrap();
        assert_eq!(color, Color::from_rgb(255, 0, 0));

        let color = Color::from_hex("#222222").unwrap();
        assert!((color.r - 34.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("222222").is_none()); // missing '#'
        assert!(Color::from_hex("#22222").is_none()); // wrong length
        assert!(Color::from_hex("#gggggg").is_none()); // non-hex digits
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn test_empty_document_saves() {
        let mut doc = PdfDocument::new();
        let bytes = doc.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_media_box_is_a4_landscape() {
        let mut doc = PdfDocument::new();
        let bytes = doc.to_bytes().unwrap();

        let parsed = Document::load_mem(&bytes).unwrap();
        let page_id = parsed.get_pages()[&1];
        let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_f32().unwrap(), 842.0);
        assert_eq!(media_box[3].as_f32().unwrap(), 595.0);
    }

    #[test]
    fn test_set_font_unknown_family() {
        let mut doc = PdfDocument::new();
        assert!(matches!(
            doc.set_font("Ghost", 12.0),
            Err(PdfError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_insert_text_without_font_fails() {
        let mut doc = PdfDocument::new();
        assert!(doc.insert_text("hola", 10.0, 10.0, Align::Left).is_err());
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut doc = PdfDocument::new();
        assert!(doc.insert_text("", 10.0, 10.0, Align::Left).is_ok());
    }

    #[test]
    fn test_insert_image_flips_y() {
        let jpeg = vec![
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x64, 0x00, 0xC8, 0x03, 0x01, 0x22,
            0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
        ];
        let mut doc = PdfDocument::new();
        doc.insert_image(&jpeg, 100.0, 95.0, 200.0, 100.0).unwrap();

        let content = String::from_utf8(doc.content.clone()).unwrap();
        // 595 - 95 - 100 = 400
        assert!(content.contains("200 0 0 100 100 400 cm"));
        assert!(content.contains("/Im1 Do"));
    }

    #[test]
    fn test_identical_image_bytes_share_xobject() {
        let jpeg = vec![
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x64, 0x00, 0xC8, 0x03, 0x01, 0x22,
            0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
        ];
        let mut doc = PdfDocument::new();
        doc.insert_image(&jpeg, 0.0, 0.0, 50.0, 50.0).unwrap();
        doc.insert_image(&jpeg, 100.0, 0.0, 50.0, 50.0).unwrap();
        assert_eq!(doc.embedded_images.len(), 1);
    }

    fn doc_with_stub_family(name: &str) -> PdfDocument {
        let mut doc = PdfDocument::new();
        doc.insert_stub_family(name);
        doc
    }

    #[test]
    fn test_add_family_twice_fails() {
        let mut doc = doc_with_stub_family("Inter");
        let duplicate = FontFamily {
            regular: FontData::stub("Inter-regular"),
            bold: None,
        };
        assert!(matches!(
            doc.add_font_family("Inter", duplicate),
            Err(PdfError::FontAlreadyExists(_))
        ));
    }

    #[test]
    fn test_first_family_is_registration_order() {
        let doc = doc_with_stub_family("Inter");
        assert_eq!(doc.first_family(), Some("Inter"));
        assert!(doc.has_family("Inter"));
        assert!(!doc.has_family("Ghost"));
    }

    #[test]
    fn test_insert_text_buffers_operators() {
        let mut doc = doc_with_stub_family("Inter");
        doc.set_font("Inter", 24.0).unwrap();
        doc.set_text_color(Color::from_rgb(255, 0, 0));
        doc.insert_text("Ab", 100.0, 95.0, Align::Left).unwrap();

        let content = String::from_utf8(doc.content.clone()).unwrap();
        assert!(content.contains("/F1 24 Tf"));
        assert!(content.contains("1 0 0 rg"));
        assert!(content.contains("100 500 Td")); // 595 - 95
        assert!(content.contains("<00000000> Tj")); // stub maps every char to GID 0
    }
}
