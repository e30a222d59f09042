//! Editing operations on a template

use crate::schema::{Align, CanvasSize, Element, FontStyle, ImageElement, Template, TextElement};
use crate::vars;
use crate::Result;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Largest edge a newly placed image gets on the canvas.
/// Width and height are capped independently, so oversized images
/// come in with their aspect ratio changed.
const NEW_IMAGE_MAX_SIDE: f64 = 200.0;

/// Partial update for an element. Unset fields are left untouched;
/// fields that don't apply to the element's variant are ignored.
#[derive(Debug, Clone, Default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub fill: Option<String>,
    pub align: Option<Align>,
    pub font_style: Option<FontStyle>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub image_url: Option<String>,
}

impl Template {
    /// Create an empty template with the default canvas
    pub fn new(nombre: &str) -> Self {
        Self {
            nombre: nombre.to_string(),
            ..Self::default()
        }
    }

    /// Parse a template from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        crate::parser::parse_template(json)
    }

    /// Serialize the template to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Look up an element by ID
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.fields.iter().find(|e| e.id() == id)
    }

    /// Look up an element by ID, mutably
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.fields.iter_mut().find(|e| e.id() == id)
    }

    /// Add a text element with the editor defaults and return its ID.
    ///
    /// The element is appended, so it renders topmost.
    pub fn add_text(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.fields.push(Element::Text(TextElement {
            id: id.clone(),
            x: 100.0,
            y: 100.0,
            text: "Nuevo Texto".to_string(),
            font_size: 36.0,
            font_family: "Inter".to_string(),
            fill: "#222222".to_string(),
            align: Align::Left,
            font_style: FontStyle::Normal,
            width: self.canvas.width - 200.0,
        }));
        id
    }

    /// Add an image element and return its ID.
    ///
    /// The display size starts from the natural size with each side
    /// capped at 200px independently.
    pub fn add_image(&mut self, url: &str, natural_width: f64, natural_height: f64) -> String {
        let id = Uuid::new_v4().to_string();
        self.fields.push(Element::Image(ImageElement {
            id: id.clone(),
            x: 100.0,
            y: 100.0,
            width: natural_width.min(NEW_IMAGE_MAX_SIDE),
            height: natural_height.min(NEW_IMAGE_MAX_SIDE),
            image_url: url.to_string(),
        }));
        id
    }

    /// Apply a partial update to an element. Unknown IDs are a no-op.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) {
        let Some(element) = self.element_mut(id) else {
            return;
        };

        match element {
            Element::Text(e) => {
                if let Some(x) = patch.x {
                    e.x = x;
                }
                if let Some(y) = patch.y {
                    e.y = y;
                }
                if let Some(text) = &patch.text {
                    e.text = text.clone();
                }
                if let Some(size) = patch.font_size {
                    e.font_size = size;
                }
                if let Some(family) = &patch.font_family {
                    e.font_family = family.clone();
                }
                if let Some(fill) = &patch.fill {
                    e.fill = fill.clone();
                }
                if let Some(align) = patch.align {
                    e.align = align;
                }
                if let Some(style) = patch.font_style {
                    e.font_style = style;
                }
                if let Some(width) = patch.width {
                    e.width = width;
                }
            }
            Element::Image(e) => {
                if let Some(x) = patch.x {
                    e.x = x;
                }
                if let Some(y) = patch.y {
                    e.y = y;
                }
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = height;
                }
                if let Some(url) = &patch.image_url {
                    e.image_url = url.clone();
                }
            }
        }
    }

    /// Remove an element. Returns whether anything was removed.
    pub fn delete_element(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|e| e.id() != id);
        self.fields.len() != before
    }

    /// Tokens referenced by any text element, sorted and deduplicated
    pub fn used_tokens(&self) -> BTreeSet<String> {
        let mut tokens = BTreeSet::new();
        for element in &self.fields {
            if let Element::Text(e) = element {
                tokens.extend(vars::extract_tokens(&e.text));
            }
        }
        tokens
    }

    /// Resize the design canvas
    pub fn set_canvas(&mut self, width: f64, height: f64) {
        self.canvas = CanvasSize { width, height };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_text_defaults() {
        let mut template = Template::new("Curso básico");
        let id = template.add_text();

        let Element::Text(e) = template.element(&id).unwrap() else {
            panic!("Expected text element");
        };
        assert_eq!((e.x, e.y), (100.0, 100.0));
        assert_eq!(e.text, "Nuevo Texto");
        assert_eq!(e.font_size, 36.0);
        assert_eq!(e.font_family, "Inter");
        assert_eq!(e.fill, "#222222");
        assert_eq!(e.align, Align::Left);
        assert_eq!(e.font_style, FontStyle::Normal);
        assert_eq!(e.width, 1400.0);
    }

    #[test]
    fn test_add_text_appends_topmost() {
        let mut template = Template::new("t");
        let first = template.add_text();
        let second = template.add_text();

        assert_ne!(first, second);
        assert_eq!(template.fields.len(), 2);
        assert_eq!(template.fields[1].id(), second);
    }

    #[test]
    fn test_add_image_caps_sides_independently() {
        let mut template = Template::new("t");
        let id = template.add_image("logo.png", 800.0, 120.0);

        let Element::Image(e) = template.element(&id).unwrap() else {
            panic!("Expected image element");
        };
        // 800 wide gets capped, 120 tall does not; aspect ratio is lost
        assert_eq!(e.width, 200.0);
        assert_eq!(e.height, 120.0);
    }

    #[test]
    fn test_add_image_small_keeps_natural_size() {
        let mut template = Template::new("t");
        let id = template.add_image("icon.png", 64.0, 64.0);

        let Element::Image(e) = template.element(&id).unwrap() else {
            panic!("Expected image element");
        };
        assert_eq!((e.width, e.height), (64.0, 64.0));
    }

    #[test]
    fn test_update_element_merges() {
        let mut template = Template::new("t");
        let id = template.add_text();

        template.update_element(
            &id,
            &ElementPatch {
                text: Some("Hola {NOMBRE}".to_string()),
                font_size: Some(48.0),
                ..Default::default()
            },
        );

        let Element::Text(e) = template.element(&id).unwrap() else {
            panic!("Expected text element");
        };
        assert_eq!(e.text, "Hola {NOMBRE}");
        assert_eq!(e.font_size, 48.0);
        // untouched fields keep their values
        assert_eq!(e.fill, "#222222");
        assert_eq!((e.x, e.y), (100.0, 100.0));
    }

    #[test]
    fn test_update_element_ignores_foreign_fields() {
        let mut template = Template::new("t");
        let id = template.add_image("a.png", 100.0, 100.0);

        template.update_element(
            &id,
            &ElementPatch {
                text: Some("ignored".to_string()),
                font_size: Some(99.0),
                width: Some(150.0),
                ..Default::default()
            },
        );

        let Element::Image(e) = template.element(&id).unwrap() else {
            panic!("Expected image element");
        };
        assert_eq!(e.width, 150.0);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut template = Template::new("t");
        template.add_text();
        let snapshot = template.clone();

        template.update_element(
            "missing",
            &ElementPatch {
                x: Some(5.0),
                ..Default::default()
            },
        );

        assert_eq!(template.fields, snapshot.fields);
    }

    #[test]
    fn test_delete_element() {
        let mut template = Template::new("t");
        let id = template.add_text();

        assert!(template.delete_element(&id));
        assert!(!template.delete_element(&id));
        assert!(template.fields.is_empty());
    }

    #[test]
    fn test_used_tokens() {
        let mut template = Template::new("t");
        let a = template.add_text();
        let b = template.add_text();
        template.update_element(
            &a,
            &ElementPatch {
                text: Some("{NOMBRE} {CURSO}".to_string()),
                ..Default::default()
            },
        );
        template.update_element(
            &b,
            &ElementPatch {
                text: Some("Otorgado a {NOMBRE}".to_string()),
                ..Default::default()
            },
        );

        let tokens: Vec<_> = template.used_tokens().into_iter().collect();
        assert_eq!(tokens, vec!["CURSO".to_string(), "NOMBRE".to_string()]);
    }
}
