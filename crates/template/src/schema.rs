//! Certificate template JSON schema types

use serde::{Deserialize, Serialize};

/// Canvas size in editor pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1131.0,
        }
    }
}

/// Root template structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Template {
    /// Server-assigned identifier (absent for unsaved templates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name (also drives the export filename)
    #[serde(default)]
    pub nombre: String,

    /// Free-form description
    #[serde(default)]
    pub descripcion: String,

    /// Background image URL
    #[serde(rename = "background_image_url")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_url: Option<String>,

    /// Design canvas size in pixels
    #[serde(default)]
    pub canvas: CanvasSize,

    /// Positioned elements, back to front
    #[serde(default)]
    pub fields: Vec<Element>,
}

/// Positioned element (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// Text element
    Text(TextElement),

    /// Image element
    Image(ImageElement),
}

/// Text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
}

/// Text element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextElement {
    /// Element identifier (unique within the template)
    pub id: String,

    /// X position in canvas pixels (alignment anchor)
    pub x: f64,

    /// Y position in canvas pixels (from top)
    pub y: f64,

    /// Text content, may contain `{TOKEN}` placeholders
    pub text: String,

    /// Font size in canvas pixels
    #[serde(rename = "fontSize")]
    pub font_size: f64,

    /// Font family name
    #[serde(rename = "fontFamily")]
    pub font_family: String,

    /// Fill color as `#rrggbb`
    pub fill: String,

    /// Alignment relative to the anchor
    #[serde(default)]
    pub align: Align,

    /// Font weight
    #[serde(rename = "fontStyle")]
    #[serde(default)]
    pub font_style: FontStyle,

    /// Layout width in canvas pixels
    #[serde(default)]
    pub width: f64,
}

/// Image element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageElement {
    /// Element identifier (unique within the template)
    pub id: String,

    /// X position in canvas pixels (top-left corner)
    pub x: f64,

    /// Y position in canvas pixels (from top)
    pub y: f64,

    /// Display width in canvas pixels
    pub width: f64,

    /// Display height in canvas pixels
    pub height: f64,

    /// Source URL (http(s), file path, or data URI)
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl Element {
    /// Get the element ID
    pub fn id(&self) -> &str {
        match self {
            Element::Text(e) => &e.id,
            Element::Image(e) => &e.id,
        }
    }

    /// Get the position as (x, y)
    pub fn position(&self) -> (f64, f64) {
        match self {
            Element::Text(e) => (e.x, e.y),
            Element::Image(e) => (e.x, e.y),
        }
    }

    /// Shift the element position
    pub fn shift_position(&mut self, dx: f64, dy: f64) {
        match self {
            Element::Text(e) => {
                e.x += dx;
                e.y += dy;
            }
            Element::Image(e) => {
                e.x += dx;
                e.y += dy;
            }
        }
    }

    /// Move the element to an absolute position
    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            Element::Text(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Image(e) => {
                e.x = x;
                e.y = y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_element() {
        let json = r##"{
            "id": "el-1",
            "type": "text",
            "x": 100,
            "y": 200,
            "text": "Certificado de {NOMBRE}",
            "fontSize": 36,
            "fontFamily": "Inter",
            "fill": "#222222",
            "align": "center",
            "fontStyle": "bold",
            "width": 1400
        }"##;

        let element: Element = serde_json::from_str(json).unwrap();

        match element {
            Element::Text(e) => {
                assert_eq!(e.id, "el-1");
                assert_eq!(e.font_size, 36.0);
                assert_eq!(e.align, Align::Center);
                assert_eq!(e.font_style, FontStyle::Bold);
            }
            _ => panic!("Expected TextElement"),
        }
    }

    #[test]
    fn test_parse_image_element() {
        let json = r#"{
            "id": "el-2",
            "type": "image",
            "x": 50,
            "y": 60,
            "width": 200,
            "height": 150,
            "imageUrl": "https://example.com/logo.png"
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();

        match element {
            Element::Image(e) => {
                assert_eq!(e.width, 200.0);
                assert_eq!(e.image_url, "https://example.com/logo.png");
            }
            _ => panic!("Expected ImageElement"),
        }
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        let json = r#"{
            "id": "el-3",
            "type": "video",
            "x": 0,
            "y": 0
        }"#;

        let result: std::result::Result<Element, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_text_defaults() {
        let json = r##"{
            "id": "el-4",
            "type": "text",
            "x": 0,
            "y": 0,
            "text": "Plain",
            "fontSize": 24,
            "fontFamily": "Inter",
            "fill": "#000000"
        }"##;

        let element: Element = serde_json::from_str(json).unwrap();
        match element {
            Element::Text(e) => {
                assert_eq!(e.align, Align::Left);
                assert_eq!(e.font_style, FontStyle::Normal);
                assert_eq!(e.width, 0.0);
            }
            _ => panic!("Expected TextElement"),
        }
    }

    #[test]
    fn test_canvas_default() {
        let canvas = CanvasSize::default();
        assert_eq!(canvas.width, 1600.0);
        assert_eq!(canvas.height, 1131.0);
    }
}
