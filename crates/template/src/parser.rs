//! Template JSON parsing

use crate::{Result, Template, TemplateError};
use std::collections::HashSet;

/// Parse a template from a JSON string.
///
/// Rejects unknown element types (via the tagged union) and duplicate
/// element IDs, which would make selection and updates ambiguous.
pub fn parse_template(json: &str) -> Result<Template> {
    let template: Template =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;

    let mut seen = HashSet::new();
    for element in &template.fields {
        if !seen.insert(element.id()) {
            return Err(TemplateError::ParseError(format!(
                "duplicate element id: {}",
                element.id()
            )));
        }
    }

    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Element;

    #[test]
    fn test_parse_template() {
        let json = r##"{
            "nombre": "Certificado CDP",
            "descripcion": "Plantilla de prueba",
            "canvas": { "width": 1600, "height": 1131 },
            "fields": [
                {
                    "id": "t1",
                    "type": "text",
                    "x": 800,
                    "y": 400,
                    "text": "{NOMBRE_COMPLETO}",
                    "fontSize": 48,
                    "fontFamily": "Inter",
                    "fill": "#222222",
                    "align": "center",
                    "width": 1400
                }
            ]
        }"##;

        let template = parse_template(json).unwrap();
        assert_eq!(template.nombre, "Certificado CDP");
        assert_eq!(template.fields.len(), 1);
        assert!(matches!(template.fields[0], Element::Text(_)));
    }

    #[test]
    fn test_parse_defaults_canvas() {
        let template = parse_template(r#"{ "nombre": "x" }"#).unwrap();
        assert_eq!(template.canvas.width, 1600.0);
        assert_eq!(template.canvas.height, 1131.0);
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let json = r#"{
            "nombre": "x",
            "fields": [
                { "id": "a", "type": "image", "x": 0, "y": 0,
                  "width": 10, "height": 10, "imageUrl": "u" },
                { "id": "a", "type": "image", "x": 5, "y": 5,
                  "width": 10, "height": 10, "imageUrl": "v" }
            ]
        }"#;

        let err = parse_template(json).unwrap_err();
        assert!(err.to_string().contains("duplicate element id"));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let json = r#"{
            "nombre": "x",
            "fields": [
                { "id": "a", "type": "shape", "x": 0, "y": 0 }
            ]
        }"#;

        assert!(parse_template(json).is_err());
    }
}
