//! Display list generation
//!
//! The session is turned into a flat list of draw operations in canvas
//! coordinates. The host (Konva stage, HTML canvas, test harness)
//! multiplies by the viewport scale when painting; the one place the
//! scale leaks back in is the selection highlight, whose stroke width
//! is pre-divided so it looks the same at every zoom level.

use crate::session::EditorSession;
use template::scale::fit_rect;
use template::vars;
use template::{Align, Element, FontStyle};

/// Fill color used to flag templated text (text containing `{TOKEN}`s)
pub const TOKEN_TEXT_FILL: &str = "#2563eb";

/// Selection outline color
pub const HIGHLIGHT_STROKE: &str = "#3b82f6";

/// Selection outline width in screen pixels
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 2.0;

/// One paint instruction, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Background image, fitted to the canvas
    Background {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Decoded image element
    Image {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Text element; `fill` already accounts for token flagging
    Text {
        id: String,
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        font_family: String,
        fill: String,
        align: Align,
        font_style: FontStyle,
        width: f64,
    },
    /// Selection outline around the selected element
    Highlight {
        id: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: &'static str,
        stroke_width: f64,
    },
}

/// Build the display list: background first, then elements in
/// collection order, then the selection highlight on top.
pub fn draw_ops(session: &EditorSession) -> Vec<DrawOp> {
    let template = session.template();
    let images = session.images();
    let mut ops = Vec::new();

    if let Some(bg) = images.background() {
        let rect = fit_rect(
            bg.width() as f64,
            bg.height() as f64,
            template.canvas.width,
            template.canvas.height,
            session.background_fit(),
        );
        ops.push(DrawOp::Background {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        });
    }

    for element in &template.fields {
        match element {
            Element::Text(e) => {
                let fill = if vars::contains_token(&e.text) {
                    TOKEN_TEXT_FILL.to_string()
                } else {
                    e.fill.clone()
                };
                ops.push(DrawOp::Text {
                    id: e.id.clone(),
                    x: e.x,
                    y: e.y,
                    text: e.text.clone(),
                    font_size: e.font_size,
                    font_family: e.font_family.clone(),
                    fill,
                    align: e.align,
                    font_style: e.font_style,
                    width: e.width,
                });
            }
            Element::Image(e) => {
                // undecoded or failed images draw nothing
                if images.get(&e.id).is_some() {
                    ops.push(DrawOp::Image {
                        id: e.id.clone(),
                        x: e.x,
                        y: e.y,
                        width: e.width,
                        height: e.height,
                    });
                }
            }
        }
    }

    if let Some(id) = session.selected_id() {
        if let Some(element) = template.element(id) {
            let (x, y, width, height) = match element {
                // one-line box approximation for text
                Element::Text(e) => (e.x, e.y, e.width, e.font_size),
                Element::Image(e) => (e.x, e.y, e.width, e.height),
            };
            // a degenerate container drives the display scale to zero
            let scale = session.viewport().scale.max(0.01);
            ops.push(DrawOp::Highlight {
                id: id.to_string(),
                x,
                y,
                width,
                height,
                stroke: HIGHLIGHT_STROKE,
                stroke_width: HIGHLIGHT_STROKE_WIDTH / scale,
            });
        }
    }

    ops
}
