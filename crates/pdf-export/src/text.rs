//! Text rendering operators

use crate::document::Color;
use template::Align;

/// Context for rendering one run of text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f64,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion.
///
/// Emits the text operators (BT, rg, Tf, Td, Tj, ET) to render
/// hex-encoded text at a position, shifted left for center/right
/// alignment so the anchor point stays fixed.
///
/// # Arguments
/// * `text_hex` - Hex-encoded glyph IDs (e.g., "<0041004200>")
/// * `x` - X coordinate in points (from left)
/// * `y` - Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let final_x = x + x_offset;

    ops.push_str("BT\n");

    // Non-stroking color
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));

    // /F1 12 Tf
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));

    ops.push_str(&format!("{final_x} {y} Td\n"));

    ops.push_str(&format!("{text_hex} Tj\n"));

    ops.push_str("ET\n");

    ops.into_bytes()
}
