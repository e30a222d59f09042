//! Coordinate scaling between canvas, screen and page space

use crate::schema::CanvasSize;
use serde::{Deserialize, Serialize};

/// How a source rectangle is fitted into a target rectangle
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Largest uniform scale that fits entirely, centered with letterbox
    #[default]
    Contain,
    /// Smallest uniform scale that covers the target, centered with overflow
    Cover,
    /// Non-uniform scale to the exact target size
    Stretch,
}

/// Result of fitting a source rectangle into a target, in target coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn axis_ratio(target: f64, source: f64) -> f64 {
    if source == 0.0 {
        1.0
    } else {
        target / source
    }
}

/// Fit a source rectangle into a target rectangle.
///
/// A zero source dimension contributes a ratio of 1 on that axis, so
/// degenerate inputs never produce infinite or negative sizes.
pub fn fit_rect(
    source_width: f64,
    source_height: f64,
    target_width: f64,
    target_height: f64,
    mode: FitMode,
) -> FittedRect {
    let ratio_x = axis_ratio(target_width, source_width);
    let ratio_y = axis_ratio(target_height, source_height);

    let (width, height) = match mode {
        FitMode::Contain => {
            let scale = ratio_x.min(ratio_y);
            (source_width * scale, source_height * scale)
        }
        FitMode::Cover => {
            let scale = ratio_x.max(ratio_y);
            (source_width * scale, source_height * scale)
        }
        FitMode::Stretch => (target_width, target_height),
    };

    FittedRect {
        x: (target_width - width) / 2.0,
        y: (target_height - height) / 2.0,
        width,
        height,
    }
}

/// Uniform scale for showing the canvas inside an editor container.
///
/// Contain behavior capped at 1.0: the editor shrinks the canvas to fit
/// but never magnifies it.
pub fn display_scale(canvas: CanvasSize, container_width: f64, container_height: f64) -> f64 {
    let ratio_x = axis_ratio(container_width, canvas.width);
    let ratio_y = axis_ratio(container_height, canvas.height);
    ratio_x.min(ratio_y).min(1.0)
}

/// Per-axis ratios for mapping canvas pixels onto a PDF page.
///
/// Positions and sizes use the matching axis; font sizes scale by the
/// X ratio, matching how the export has always sized text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageScale {
    pub x: f64,
    pub y: f64,
}

impl PageScale {
    /// Exact mapping from a canvas onto a page, no cap
    pub fn new(canvas: CanvasSize, page_width: f64, page_height: f64) -> Self {
        Self {
            x: axis_ratio(page_width, canvas.width),
            y: axis_ratio(page_height, canvas.height),
        }
    }

    /// Scale a font size (X axis)
    pub fn font_size(&self, size: f64) -> f64 {
        size * self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contain_letterboxes_and_centers() {
        let rect = fit_rect(200.0, 100.0, 100.0, 100.0, FitMode::Contain);
        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 50.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 25.0);
    }

    #[test]
    fn test_cover_overflows_symmetrically() {
        let rect = fit_rect(200.0, 100.0, 100.0, 100.0, FitMode::Cover);
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.height, 100.0);
        assert_eq!(rect.x, -50.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_stretch_fills_exactly() {
        let rect = fit_rect(200.0, 100.0, 300.0, 120.0, FitMode::Stretch);
        assert_eq!(
            rect,
            FittedRect {
                x: 0.0,
                y: 0.0,
                width: 300.0,
                height: 120.0
            }
        );
    }

    #[test]
    fn test_zero_source_dimension_scales_by_one() {
        let rect = fit_rect(0.0, 100.0, 300.0, 50.0, FitMode::Contain);
        // Zero width contributes ratio 1, so the height ratio wins
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 50.0);
    }

    #[test]
    fn test_fit_never_negative_dimensions() {
        for mode in [FitMode::Contain, FitMode::Cover, FitMode::Stretch] {
            let rect = fit_rect(123.0, 7.0, 10.0, 900.0, mode);
            assert!(rect.width >= 0.0);
            assert!(rect.height >= 0.0);
        }
    }

    #[test]
    fn test_display_scale_shrinks_to_fit() {
        let canvas = CanvasSize {
            width: 1600.0,
            height: 1131.0,
        };
        let scale = display_scale(canvas, 800.0, 600.0);
        assert_eq!(scale, 0.5);
    }

    #[test]
    fn test_display_scale_capped_at_one() {
        let canvas = CanvasSize {
            width: 1600.0,
            height: 1131.0,
        };
        let scale = display_scale(canvas, 4000.0, 4000.0);
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_display_scale_zero_canvas() {
        let canvas = CanvasSize {
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(display_scale(canvas, 800.0, 600.0), 1.0);
    }

    #[test]
    fn test_page_scale_maps_per_axis() {
        let canvas = CanvasSize::default();
        let scale = PageScale::new(canvas, 842.0, 595.0);

        let x = 100.0 * scale.x;
        let y = 100.0 * scale.y;
        assert!((x - 52.625).abs() < 0.01);
        assert!((y - 52.61).abs() < 0.01);
    }

    #[test]
    fn test_page_scale_font_uses_x_axis() {
        let canvas = CanvasSize::default();
        let scale = PageScale::new(canvas, 842.0, 595.0);
        assert!((scale.font_size(36.0) - 18.945).abs() < 0.01);
    }

    #[test]
    fn test_page_scale_zero_canvas_dim() {
        let canvas = CanvasSize {
            width: 0.0,
            height: 1131.0,
        };
        let scale = PageScale::new(canvas, 842.0, 595.0);
        assert_eq!(scale.x, 1.0);
    }
}
