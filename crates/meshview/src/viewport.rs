//! Fitting diagram content into the output window.

use log::debug;

use meshview_core::geometry::{Bounds, Insets, Point, Size};

use crate::error::MeshviewError;

/// Uniform scale plus translation mapping content space into window space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    translation: Point,
    window: Size,
}

impl Viewport {
    /// Fits `content` padded by `margin` into `window`, keeping the aspect
    /// ratio and centering it, then scales by `zoom` around the window center.
    ///
    /// # Errors
    ///
    /// Returns [`MeshviewError::Config`] for a non-positive window size or
    /// zoom, or when the padded content is empty.
    pub fn fit(content: Bounds, window: Size, margin: f32, zoom: f32) -> Result<Self, MeshviewError> {
        if !(window.width() > 0.0 && window.height() > 0.0) {
            return Err(MeshviewError::Config(format!(
                "window size must be positive, got {}x{}",
                window.width(),
                window.height()
            )));
        }
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(MeshviewError::Config(format!("zoom must be positive, got {zoom}")));
        }

        let padded = content.add_padding(Insets::uniform(margin.max(0.0)));
        if !(padded.width() > 0.0 && padded.height() > 0.0) {
            return Err(MeshviewError::Config("nothing to fit: content is empty".to_string()));
        }

        let fit_scale = (window.width() / padded.width()).min(window.height() / padded.height());
        let scale = fit_scale * zoom;
        let center = padded.center();
        let translation = Point::new(
            window.width() / 2.0 - center.x() * scale,
            window.height() / 2.0 - center.y() * scale,
        );

        debug!(scale, tx = translation.x(), ty = translation.y(); "Viewport fitted");
        Ok(Self {
            scale,
            translation,
            window,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn window(&self) -> Size {
        self.window
    }

    /// Maps a content-space point into window space.
    pub fn map_point(&self, point: Point) -> Point {
        point.scale(self.scale).add_point(self.translation)
    }

    /// Content-space area visible through the window.
    pub fn visible_bounds(&self) -> Bounds {
        let top_left = Point::new(
            -self.translation.x() / self.scale,
            -self.translation.y() / self.scale,
        );
        Bounds::new_from_top_left(top_left, self.window.scale(1.0 / self.scale))
    }

    /// SVG `transform` attribute value.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            self.translation.x(),
            self.translation.y(),
            self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::topology::CLOSE_UP_VIEW_ZOOM;

    fn content() -> Bounds {
        Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(1180.0, 860.0))
    }

    #[test]
    fn test_fit_keeps_content_inside_window() {
        let window = Size::new(1200.0, 900.0);
        let viewport = Viewport::fit(content(), window, 20.0, 1.0).unwrap();

        let top_left = viewport.map_point(Point::new(50.0, 50.0));
        let bottom_right = viewport.map_point(Point::new(1230.0, 910.0));
        assert!(top_left.x() >= -1e-3 && top_left.y() >= -1e-3);
        assert!(bottom_right.x() <= 1200.0 + 1e-3);
        assert!(bottom_right.y() <= 900.0 + 1e-3);
    }

    #[test]
    fn test_fit_centers_content() {
        let window = Size::new(1200.0, 900.0);
        let viewport = Viewport::fit(content(), window, 20.0, 1.0).unwrap();

        let center = viewport.map_point(content().center());
        assert_approx_eq!(f32, center.x(), 600.0, epsilon = 1e-3);
        assert_approx_eq!(f32, center.y(), 450.0, epsilon = 1e-3);

        // Padded content is 1220 x 900, width is the limiting dimension.
        assert_approx_eq!(f32, viewport.scale(), 1200.0 / 1220.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_scales_around_center() {
        let window = Size::new(1200.0, 900.0);
        let fitted = Viewport::fit(content(), window, 20.0, 1.0).unwrap();
        let zoomed = Viewport::fit(content(), window, 20.0, CLOSE_UP_VIEW_ZOOM).unwrap();

        assert_approx_eq!(f32, zoomed.scale(), fitted.scale() * 2.8, epsilon = 1e-5);
        let center = zoomed.map_point(content().center());
        assert_approx_eq!(f32, center.x(), 600.0, epsilon = 1e-3);
        assert_approx_eq!(f32, center.y(), 450.0, epsilon = 1e-3);
        assert!(zoomed.visible_bounds().width() < content().width());
    }

    #[test]
    fn test_visible_bounds_roundtrip_window_corners() {
        let viewport = Viewport::fit(content(), Size::new(800.0, 600.0), 0.0, 1.0).unwrap();
        let visible = viewport.visible_bounds();
        let corner = viewport.map_point(visible.min_point());
        assert_approx_eq!(f32, corner.x(), 0.0, epsilon = 1e-3);
        assert_approx_eq!(f32, corner.y(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_inputs() {
        let window = Size::new(1200.0, 900.0);
        assert!(Viewport::fit(content(), window, 20.0, 0.0).is_err());
        assert!(Viewport::fit(content(), window, 20.0, f32::NAN).is_err());
        assert!(Viewport::fit(content(), Size::new(0.0, 900.0), 20.0, 1.0).is_err());
        assert!(matches!(
            Viewport::fit(Bounds::default(), window, 0.0, 1.0),
            Err(MeshviewError::Config(_))
        ));
    }

    #[test]
    fn test_transform_attribute() {
        let viewport = Viewport::fit(
            Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0)),
            Size::new(200.0, 200.0),
            0.0,
            1.0,
        )
        .unwrap();
        assert_eq!(viewport.transform(), "translate(0, 0) scale(2)");
    }
}
