//! Viewport module for pan/zoom transforms between screen and canvas space.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;

/// Viewport manages the view transform for the canvas.
///
/// It is defined by a center point in canvas space and a zoom factor,
/// and converts between screen coordinates and canvas coordinates. The
/// canvas itself is unbounded; only zoom is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center of the visible region, in canvas space.
    pub center: Point,
    /// Current zoom level (screen pixels per canvas unit).
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport centered on the origin at zoom 1.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with an explicit center and zoom (clamped).
    pub fn with_view(center: Point, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts canvas coordinates to screen coordinates,
    /// placing `self.center` at the middle of the screen.
    pub fn transform(&self, screen_size: Size) -> Affine {
        let screen_center = Vec2::new(screen_size.width / 2.0, screen_size.height / 2.0);
        Affine::translate(screen_center)
            * Affine::scale(self.zoom)
            * Affine::translate(-self.center.to_vec2())
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to canvas coordinates.
    pub fn inverse_transform(&self, screen_size: Size) -> Affine {
        let screen_center = Vec2::new(screen_size.width / 2.0, screen_size.height / 2.0);
        Affine::translate(self.center.to_vec2())
            * Affine::scale(1.0 / self.zoom)
            * Affine::translate(-screen_center)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point, screen_size: Size) -> Point {
        self.inverse_transform(screen_size) * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point, screen_size: Size) -> Point {
        self.transform(screen_size) * canvas_point
    }

    /// The rectangle of canvas space currently visible:
    /// `center ± (screen_size / 2) / zoom`.
    pub fn visible_rect(&self, screen_size: Size) -> Rect {
        let half_w = screen_size.width / (2.0 * self.zoom);
        let half_h = screen_size.height / (2.0 * self.zoom);
        Rect::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        )
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    /// Apply a combined pan/zoom gesture.
    ///
    /// `pan_delta` is in screen pixels; `scale_delta` multiplies the
    /// current zoom and is clamped to [`MIN_ZOOM`, `MAX_ZOOM`]. The
    /// canvas point under `focal` (a screen position) stays fixed while
    /// zooming. The center is never clamped.
    pub fn apply_gesture(
        &mut self,
        pan_delta: Vec2,
        scale_delta: f64,
        focal: Point,
        screen_size: Size,
    ) {
        self.pan(pan_delta);

        let new_zoom = (self.zoom * scale_delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        // Canvas point under the focal screen position before the zoom
        let anchor = self.screen_to_canvas(focal, screen_size);
        self.zoom = new_zoom;

        // Shift the center so the anchor stays under the focal point
        let new_screen = self.canvas_to_screen(anchor, screen_size);
        self.center += Vec2::new(new_screen.x - focal.x, new_screen.y - focal.y) / self.zoom;
    }

    /// Reset the viewport to the origin at zoom 1.0.
    pub fn reset(&mut self) {
        self.center = Point::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the viewport to show the given content bounds.
    ///
    /// `margin_factor` scales the fitted zoom down to leave a margin
    /// (e.g. 0.8 keeps 20% of the screen around the content). An empty
    /// or degenerate bounds falls back to [`Viewport::reset`] rather
    /// than dividing by zero.
    pub fn fit_to_content(
        &mut self,
        content_bounds: Option<Rect>,
        screen_size: Size,
        margin_factor: f64,
    ) {
        let Some(bounds) = content_bounds else {
            self.reset();
            return;
        };
        if bounds.is_zero_area() || screen_size.is_zero_area() {
            self.reset();
            return;
        }

        let fit_x = screen_size.width / bounds.width();
        let fit_y = screen_size.height / bounds.height();
        self.zoom = (fit_x.min(fit_y) * margin_factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center = bounds.center();
    }
}
