//! Viewport and coordinate transformation for the seat map.
//!
//! The map uses a simple (non-geographic) coordinate system: world units are
//! the pixels of the background image at zoom 0, and each zoom level doubles
//! the scale. World Y grows upwards, screen Y grows downwards.

use std::fmt;

use seatkit_core::constants::{INITIAL_ZOOM, MAP_HEIGHT, MAP_WIDTH, MAX_ZOOM, MIN_ZOOM};
use seatkit_core::Point;

/// Zoom and pan state of the map container.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    map_width: f64,
    map_height: f64,
    initial_zoom: f64,
}

impl Viewport {
    /// Creates a viewport for a container of the given pixel size, showing
    /// the default 800x600 map centered at the initial zoom.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        let mut viewport = Self {
            zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            initial_zoom: INITIAL_ZOOM,
        };
        viewport.reset();
        viewport
    }

    /// Replaces the map extent and zoom limits, then resets the view.
    ///
    /// `initial_zoom` is clamped into `[min_zoom, max_zoom]`.
    pub fn with_map(
        mut self,
        map_width: f64,
        map_height: f64,
        min_zoom: f64,
        max_zoom: f64,
        initial_zoom: f64,
    ) -> Self {
        self.map_width = map_width;
        self.map_height = map_height;
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.initial_zoom = initial_zoom.clamp(self.min_zoom, self.max_zoom);
        self.reset();
        self
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the container dimensions (typically called when the window resizes).
    ///
    /// The world point at the container center stays centered.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        let center = self.pixel_to_world(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.canvas_width = width;
        self.canvas_height = height;
        self.center_on(center.x, center.y);
    }

    /// Map extent in world units.
    pub fn map_size(&self) -> (f64, f64) {
        (self.map_width, self.map_height)
    }

    /// Current zoom level. 0 is 1:1, each step doubles the scale.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f64 {
        2f64.powf(self.zoom)
    }

    /// Sets the zoom level around the container center, clamped to the limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        let center = self.pixel_to_world(self.canvas_width / 2.0, self.canvas_height / 2.0);
        self.zoom_to_point(&center, zoom);
    }

    /// Zooms in by one level.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + 1.0);
    }

    /// Zooms out by one level.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - 1.0);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset in pixels.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Moves the map content by a screen delta, as a pointer drag does.
    ///
    /// The world point under the pointer stays under the pointer.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        // Screen Y is flipped relative to world Y.
        self.pan_y -= dy;
    }

    /// Converts container pixel coordinates to world coordinates.
    ///
    /// ```text
    /// world_x = (pixel_x - pan_x) / scale
    /// world_y = (canvas_height - pixel_y - pan_y) / scale
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let scale = self.scale();
        let world_x = (pixel_x - self.pan_x) / scale;
        let world_y = (self.canvas_height - pixel_y - self.pan_y) / scale;
        Point::new(world_x, world_y)
    }

    /// Converts world coordinates to container pixel coordinates.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let scale = self.scale();
        let pixel_x = world_x * scale + self.pan_x;
        let pixel_y = self.canvas_height - (world_y * scale + self.pan_y);
        (pixel_x, pixel_y)
    }

    /// Zooms to a level while keeping `world_point` at the same screen position.
    ///
    /// Used for wheel and double-click zoom at the cursor.
    pub fn zoom_to_point(&mut self, world_point: &Point, new_zoom: f64) {
        let new_zoom = new_zoom.clamp(self.min_zoom, self.max_zoom);
        let (pixel_x, pixel_y) = self.world_to_pixel(world_point.x, world_point.y);

        self.zoom = new_zoom;
        let scale = self.scale();
        self.pan_x = pixel_x - world_point.x * scale;
        self.pan_y = self.canvas_height - pixel_y - world_point.y * scale;
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        let scale = self.scale();
        self.pan_x = self.canvas_width / 2.0 - world_x * scale;
        self.pan_y = self.canvas_height / 2.0 - world_y * scale;
    }

    /// Initial zoom, centered on the middle of the map.
    pub fn reset(&mut self) {
        self.zoom = self.initial_zoom;
        self.center_on(self.map_width / 2.0, self.map_height / 2.0);
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.1} | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_initial_view_is_centered() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.zoom(), 1.0);
        let center = vp.pixel_to_world(400.0, 300.0);
        assert!(close(center.x, 400.0));
        assert!(close(center.y, 300.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::default();
        vp.set_zoom(10.0);
        assert_eq!(vp.zoom(), 4.0);
        vp.set_zoom(-5.0);
        assert_eq!(vp.zoom(), -1.0);
    }

    #[test]
    fn test_scale_doubles_per_level() {
        let mut vp = Viewport::default();
        vp.set_zoom(0.0);
        assert_eq!(vp.scale(), 1.0);
        vp.zoom_in();
        assert_eq!(vp.scale(), 2.0);
        vp.zoom_out();
        vp.zoom_out();
        assert_eq!(vp.scale(), 0.5);
    }

    #[test]
    fn test_pixel_world_round_trip() {
        let mut vp = Viewport::new(1024.0, 768.0);
        vp.pan_by(13.0, -7.0);
        vp.set_zoom(2.0);
        let world = vp.pixel_to_world(120.0, 40.0);
        let (px, py) = vp.world_to_pixel(world.x, world.y);
        assert!(close(px, 120.0));
        assert!(close(py, 40.0));
    }

    #[test]
    fn test_world_y_grows_upwards() {
        let vp = Viewport::default();
        let top = vp.pixel_to_world(0.0, 0.0);
        let bottom = vp.pixel_to_world(0.0, 600.0);
        assert!(top.y > bottom.y);
    }

    #[test]
    fn test_zoom_to_point_keeps_screen_position() {
        let mut vp = Viewport::default();
        let anchor = Point::new(100.0, 50.0);
        let before = vp.world_to_pixel(anchor.x, anchor.y);
        vp.zoom_to_point(&anchor, 3.0);
        let after = vp.world_to_pixel(anchor.x, anchor.y);
        assert!(close(before.0, after.0));
        assert!(close(before.1, after.1));
    }
}
