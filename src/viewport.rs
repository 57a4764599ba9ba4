//! Pan/zoom transform between screen space and canvas space.
//!
//! Screen positions are CSS pixels relative to the canvas element's top-left
//! corner, measured by the DOM glue when each event arrives.  `x`/`y` is the
//! canvas-space point shown at that corner.
//!
//! ```text
//! canvas = screen / zoom + (x, y)
//! ```

use crate::layout::Rect;
use crate::models::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn screen_to_canvas(&self, screen: Position) -> Position {
        Position {
            x: screen.x / self.zoom + self.x,
            y: screen.y / self.zoom + self.y,
        }
    }

    pub fn canvas_to_screen(&self, point: Position) -> Position {
        Position {
            x: (point.x - self.x) * self.zoom,
            y: (point.y - self.y) * self.zoom,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Move the view by a screen-space delta (dragging the background right
    /// reveals content further left).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x -= dx / self.zoom;
        self.y -= dy / self.zoom;
    }

    /// Change zoom while keeping the canvas point under `screen` fixed.
    /// `new_zoom` must already be clamped.
    pub fn zoom_at(&mut self, screen: Position, new_zoom: f64) {
        let anchor = self.screen_to_canvas(screen);
        self.zoom = new_zoom;
        self.x = anchor.x - screen.x / new_zoom;
        self.y = anchor.y - screen.y / new_zoom;
    }

    /// Centre `bounds` with `padding` screen pixels on every side.  The zoom
    /// is the largest that fits, limited to `[min_zoom, max_zoom]`.
    pub fn fit_bounds(&mut self, bounds: Rect, padding: f64, min_zoom: f64, max_zoom: f64) {
        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);
        let zoom_w = avail_w / bounds.width.max(1.0);
        let zoom_h = avail_h / bounds.height.max(1.0);
        let zoom = zoom_w.min(zoom_h).clamp(min_zoom, max_zoom);

        let centre_x = bounds.x + bounds.width / 2.0;
        let centre_y = bounds.y + bounds.height / 2.0;
        self.zoom = zoom;
        self.x = centre_x - self.width / (2.0 * zoom);
        self.y = centre_y - self.height / (2.0 * zoom);
    }
}
