//! Rectangle fill operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Fill a rectangle with the current fill style.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(rect) = tiny_skia::Rect::from_xywh(params.x, params.y, params.width, params.height)
        else {
            return;
        };

        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.state.fill_style);
        paint.anti_alias = false;

        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }
}
