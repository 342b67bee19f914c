use crate::foundation::core::{Point, SurfaceSize, Vec2};
use crate::foundation::error::{HaloError, HaloResult};
use crate::scene::model::ImageTransform;

/// Pointer drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging; `anchor` is the pointer position minus the image centre at pointer-down.
    Dragging {
        /// Offset between pointer and image centre captured at drag start.
        anchor: Vec2,
    },
}

impl DragState {
    /// `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Owns the image transform and mediates pointer and zoom input.
///
/// Every method returns `true` when the transform changed and the surface needs a redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    transform: ImageTransform,
    drag: DragState,
}

impl Interaction {
    /// Start idle with the image centred at native size.
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            transform: ImageTransform::centered(surface),
            drag: DragState::Idle,
        }
    }

    /// Current image placement.
    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    /// Current drag state.
    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Pointer pressed over the surface. Without an image this is a no-op.
    pub fn pointer_down(&mut self, at: Point, has_image: bool) -> bool {
        if !has_image {
            return false;
        }
        let anchor = at - self.transform.center();
        self.drag = DragState::Dragging { anchor };
        tracing::debug!(x = at.x, y = at.y, "drag start");
        false
    }

    /// Pointer moved. While dragging, the image centre follows the pointer.
    pub fn pointer_move(&mut self, at: Point, has_image: bool) -> bool {
        let DragState::Dragging { anchor } = self.drag else {
            return false;
        };
        if !has_image {
            return false;
        }
        self.transform.set_center(at - anchor);
        true
    }

    /// Pointer released. Always ends a drag.
    pub fn pointer_up(&mut self) -> bool {
        self.end_drag();
        false
    }

    /// Pointer left the surface. Always ends a drag.
    pub fn pointer_leave(&mut self) -> bool {
        self.end_drag();
        false
    }

    /// Apply a zoom control value. Ignored without an image.
    pub fn set_zoom(&mut self, scale: f64, has_image: bool) -> HaloResult<bool> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(HaloError::validation(format!(
                "zoom scale must be finite and > 0, got {scale}"
            )));
        }
        if !has_image {
            return Ok(false);
        }
        self.transform.scale = scale;
        Ok(true)
    }

    /// A new image arrived: centre it at native size and drop any drag in progress.
    pub fn reset(&mut self, surface: SurfaceSize) {
        self.transform = ImageTransform::centered(surface);
        self.drag = DragState::Idle;
    }

    fn end_drag(&mut self) {
        if self.drag.is_dragging() {
            tracing::debug!("drag end");
        }
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/interaction.rs"]
mod tests;
