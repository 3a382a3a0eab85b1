use crate::geometry::Segment;
use bevy_math::Vec2;

/// Two lines following the pointer across the plot area.
///
/// Positions are raw plot pixels; nothing is looked up in the data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crosshair {
    width: f32,
    height: f32,
    visible: bool,
    pointer: Vec2,
}

impl Crosshair {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            visible: false,
            pointer: Vec2::ZERO,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.visible = true;
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer = at;
    }

    pub fn pointer_leave(&mut self) {
        self.visible = false;
    }

    /// Feeds one pointer sample: `Some` while the pointer is over the plot
    /// area. Returns whether anything visible changed.
    pub fn track(&mut self, over_plot: Option<Vec2>) -> bool {
        let before = *self;
        match over_plot {
            Some(at) => {
                if !self.visible {
                    self.pointer_enter();
                }
                self.pointer_move(at);
            }
            None if self.visible => self.pointer_leave(),
            None => {}
        }
        *self != before
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn vertical(&self) -> Segment {
        Segment::new(
            Vec2::new(self.pointer.x, 0.0),
            Vec2::new(self.pointer.x, self.height),
        )
    }

    pub fn horizontal(&self) -> Segment {
        Segment::new(
            Vec2::new(0.0, self.pointer.y),
            Vec2::new(self.width, self.pointer.y),
        )
    }
}
