//! Custom cursor: a dot pinned to the pointer and a trailing ring

use crate::config::CursorConfig;

use super::Point;

/// Per-frame cursor layer state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorFrame {
    pub dot: Point,
    pub ring: Point,
    pub ring_scale: f64,
    pub visible: bool,
}

/// Pointer mirror with an eased ring
pub struct CursorFollower {
    pointer: Point,
    ring: Point,
    hovering: bool,
    visible: bool,
    follow_factor: f64,
    hover_scale: f64,
}

impl CursorFollower {
    pub fn new(config: &CursorConfig) -> Self {
        Self {
            pointer: Point::ORIGIN,
            ring: Point::ORIGIN,
            hovering: false,
            visible: false,
            follow_factor: config.follow_factor,
            hover_scale: config.hover_scale,
        }
    }

    /// First move snaps the ring so it does not sweep in from the corner
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        if !self.visible {
            self.ring = self.pointer;
            self.visible = true;
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.visible = false;
    }

    pub fn on_interactive_enter(&mut self) {
        self.hovering = true;
    }

    pub fn on_interactive_leave(&mut self) {
        self.hovering = false;
    }

    /// Ease the ring towards the pointer and report both layers
    pub fn frame(&mut self) -> CursorFrame {
        self.ring = self.ring.approach(self.pointer, self.follow_factor);
        CursorFrame {
            dot: self.pointer,
            ring: self.ring,
            ring_scale: if self.hovering { self.hover_scale } else { 1.0 },
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_snaps_ring() {
        let mut cursor = CursorFollower::new(&CursorConfig::default());
        cursor.on_pointer_move(300.0, 200.0);
        let frame = cursor.frame();
        assert!(frame.visible);
        assert_eq!(frame.dot, Point::new(300.0, 200.0));
        assert_eq!(frame.ring, Point::new(300.0, 200.0));
    }

    #[test]
    fn test_ring_converges_on_pointer() {
        let mut cursor = CursorFollower::new(&CursorConfig::default());
        cursor.on_pointer_move(0.0, 0.0);
        cursor.on_pointer_move(100.0, 0.0);

        let first = cursor.frame();
        assert!((first.ring.x - 15.0).abs() < 1e-9);
        assert_eq!(first.dot.x, 100.0);

        let mut last = first;
        for _ in 0..100 {
            last = cursor.frame();
        }
        assert!((last.ring.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_hover_scales_ring() {
        let mut cursor = CursorFollower::new(&CursorConfig::default());
        cursor.on_interactive_enter();
        assert!((cursor.frame().ring_scale - 1.5).abs() < f64::EPSILON);
        cursor.on_interactive_leave();
        assert!((cursor.frame().ring_scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leave_hides_layers() {
        let mut cursor = CursorFollower::new(&CursorConfig::default());
        assert!(!cursor.frame().visible);
        cursor.on_pointer_move(1.0, 1.0);
        cursor.on_pointer_leave();
        assert!(!cursor.frame().visible);
    }
}
