//! Window size resource.
//!
//! Tracks the actual window dimensions in pixels, which may differ from the
//! logical composite resolution. Updated each frame to handle window resizing.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

/// Current window size in pixels.
///
/// Use this for letterbox/pillarbox calculations when scaling the composite
/// to fit the window.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowSize {
    /// Calculate the destination rectangle for letterboxed rendering.
    ///
    /// Given the logical resolution, returns a rectangle that:
    /// - Preserves the aspect ratio
    /// - Fits within the window bounds
    /// - Centers the content (letterbox/pillarbox as needed)
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        let game_aspect = game_w / game_h;
        let window_aspect = window_w / window_h;

        if window_aspect > game_aspect {
            // Window is wider - pillarbox (black bars on sides)
            let scale = window_h / game_h;
            let scaled_w = game_w * scale;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            // Window is taller - letterbox (black bars top/bottom)
            let scale = window_w / game_w;
            let scaled_h = game_h * scale;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_aspect_fills_window() {
        let r = WindowSize { w: 1600, h: 1200 }.calculate_letterbox(800, 600);
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 1600.0, 1200.0));
    }

    #[test]
    fn wide_window_is_pillarboxed() {
        let r = WindowSize { w: 1600, h: 600 }.calculate_letterbox(800, 600);
        assert_eq!((r.x, r.width, r.height), (400.0, 800.0, 600.0));
    }

    #[test]
    fn tall_window_is_letterboxed() {
        let r = WindowSize { w: 800, h: 1000 }.calculate_letterbox(800, 600);
        assert_eq!((r.y, r.width, r.height), (200.0, 800.0, 600.0));
    }
}
