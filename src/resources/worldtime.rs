//! Frame timing resource.
//!
//! Written once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time) before the
//! frame schedule runs; the animator consumes `delta`.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since startup, scaled.
    pub elapsed: f32,
    /// Seconds since the previous frame, scaled.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of frames started so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
