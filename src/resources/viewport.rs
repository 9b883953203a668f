//! Off-screen 3D viewport.
//!
//! The character is rendered by a perspective camera into its own render
//! target every frame. The compositor then draws that texture as one layer of
//! the 2D scene, between the middle and near backgrounds.

use raylib::prelude::*;

use crate::resources::rendertarget::{RenderFilter, RenderTarget};

/// 3D surface plus the camera looking into it. NonSend (GPU handle).
pub struct Viewport3D {
    pub target: RenderTarget,
    pub camera: Camera3D,
}

impl Viewport3D {
    /// Camera at the origin looking down -Z with +Y up.
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
        fovy: f32,
    ) -> Result<Self, String> {
        let mut target = RenderTarget::new(rl, th, width, height)
            .map_err(|e| format!("3D viewport: {}", e))?;
        target.set_filter(RenderFilter::Bilinear);
        Ok(Self {
            target,
            camera: Self::camera(fovy),
        })
    }

    pub fn camera(fovy: f32) -> Camera3D {
        Camera3D::perspective(
            Vector3 {
                x: 0.0,
                y: 0.0,
                z: 0.0,
            },
            Vector3 {
                x: 0.0,
                y: 0.0,
                z: -1.0,
            },
            Vector3 {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
            fovy,
        )
    }
}
