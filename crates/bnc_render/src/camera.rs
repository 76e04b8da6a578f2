use glam::{Mat4, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: one world unit is one output pixel, origin at the
/// top-left corner, y growing downwards.
pub struct PixelCamera {
    pub viewport: (u32, u32),
}

impl PixelCamera {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let w = self.viewport.0.max(1) as f32;
        let h = self.viewport.1.max(1) as f32;
        Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }

    /// Clip-space position of a pixel coordinate.
    pub fn to_clip(&self, x: f32, y: f32) -> Vec4 {
        self.projection() * Vec4::new(x, y, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn corners_map_to_clip_extremes() {
        let cam = PixelCamera::new(800, 600);
        let top_left = cam.to_clip(0.0, 0.0);
        assert!(close(top_left.x, -1.0) && close(top_left.y, 1.0));
        let bottom_right = cam.to_clip(800.0, 600.0);
        assert!(close(bottom_right.x, 1.0) && close(bottom_right.y, -1.0));
    }

    #[test]
    fn centre_maps_to_origin() {
        let cam = PixelCamera::new(1280, 720);
        let c = cam.to_clip(640.0, 360.0);
        assert!(close(c.x, 0.0) && close(c.y, 0.0));
    }

    #[test]
    fn zero_viewport_stays_finite() {
        let cam = PixelCamera::new(0, 0);
        let m = cam.build_uniform().view_proj;
        assert!(m.iter().flatten().all(|v| v.is_finite()));
    }
}
