use bytemuck::{Pod, Zeroable};
use glam::{Mat2, Mat4, Vec2, Vec3};

/// 2D view: where the camera looks, how far it zooms and how it is turned.
///
/// Screen space has its origin at the viewport's top-left corner with y
/// growing downwards; the viewport center shows `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World point shown at the viewport center.
    pub position: Vec2,
    /// Uniform scale factor (1.0 = one world unit per pixel).
    pub zoom: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            rotation: 0.0,
            width,
            height,
        }
    }

    pub fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Move the camera so `target` sits at the viewport center.
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Rotation composed with zoom. Translation is left to the projection step.
    pub fn transform(&self) -> Mat2 {
        Mat2::from_angle(self.rotation) * Mat2::from_diagonal(Vec2::splat(self.zoom))
    }

    /// [`transform`](Self::transform) embedded in a 4×4 matrix.
    pub fn transform4(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation) * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
    }

    /// Full view matrix for the shader: zoom, shift by the camera position and
    /// half the viewport, then rotate.
    pub fn view_matrix(&self) -> Mat4 {
        let half = self.viewport_size() / 2.0;
        let shift = Vec3::new(-self.position.x - half.x, -self.position.y - half.y, 0.0);
        Mat4::from_rotation_z(self.rotation)
            * Mat4::from_translation(shift)
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
        }
    }

    /// Map a world point to viewport pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.transform() * (world - self.position) + self.viewport_size() / 2.0
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen).
    /// Returns `None` when the zoom is zero and the mapping collapses.
    pub fn screen_to_world(&self, screen: Vec2) -> Option<Vec2> {
        if self.zoom == 0.0 || !self.zoom.is_finite() {
            return None;
        }
        let local = screen - self.viewport_size() / 2.0;
        Some(self.transform().inverse() * local + self.position)
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let screen = self.world_to_screen(point);
        screen.x >= 0.0 && screen.x <= self.width && screen.y >= 0.0 && screen.y <= self.height
    }
}
