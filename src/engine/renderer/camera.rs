// Camera and viewport system for 2D rendering
//
// World space is y-down to match the tile maps, so the orthographic
// projection flips the vertical axis: larger world y lands lower on screen.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// 2D camera that keeps its position centered in the viewport.
/// Following a target is just `set_position(target)`: the implied camera
/// offset is always viewport-center minus target.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space (center of the view)
    pub position: Vec2,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        let half_width = self.viewport_width / 2.0;
        let half_height = self.viewport_height / 2.0;

        // Bottom/top are swapped on purpose: world y grows downward
        let projection = Mat4::orthographic_rh(
            self.position.x - half_width,
            self.position.x + half_width,
            self.position.y + half_height,
            self.position.y - half_height,
            -100.0, // Near plane
            100.0,  // Far plane
        );

        self.view_proj = projection;
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_view_proj();
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        let half = Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0);

        Viewport {
            min: self.position - half,
            max: self.position + half,
        }
    }
}

/// Viewport bounds in world coordinates; `min` is the top-left corner
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a top-left anchored rectangle touches the viewport
    pub fn intersects_rect(&self, top_left: Vec2, size: Vec2) -> bool {
        let rect_max = top_left + size;

        rect_max.x >= self.min.x
            && top_left.x <= self.max.x
            && rect_max.y >= self.min.y
            && top_left.y <= self.max.y
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
