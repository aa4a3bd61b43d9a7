// Sprite rendering system
//
// The game hands the renderer one RenderFrame per frame: a camera target
// plus an ordered list of textured rectangles. Sprites are drawn strictly in
// list order (painter's algorithm); consecutive sprites that share a texture
// collapse into a single draw call.

use super::{Camera, CameraUniform, TextureHandle, TextureManager, Vertex};
use anyhow::Result;
use glam::{Mat4, Vec2, Vec4};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Initial capacity of the dynamic buffers, in quads
const INITIAL_QUAD_CAPACITY: usize = 1024;

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;
const QUAD_INDICES: [u32; INDICES_PER_QUAD] = [0, 1, 2, 0, 2, 3];

/// One textured rectangle to draw this frame
#[derive(Debug, Clone, Copy)]
pub struct SpriteInstance {
    pub texture: TextureHandle,
    /// Top-left corner in world space (y-down)
    pub top_left: Vec2,
    /// Width and height in world pixels
    pub size: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
}

impl SpriteInstance {
    pub fn new(texture: TextureHandle, top_left: Vec2, size: Vec2) -> Self {
        Self {
            texture,
            top_left,
            size,
            color: Vec4::ONE,
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// World position the camera centers on
    pub camera_center: Vec2,
    /// Sprites in back-to-front draw order
    pub sprites: Vec<SpriteInstance>,
}

impl RenderFrame {
    pub fn new(camera_center: Vec2) -> Self {
        Self {
            camera_center,
            sprites: Vec::new(),
        }
    }

    pub fn push(&mut self, sprite: SpriteInstance) {
        self.sprites.push(sprite);
    }
}

/// Build the four corner vertices for one sprite quad.
/// UV v grows downward, matching both image row order and world y
fn quad_vertices(sprite: &SpriteInstance) -> [Vertex; VERTICES_PER_QUAD] {
    let min = sprite.top_left;
    let max = sprite.top_left + sprite.size;
    let color = sprite.color;

    [
        Vertex::new(Vec2::new(min.x, min.y), Vec2::new(0.0, 0.0), color),
        Vertex::new(Vec2::new(max.x, min.y), Vec2::new(1.0, 0.0), color),
        Vertex::new(Vec2::new(max.x, max.y), Vec2::new(1.0, 1.0), color),
        Vertex::new(Vec2::new(min.x, max.y), Vec2::new(0.0, 1.0), color),
    ]
}

/// Group consecutive same-texture sprites into index ranges.
/// Only adjacent runs merge; reordering would break the painter's algorithm
fn batch_spans(sprites: &[SpriteInstance]) -> Vec<(TextureHandle, Range<u32>)> {
    let mut spans: Vec<(TextureHandle, Range<u32>)> = Vec::new();

    for (i, sprite) in sprites.iter().enumerate() {
        let index_end = ((i + 1) * INDICES_PER_QUAD) as u32;
        match spans.last_mut() {
            Some((texture, range)) if *texture == sprite.texture => {
                range.end = index_end;
            }
            _ => {
                let index_start = (i * INDICES_PER_QUAD) as u32;
                spans.push((sprite.texture, index_start..index_end));
            }
        }
    }

    spans
}

/// Batched sprite renderer
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: u64,
    index_buffer: wgpu::Buffer,
    index_capacity: u64,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    batches: Vec<(TextureHandle, Range<u32>)>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Create render pipeline
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // the y-flipped projection reverses quad winding
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_capacity =
            (INITIAL_QUAD_CAPACITY * VERTICES_PER_QUAD * std::mem::size_of::<Vertex>()) as u64;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: vertex_capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_capacity =
            (INITIAL_QUAD_CAPACITY * INDICES_PER_QUAD * std::mem::size_of::<u32>()) as u64;
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Index Buffer"),
            size: index_capacity,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Create camera buffer
        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            vertex_capacity,
            index_buffer,
            index_capacity,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            batches: Vec::new(),
        })
    }

    /// Build vertex/index data and batches for this frame's sprites.
    /// Must run before the render pass opens; `draw` only binds and draws.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sprites: &[SpriteInstance],
    ) {
        self.batches = batch_spans(sprites);
        if sprites.is_empty() {
            return;
        }

        let mut vertices = Vec::with_capacity(sprites.len() * VERTICES_PER_QUAD);
        let mut indices = Vec::with_capacity(sprites.len() * INDICES_PER_QUAD);
        for (i, sprite) in sprites.iter().enumerate() {
            let base = (i * VERTICES_PER_QUAD) as u32;
            vertices.extend_from_slice(&quad_vertices(sprite));
            indices.extend(QUAD_INDICES.iter().map(|&offset| base + offset));
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&indices);

        if vertex_bytes.len() as u64 > self.vertex_capacity {
            self.vertex_capacity = (vertex_bytes.len() as u64).next_power_of_two();
            self.vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Sprite Vertex Buffer"),
                size: self.vertex_capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if index_bytes.len() as u64 > self.index_capacity {
            self.index_capacity = (index_bytes.len() as u64).next_power_of_two();
            self.index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Sprite Index Buffer"),
                size: self.index_capacity,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }

        queue.write_buffer(&self.vertex_buffer, 0, vertex_bytes);
        queue.write_buffer(&self.index_buffer, 0, index_bytes);
    }

    /// Record draw calls for the sprites given to the last `prepare`
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        texture_manager: &'a TextureManager,
    ) {
        if self.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (handle, range) in &self.batches {
            // A handle with no uploaded texture draws nothing
            let Some(texture) = texture_manager.get(*handle) else {
                continue;
            };
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(range.clone(), 0, 0..1);
        }
    }

    /// Layout textures must be created against
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }

    /// Get a reference to the camera buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    /// Write the camera matrix for this frame
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera) {
        let camera_uniform = CameraUniform::new(camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera_uniform]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(texture: usize, x: f32) -> SpriteInstance {
        SpriteInstance::new(
            TextureHandle::from_raw(texture),
            Vec2::new(x, 0.0),
            Vec2::new(64.0, 64.0),
        )
    }

    #[test]
    fn test_quad_vertices_cover_the_rect() {
        let quad = quad_vertices(&sprite(0, 10.0));

        assert_eq!(quad[0].position, [10.0, 0.0]);
        assert_eq!(quad[1].position, [74.0, 0.0]);
        assert_eq!(quad[2].position, [74.0, 64.0]);
        assert_eq!(quad[3].position, [10.0, 64.0]);

        // UV v grows downward with world y
        assert_eq!(quad[0].tex_coords, [0.0, 0.0]);
        assert_eq!(quad[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn test_batching_merges_consecutive_textures() {
        let sprites = [sprite(0, 0.0), sprite(0, 64.0), sprite(1, 128.0)];
        let spans = batch_spans(&sprites);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0], (TextureHandle::from_raw(0), 0..12));
        assert_eq!(spans[1], (TextureHandle::from_raw(1), 12..18));
    }

    #[test]
    fn test_batching_preserves_draw_order() {
        // Alternating textures must not merge across the gap
        let sprites = [sprite(0, 0.0), sprite(1, 0.0), sprite(0, 0.0)];
        let spans = batch_spans(&sprites);

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2], (TextureHandle::from_raw(0), 12..18));
    }

    #[test]
    fn test_batching_empty_input() {
        assert!(batch_spans(&[]).is_empty());
    }

    #[test]
    fn test_render_frame_accumulates_sprites() {
        let mut frame = RenderFrame::new(Vec2::new(512.0, 390.0));
        frame.push(sprite(0, 0.0));
        frame.push(sprite(1, 64.0));

        assert_eq!(frame.sprites.len(), 2);
        assert_eq!(frame.camera_center, Vec2::new(512.0, 390.0));
    }
}
