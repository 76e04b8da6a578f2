//! wgpu implementation of the frame driver's `RenderBackend`.
//!
//! `copy()` only appends a quad to the CPU batch; everything reaches the GPU
//! in `present()`: camera uniform, mesh upload, one scene pass with merged
//! draw calls, then the egui debug pass on top.

use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use bnc_core::{DemoConfig, FrameStats, InitError, InitResult, RenderBackend, SpriteRect, Viewport};
use bnc_devtools::{DebugOverlay, RendererStats};
use bnc_render::{
    GlyphRasterizer, GpuContext, PixelCamera, QuadVertex, SpriteBatch, SpritePipeline, Texture,
};
use wgpu::util::DeviceExt;
use winit::window::Window;

const TEXT_COLOR: [u8; 3] = [255, 0, 0];

/// 0xA0 grey, converted to linear for the sRGB surface.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.3515,
    g: 0.3515,
    b: 0.3515,
    a: 1.0,
};

pub struct GpuSprite {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuSprite {
    fn byte_size(&self) -> usize {
        let (w, h) = self.texture.size;
        w as usize * h as usize * 4
    }
}

/// Batch key: two quads batch together only when they use the very same
/// uploaded texture.
#[derive(Clone)]
struct SpriteKey(Rc<GpuSprite>);

impl PartialEq for SpriteKey {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

pub struct WgpuBackend {
    batch: SpriteBatch<SpriteKey>,
    uploaded: Vec<Weak<GpuSprite>>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    mesh_vertex_capacity: usize,
    mesh_index_capacity: usize,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    camera: PixelCamera,
    debug_overlay: DebugOverlay,
    text: GlyphRasterizer,
    sprite_pipeline: SpritePipeline,
    gpu: GpuContext,
    window: Arc<Window>,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>, config: &DemoConfig) -> InitResult<Self> {
        let gpu = GpuContext::new(window.clone()).map_err(InitError::Renderer)?;
        let text =
            GlyphRasterizer::from_path(Path::new(&config.font_path), config.font_size, TEXT_COLOR)
                .map_err(InitError::Font)?;
        log::info!("Font loaded: {} @ {}px", config.font_path, config.font_size);

        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);

        let camera = PixelCamera::new(gpu.size.0, gpu.size.1);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);
        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        Ok(Self {
            batch: SpriteBatch::new(),
            uploaded: Vec::new(),
            vertex_buffer,
            index_buffer,
            mesh_vertex_capacity: 1,
            mesh_index_capacity: 1,
            camera_buffer,
            camera_bind_group,
            camera,
            debug_overlay,
            text,
            sprite_pipeline,
            gpu,
            window,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.debug_overlay.handle_window_event(&self.window, event)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.camera.viewport = (width, height);
    }

    pub fn toggle_debug_overlay(&mut self) {
        self.debug_overlay.toggle();
    }

    fn upload(&mut self, texture: Texture) -> Rc<GpuSprite> {
        let bind_group = self
            .sprite_pipeline
            .create_texture_bind_group(&self.gpu.device, &texture);
        let sprite = Rc::new(GpuSprite {
            texture,
            bind_group,
        });
        self.uploaded.push(Rc::downgrade(&sprite));
        sprite
    }

    fn check_texture_size(&self, width: u32, height: u32) -> Result<(), String> {
        let max = self.gpu.max_texture_dimension();
        if width > max || height > max {
            return Err(format!(
                "{width}x{height} exceeds the device texture limit of {max}"
            ));
        }
        Ok(())
    }

    fn renderer_stats(&mut self) -> RendererStats {
        self.uploaded.retain(|weak| weak.strong_count() > 0);
        let texture_bytes: usize = self
            .uploaded
            .iter()
            .filter_map(Weak::upgrade)
            .map(|sprite| sprite.byte_size())
            .sum();
        let mesh_bytes = self.mesh_vertex_capacity * std::mem::size_of::<QuadVertex>()
            + self.mesh_index_capacity * std::mem::size_of::<u32>();
        RendererStats {
            draw_calls: self.batch.draw_calls().len() as u32,
            quads: self.batch.quad_count() as u32,
            memory_estimate_mb: (texture_bytes + mesh_bytes) as f32 / (1024.0 * 1024.0),
        }
    }

    /// Buffers grow to the next power of two and never shrink.
    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.mesh_vertex_capacity {
            self.mesh_vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.mesh_vertex_capacity);
        }

        let needed_indices = index_count.max(1);
        if needed_indices > self.mesh_index_capacity {
            self.mesh_index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.mesh_index_capacity);
        }
    }

    fn upload_mesh(&mut self) {
        self.ensure_mesh_capacity(self.batch.vertices().len(), self.batch.indices().len());
        if !self.batch.is_empty() {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(self.batch.vertices()),
            );
            self.gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(self.batch.indices()),
            );
        }
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );
    }
}

impl RenderBackend for WgpuBackend {
    type Texture = Rc<GpuSprite>;

    fn load_sprite(&mut self, path: &Path) -> Result<Rc<GpuSprite>, String> {
        let texture = Texture::from_path(&self.gpu.device, &self.gpu.queue, path)?;
        self.check_texture_size(texture.size.0, texture.size.1)?;
        log::info!(
            "Sprite loaded: {} ({}x{})",
            path.display(),
            texture.size.0,
            texture.size.1
        );
        Ok(self.upload(texture))
    }

    fn render_text(&mut self, text: &str) -> Result<Rc<GpuSprite>, String> {
        let image = self.text.rasterize(text)?;
        self.check_texture_size(image.width(), image.height())?;
        let texture = Texture::from_image(&self.gpu.device, &self.gpu.queue, &image, text);
        Ok(self.upload(texture))
    }

    fn texture_size(&self, texture: &Rc<GpuSprite>) -> (u32, u32) {
        texture.texture.size
    }

    fn output_size(&self) -> Viewport {
        Viewport::new(self.gpu.size.0, self.gpu.size.1)
    }

    fn clear(&mut self) {
        self.batch.clear();
    }

    fn copy(&mut self, texture: &Rc<GpuSprite>, dst: SpriteRect) {
        self.batch.push_quad(
            SpriteKey(texture.clone()),
            dst.x as f32,
            dst.y as f32,
            dst.w as f32,
            dst.h as f32,
        );
    }

    fn present(&mut self, stats: &FrameStats) {
        self.upload_mesh();

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let renderer_stats = self.renderer_stats();
        let (egui_primitives, egui_textures_delta) =
            self.debug_overlay
                .prepare(&self.window, stats, &renderer_stats);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for draw in self.batch.draw_calls() {
                render_pass.set_bind_group(1, &draw.key.0.bind_group, &[]);
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
