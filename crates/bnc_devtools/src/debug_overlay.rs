//! Debug stats panel rendered via egui on top of the sprite scene.
//!
//! egui needs a three-phase render split because `egui_wgpu::Renderer::render()`
//! wants a `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- run the UI, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers
//!   3. `paint()`   -- render into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The panel is hidden by default and toggled with F3.

use bnc_core::FrameStats;
use winit::window::Window;

/// Renderer-side numbers that the frame driver does not know about.
#[derive(Debug, Clone, Default)]
pub struct RendererStats {
    pub draw_calls: u32,
    pub quads: u32,
    /// Estimated GPU memory held by textures and mesh buffers, in megabytes.
    pub memory_estimate_mb: f32,
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.egui_winit_state.on_window_event(window, event).consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug panel: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        frame: &FrameStats,
        renderer: &RendererStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if !self.visible {
                return;
            }
            egui::Window::new("Stats")
                .default_pos([10.0, 10.0])
                .resizable(false)
                .show(ctx, |ui| {
                    for line in stat_lines(frame, renderer) {
                        ui.label(line);
                    }
                });
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Text rows shown in the panel, top to bottom.
pub fn stat_lines(frame: &FrameStats, renderer: &RendererStats) -> Vec<String> {
    let fps = match frame.fps {
        Some(fps) => format!("FPS: {fps:.1}"),
        None => "FPS: measuring...".to_string(),
    };
    vec![
        fps,
        format!("Frame time: {:.2} ms", frame.frame_time_ms),
        format!("Frame: {}", frame.frame),
        format!("Sprites: {}", frame.sprite_count),
        format!("Quads: {}", renderer.quads),
        format!("Draw calls: {}", renderer.draw_calls),
        format!("Memory: {:.1} MB", renderer.memory_estimate_mb),
        format!(
            "Viewport: {}x{}",
            frame.viewport.width, frame.viewport.height
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bnc_core::Viewport;

    #[test]
    fn lines_before_first_reading() {
        let lines = stat_lines(&FrameStats::default(), &RendererStats::default());
        assert_eq!(lines[0], "FPS: measuring...");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn lines_report_frame_and_renderer() {
        let frame = FrameStats {
            frame: 120,
            frame_time_ms: 16.6667,
            fps: Some(59.94),
            sprite_count: 100,
            viewport: Viewport::new(800, 600),
        };
        let renderer = RendererStats {
            draw_calls: 2,
            quads: 101,
            memory_estimate_mb: 0.25,
        };
        let lines = stat_lines(&frame, &renderer);
        assert_eq!(lines[0], "FPS: 59.9");
        assert_eq!(lines[1], "Frame time: 16.67 ms");
        assert_eq!(lines[3], "Sprites: 100");
        assert_eq!(lines[5], "Draw calls: 2");
        assert_eq!(lines[7], "Viewport: 800x600");
    }
}
