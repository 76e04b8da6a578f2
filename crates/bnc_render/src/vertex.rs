#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Four corners of a pixel rect, clockwise from the top-left, with the
    /// whole texture mapped across it.
    pub fn quad(x: f32, y: f32, w: f32, h: f32) -> [QuadVertex; 4] {
        [
            QuadVertex {
                position: [x, y],
                tex_coords: [0.0, 0.0],
            },
            QuadVertex {
                position: [x + w, y],
                tex_coords: [1.0, 0.0],
            },
            QuadVertex {
                position: [x + w, y + h],
                tex_coords: [1.0, 1.0],
            },
            QuadVertex {
                position: [x, y + h],
                tex_coords: [0.0, 1.0],
            },
        ]
    }
}

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_rect() {
        let q = QuadVertex::quad(10.0, 20.0, 32.0, 16.0);
        assert_eq!(q[0].position, [10.0, 20.0]);
        assert_eq!(q[2].position, [42.0, 36.0]);
        assert_eq!(q[2].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn layout_stride_matches_struct() {
        assert_eq!(QuadVertex::layout().array_stride, 16);
    }
}
