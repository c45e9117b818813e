use wgpu::{BindGroup, BindGroupLayout, Device};

use crate::gpu::buffers::GridBuffers;

/// The five-slot binding contract both kernels compile against:
///
/// | slot | resource                    | access               |
/// |------|-----------------------------|----------------------|
/// | 0    | grid dimensions             | uniform              |
/// | 1    | cell state, read side       | read-only storage    |
/// | 2    | cell state, write side      | read-write storage   |
/// | 3    | length register             | read-write storage   |
/// | 4    | direction register          | read-write storage   |
///
/// Two bind groups are built up front, one per parity, differing only in
/// which cell buffer sits on the read side. Selecting the group IS the
/// ping-pong protocol: the simulation dispatch takes the group of the
/// current parity, the render pass of the same tick takes the complement
/// so it reads exactly the buffer the simulation just wrote.
pub struct CellBindings {
    layout: BindGroupLayout,
    groups: [BindGroup; 2],
}

impl CellBindings {
    pub fn new(device: &Device, buffers: &GridBuffers) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cell-bind-group-layout"),
            entries: &[
                // Grid dimensions (uniform)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Cell state read side
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Cell state write side
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Length register
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Direction register
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let groups = [
            Self::build_group(device, &layout, buffers, 0),
            Self::build_group(device, &layout, buffers, 1),
        ];

        Self { layout, groups }
    }

    fn build_group(
        device: &Device,
        layout: &BindGroupLayout,
        buffers: &GridBuffers,
        read_index: usize,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cell-bind-group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffers.grid_uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffers.cell_buffers[read_index].as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffers.cell_buffers[1 - read_index].as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: buffers.length_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: buffers.direction_buffer.as_entire_binding(),
                },
            ],
        })
    }

    pub fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }

    /// Bind group whose read slot is the cell buffer at `read_index`
    pub fn group(&self, read_index: usize) -> &BindGroup {
        &self.groups[read_index]
    }
}
