use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::simulation::{Direction, Grid};

/// Selects which of the two cell buffers is the read side for a tick.
///
/// Toggled exactly once per tick, after the tick's batch is submitted,
/// never between the simulation and render passes of the same tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameParity(bool);

impl FrameParity {
    pub fn new() -> Self {
        Self(false)
    }

    /// Index of the buffer the simulation dispatch reads this tick
    pub fn read_index(self) -> usize {
        self.0 as usize
    }

    /// Index of the buffer the simulation dispatch writes this tick
    pub fn write_index(self) -> usize {
        1 - self.read_index()
    }

    pub fn advance(&mut self) {
        self.0 = !self.0;
    }
}

/// Grid dimensions as both kernels see them (binding 0)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridUniform {
    pub width: f32,
    pub height: f32,
}

/// Owns every device resource the simulation state lives in: the
/// ping-pong cell-state pair, the grid uniform, and the two scalar
/// registers (direction, length).
///
/// The host seeds buffer A once at construction; buffer B is undefined
/// until the first simulation dispatch writes it. After that, cell state
/// and length belong to the kernel, and the host touches only the
/// direction register.
pub struct GridBuffers {
    /// Ping-pong cell state pair, indexed through `FrameParity`
    pub cell_buffers: [Buffer; 2],
    /// Grid dimensions uniform
    pub grid_uniform: Buffer,
    /// Snake length register, kernel-owned after seeding
    pub length_buffer: Buffer,
    /// Direction register, host-published and kernel-read
    pub direction_buffer: Buffer,
    parity: FrameParity,
    /// Grid dimensions
    pub width: u32,
    pub height: u32,
}

impl GridBuffers {
    /// Allocate the buffer roster and upload the seed state
    pub fn new(device: &Device, queue: &Queue, grid: &Grid, direction: Direction) -> Self {
        let buffer_size = (grid.cells.len() * std::mem::size_of::<u32>()) as u64;

        let cell_buffers = [
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("cell-state-a"),
                size: buffer_size,
                usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("cell-state-b"),
                size: buffer_size,
                usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        ];

        let grid_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid-uniform"),
            size: std::mem::size_of::<GridUniform>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let length_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("snake-length"),
            size: std::mem::size_of::<u32>() as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let direction_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("snake-direction"),
            size: std::mem::size_of::<u32>() as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Seed buffer A; buffer B stays undefined until the first dispatch
        queue.write_buffer(&cell_buffers[0], 0, bytemuck::cast_slice(&grid.cells));
        queue.write_buffer(
            &grid_uniform,
            0,
            bytemuck::bytes_of(&GridUniform {
                width: grid.width as f32,
                height: grid.height as f32,
            }),
        );
        queue.write_buffer(&length_buffer, 0, bytemuck::bytes_of(&grid.length));
        queue.write_buffer(
            &direction_buffer,
            0,
            bytemuck::bytes_of(&direction.register_value()),
        );

        Self {
            cell_buffers,
            grid_uniform,
            length_buffer,
            direction_buffer,
            parity: FrameParity::new(),
            width: grid.width,
            height: grid.height,
        }
    }

    /// Buffer the next simulation dispatch reads
    #[allow(dead_code)]
    pub fn current_buffer(&self) -> &Buffer {
        &self.cell_buffers[self.parity.read_index()]
    }

    /// Buffer the next simulation dispatch writes (and the render pass of
    /// the same tick then reads)
    #[allow(dead_code)]
    pub fn next_buffer(&self) -> &Buffer {
        &self.cell_buffers[self.parity.write_index()]
    }

    pub fn parity(&self) -> FrameParity {
        self.parity
    }

    /// Flip after a tick's batch is submitted; the freshly written buffer
    /// becomes current
    pub fn advance_parity(&mut self) {
        self.parity.advance();
    }

    /// Publish a committed direction into the register. A single-word
    /// write: an in-flight tick observes either the old or the new value,
    /// never a torn one.
    pub fn write_direction(&self, queue: &Queue, direction: Direction) {
        queue.write_buffer(
            &self.direction_buffer,
            0,
            bytemuck::bytes_of(&direction.register_value()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_alternates() {
        let mut parity = FrameParity::new();
        for n in 0..8 {
            assert_eq!(parity.read_index(), n % 2);
            parity.advance();
        }
    }

    #[test]
    fn test_read_and_write_sides_are_complementary() {
        let mut parity = FrameParity::new();
        assert_eq!(parity.read_index(), 0);
        assert_eq!(parity.write_index(), 1);
        parity.advance();
        assert_eq!(parity.read_index(), 1);
        assert_eq!(parity.write_index(), 0);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        // without an intervening advance, the selection never moves
        let parity = FrameParity::new();
        assert_eq!(parity.read_index(), parity.read_index());
        assert_eq!(parity.write_index(), parity.write_index());
    }

    #[test]
    fn test_this_ticks_write_side_is_next_ticks_read_side() {
        let mut parity = FrameParity::new();
        let written = parity.write_index();
        parity.advance();
        assert_eq!(parity.read_index(), written);
    }
}
