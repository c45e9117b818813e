use wgpu::{Device, Queue, TextureView};

use crate::gpu::{CellBindings, CellPipeline, GridBuffers, SimulationPipeline};

/// Drives the per-tick dispatch protocol.
///
/// One tick is a single submission: the simulation pass reads the current
/// cell buffer and writes the other; the render pass, ordered after it in
/// the same batch, reads exactly the buffer the simulation wrote. Parity
/// advances once, after the submit, so the freshly written buffer becomes
/// current for the next tick. Submission order is the ordering guarantee;
/// the host never waits for device completion.
pub struct FrameScheduler {
    ticks: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Submit one simulate-then-render batch and advance parity.
    ///
    /// Ticks are serialized by the caller: the next call must not begin
    /// until this one has returned.
    pub fn tick(
        &mut self,
        device: &Device,
        queue: &Queue,
        target: &TextureView,
        buffers: &mut GridBuffers,
        bindings: &CellBindings,
        simulation: &SimulationPipeline,
        cells: &CellPipeline,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tick-encoder"),
        });

        let parity = buffers.parity();
        simulation.dispatch(
            &mut encoder,
            bindings.group(parity.read_index()),
            buffers.width,
            buffers.height,
        );
        // complement group: the render pass reads the buffer the dispatch
        // above just wrote, never the one it read from
        cells.draw(&mut encoder, target, bindings.group(parity.write_index()));

        queue.submit(std::iter::once(encoder.finish()));

        buffers.advance_parity();
        self.ticks += 1;
        log::trace!("tick {} submitted", self.ticks);
    }

    /// Repaint the committed state without advancing the simulation, for
    /// window exposure between ticks
    pub fn redraw(
        &self,
        device: &Device,
        queue: &Queue,
        target: &TextureView,
        buffers: &GridBuffers,
        bindings: &CellBindings,
        cells: &CellPipeline,
    ) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("redraw-encoder"),
        });

        cells.draw(
            &mut encoder,
            target,
            bindings.group(buffers.parity().read_index()),
        );

        queue.submit(std::iter::once(encoder.finish()));
    }
}
