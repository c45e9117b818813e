mod bindings;
mod buffers;
mod compute;
mod context;
mod render;
mod scheduler;

pub use bindings::CellBindings;
pub use buffers::{FrameParity, GridBuffers};
pub use compute::SimulationPipeline;
pub use context::GpuContext;
pub use render::CellPipeline;
pub use scheduler::FrameScheduler;
