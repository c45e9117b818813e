use wgpu::{BindGroup, BindGroupLayout, ComputePipeline, Device};

use crate::config::WORKGROUP_SIZE;
use crate::error::InitError;

/// Compute pipelines advancing the snake by one tick.
///
/// The kernel executes the update rule stated in `simulation::rules` in
/// two ordered dispatches: the cell pass reads the buffer on slot 1 and
/// writes its successor to slot 2, one invocation per destination cell so
/// writes never alias; the commit pass then runs a single invocation that
/// folds a meal into the length register. Splitting the register update
/// out keeps the cell pass free of read-write overlap on slot 3.
pub struct SimulationPipeline {
    step_pipeline: ComputePipeline,
    commit_pipeline: ComputePipeline,
}

impl SimulationPipeline {
    /// Compile the simulation kernel against the shared binding contract.
    /// A kernel that fails validation is fatal; there is no fallback path.
    pub fn new(device: &Device, layout: &BindGroupLayout) -> Result<Self, InitError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("simulation-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/simulation.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("simulation-pipeline-layout"),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });

        let step_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("simulation-step-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let commit_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("simulation-commit-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("commit_length"),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(InitError::KernelCompilation(err.to_string()));
        }

        Ok(Self {
            step_pipeline,
            commit_pipeline,
        })
    }

    /// Dispatch one simulation step covering the whole grid
    pub fn dispatch(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        bind_group: &BindGroup,
        grid_width: u32,
        grid_height: u32,
    ) {
        let workgroups_x = (grid_width + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;
        let workgroups_y = (grid_height + WORKGROUP_SIZE - 1) / WORKGROUP_SIZE;

        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("simulation-pass"),
            timestamp_writes: None,
        });

        pass.set_bind_group(0, bind_group, &[]);

        pass.set_pipeline(&self.step_pipeline);
        pass.dispatch_workgroups(workgroups_x, workgroups_y, 1);

        // ordered after the cell dispatch within the same pass
        pass.set_pipeline(&self.commit_pipeline);
        pass.dispatch_workgroups(1, 1, 1);
    }
}
