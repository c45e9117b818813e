use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{GRID_HEIGHT, GRID_WIDTH, INITIAL_LENGTH, TICK_INTERVAL, WINDOW_SIZE};
use crate::error::InitError;
use crate::gpu::{
    CellBindings, CellPipeline, FrameScheduler, GpuContext, GridBuffers, SimulationPipeline,
};
use crate::simulation::{Direction, DirectionControl, Grid};

/// Application state
pub struct App {
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: GridBuffers,
    bindings: CellBindings,
    simulation: SimulationPipeline,
    cells: CellPipeline,
    scheduler: FrameScheduler,
    input: DirectionControl,
    next_tick: Instant,
}

impl App {
    pub fn new() -> Self {
        Self { state: None }
    }
}

impl AppState {
    fn new(window: Arc<Window>) -> Result<Self, InitError> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        log::info!("Seeding {}x{} grid...", GRID_WIDTH, GRID_HEIGHT);
        let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT, INITIAL_LENGTH)?;
        grid.place_food(&mut rand::thread_rng());

        let buffers = GridBuffers::new(&gpu.device, &gpu.queue, &grid, Direction::Right);
        let bindings = CellBindings::new(&gpu.device, &buffers);

        log::info!("Compiling simulation kernel...");
        let simulation = SimulationPipeline::new(&gpu.device, bindings.layout())?;

        log::info!("Compiling render kernel...");
        let cells = CellPipeline::new(
            &gpu.device,
            gpu.format(),
            bindings.layout(),
            GRID_WIDTH * GRID_HEIGHT,
        )?;

        Ok(Self {
            window,
            gpu,
            buffers,
            bindings,
            simulation,
            cells,
            scheduler: FrameScheduler::new(),
            input: DirectionControl::new(Direction::Right),
            next_tick: Instant::now() + TICK_INTERVAL,
        })
    }

    fn redraw(&mut self) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if Instant::now() >= self.next_tick {
            self.scheduler.tick(
                &self.gpu.device,
                &self.gpu.queue,
                &view,
                &mut self.buffers,
                &self.bindings,
                &self.simulation,
                &self.cells,
            );
            // a late tick pushes the next one out; there is no catch-up
            self.next_tick = Instant::now() + TICK_INTERVAL;
        } else {
            self.scheduler.redraw(
                &self.gpu.device,
                &self.gpu.queue,
                &view,
                &self.buffers,
                &self.bindings,
                &self.cells,
            );
        }

        output.present();
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let candidate = match key_code {
            KeyCode::ArrowRight => Direction::Right,
            KeyCode::ArrowUp => Direction::Up,
            KeyCode::ArrowLeft => Direction::Left,
            KeyCode::ArrowDown => Direction::Down,
            _ => return,
        };

        // rejected proposals are dropped silently; accepted ones are
        // published to the register right away, between submissions
        if let Some(direction) = self.input.propose(candidate) {
            self.buffers.write_direction(&self.gpu.queue, direction);
            log::debug!("Direction committed: {:?}", direction);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Initializing snake...");
        log::info!("Grid size: {}x{}", GRID_WIDTH, GRID_HEIGHT);

        let window_attrs = Window::default_attributes()
            .with_title("Snake")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        match AppState::new(window) {
            Ok(state) => {
                log::info!("Initialization complete!");
                log::info!("Controls:");
                log::info!("  Arrow keys: steer");
                log::info!("  Escape: Quit");
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Initialization failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            state.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                state.gpu.resize(new_size);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                state.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        // the external timer: wake when the tick is due, redraw, and let
        // redraw() run the simulate-then-render batch
        if Instant::now() >= state.next_tick {
            state.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(state.next_tick));
    }
}
