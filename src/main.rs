mod app;
mod config;
mod error;
mod gpu;
mod simulation;

use winit::event_loop::EventLoop;

use app::App;

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new();

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
    }
}
