use anyhow::Context;
use window::{RendererWindow, RendererWindowConfig};
use winit::event_loop::{EventLoop, EventLoopProxy};

pub mod frame;
pub mod sleeper;
pub mod window;

pub struct Renderer<T: 'static> {
    event_loop: EventLoop<T>,
    window: RendererWindow<T>,
}

impl<T: 'static> Renderer<T> {
    pub fn new(config: RendererWindowConfig<T>) -> anyhow::Result<Self> {
        Ok(Self {
            event_loop: EventLoop::with_user_event()
                .build()
                .context("Creating event loop")?,
            window: RendererWindow::new(config),
        })
    }

    /// A handle other threads can use to push user events into the loop.
    pub fn proxy(&self) -> EventLoopProxy<T> {
        self.event_loop.create_proxy()
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop
            .run_app(&mut self.window)
            .context("Running event loop")?;
        Ok(())
    }
}
