use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use pixels::{wgpu::TextureFormat, Pixels, PixelsBuilder, SurfaceTexture};
use tracing::error;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowAttributes, WindowId},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

/// Tells the window whether to keep the event loop alive after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct RendererWindowConfig<T> {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: u64,

    /// Called once per frame before drawing, with the current time.
    /// Returns the window title to show for this frame.
    pub update_callback: Box<dyn FnMut(Instant) -> String>,
    /// Asked whenever the loop is about to sleep. A frame is drawn at the returned time
    /// even if no event arrives before it.
    pub wake_callback: Box<dyn FnMut() -> Option<Instant>>,
    pub draw_callback: Box<dyn FnMut(RenderFrame)>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent) -> Flow>>,
    pub user_event_callback: Option<Box<dyn FnMut(T) -> Flow>>,
}

pub(super) struct RendererWindow<T> {
    config: RendererWindowConfig<T>,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    shown_title: String,
}

impl<T> RendererWindow<T> {
    pub fn new(config: RendererWindowConfig<T>) -> Self {
        let sleeper = {
            let target_frame_time = Duration::from_micros(1_000_000 / config.target_fps.max(1));
            Sleeper::new(target_frame_time)
        };

        Self {
            shown_title: config.title.clone(),
            config,
            resumed_window: None,
            sleeper,
        }
    }
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

fn create_window(
    event_loop: &ActiveEventLoop,
    title: &str,
    width: usize,
    height: usize,
) -> anyhow::Result<ResumedWindow> {
    let window = Arc::new({
        let window_size = LogicalSize::new(width as f64, height as f64);

        event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(title)
                    .with_inner_size(window_size),
            )
            .context("Creating window")?
    });

    let pixels = {
        let window_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());

        PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
            .texture_format(TextureFormat::Rgba8UnormSrgb)
            .build()
            .context("Creating pixels buffer")?
    };

    Ok(ResumedWindow { window, pixels })
}

impl<T> RendererWindow<T> {
    fn request_redraw(&self) {
        if let Some(resumed_window) = &self.resumed_window {
            resumed_window.window.request_redraw();
        }
    }
}

impl<T: 'static> ApplicationHandler<T> for RendererWindow<T> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let control_flow = self.sleeper.control_flow((self.config.wake_callback)());

        // Already late: don't wait for the platform to notice.
        if let ControlFlow::WaitUntil(wake_at) = control_flow {
            if wake_at <= Instant::now() {
                self.request_redraw();
            }
        }

        event_loop.set_control_flow(control_flow);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match create_window(
            event_loop,
            &self.config.title,
            self.config.width,
            self.config.height,
        ) {
            Ok(resumed_window) => {
                resumed_window.window.request_redraw();
                self.resumed_window = Some(resumed_window);
            }
            Err(e) => {
                error!("{e:?}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: T) {
        if let Some(user_event_callback) = &mut self.config.user_event_callback {
            if user_event_callback(event) == Flow::Exit {
                event_loop.exit();
                return;
            }
        }

        self.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow { window, pixels }) = self.resumed_window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => {
                let title = (self.config.update_callback)(Instant::now());
                if title != self.shown_title {
                    window.set_title(&title);
                    self.shown_title = title;
                }

                let PhysicalSize { width, height } = window.inner_size();

                let next_frame = RenderFrame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                };

                (self.config.draw_callback)(next_frame);

                if let Err(e) = pixels.render() {
                    error!("Rendering with pixels: {e}");
                    event_loop.exit();
                    return;
                }

                self.sleeper.frame_drawn(Instant::now());
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width == 0 || height == 0 {
                    return;
                }

                if let Err(e) = pixels
                    .resize_surface(width, height)
                    .and_then(|()| pixels.resize_buffer(width, height))
                {
                    error!("Resizing pixels buffer: {e}");
                    event_loop.exit();
                    return;
                }
                window.request_redraw();
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            _ => {}
        }

        let redrawn = matches!(event, WindowEvent::RedrawRequested);

        if let Some(event_callback) = &mut self.config.event_callback {
            if event_callback(&event) == Flow::Exit {
                event_loop.exit();
                return;
            }
        }

        // Input may have changed what's on screen.
        if !redrawn {
            self.request_redraw();
        }
    }
}
