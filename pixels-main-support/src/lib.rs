#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod render;

pub use config::{Color, Config};
pub use render::{Canvas, Frame, PIXEL_BYTES, Rect, draw_board};

use life_grid::{Board, World};
use log::info;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("event loop failed")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create window")]
    Window(#[from] OsError),
    #[error("pixel surface failed")]
    Pixels(#[from] pixels::Error),
    #[error("could not resize pixel surface")]
    Texture(#[from] pixels::TextureError),
}

/// Opens a window sized for the world's board and runs until the user quits.
/// With a time step, the world is updated once per step; without one, the
/// first frame stays on screen.
pub fn animate<W: World>(config: &Config, world: W) -> Result<(), AnimateError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppEventHandler::new(config, world);
    event_loop.run_app(&mut handler)?;
    handler.error.map_or(Ok(()), Err)
}

struct App {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    size: PhysicalSize<u32>,
}

impl App {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &Config,
        board: &Board,
    ) -> Result<Self, AnimateError> {
        let size = config.window_size(board.width(), board.height());
        let window = Arc::new(Self::build_window(event_loop, config, size)?);
        let pixels = Self::build_pixels(&window, config, size)?;
        info!(
            "Created {}x{} window for {}x{} board",
            size.width,
            size.height,
            board.width(),
            board.height()
        );
        Ok(Self {
            window,
            pixels,
            size,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        config: &Config,
        size: PhysicalSize<u32>,
    ) -> Result<Window, OsError> {
        let window_attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(size)
            .with_resizable(false)
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(
        window: &Arc<Window>,
        config: &Config,
        size: PhysicalSize<u32>,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(size.width, size.height, surface_texture)
            .clear_color(config.background_color.into())
            .build()
    }

    fn on_create(&self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_redraw(&mut self, config: &Config, board: &Board) -> Result<(), pixels::Error> {
        let mut frame = Frame::new(self.size.width, self.size.height, self.pixels.frame_mut());
        draw_board(config, board, &mut frame);
        self.pixels.render()
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), pixels::TextureError> {
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(size.width, size.height)
    }
}

struct AppEventHandler<'a, W: World> {
    config: &'a Config,
    world: W,
    app: Option<App>,
    next_update: Instant,
    error: Option<AnimateError>,
}

impl<'a, W: World> AppEventHandler<'a, W> {
    fn new(config: &'a Config, world: W) -> Self {
        Self {
            config,
            world,
            app: None,
            next_update: Instant::now(),
            error: None,
        }
    }

    fn on_time_step(&mut self, time_step: Duration) {
        self.world.update();
        if let Some(app) = &self.app {
            app.window.request_redraw();
        }
        self.next_update = next_deadline(self.next_update, Instant::now(), time_step);
    }

    fn redraw(&mut self) -> Result<(), AnimateError> {
        match self.app.as_mut() {
            Some(app) => Ok(app.on_redraw(self.config, self.world.board())?),
            None => Ok(()),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), AnimateError> {
        match self.app.as_mut() {
            Some(app) => Ok(app.on_resize(size)?),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AnimateError) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn quit(&self, event_loop: &ActiveEventLoop) {
        info!("Quit");
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<'_, W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(time_step) = self.config.time_step
        {
            self.on_time_step(time_step);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, self.config, self.world.board()) {
            Ok(app) => {
                app.on_create();
                self.app = Some(app);
                if let Some(time_step) = self.config.time_step {
                    self.next_update = Instant::now() + time_step;
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let result = match event {
            WindowEvent::CloseRequested => {
                self.quit(event_loop);
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX = code {
                    self.quit(event_loop);
                }
                Ok(())
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            return;
        }
        let control_flow = match self.config.time_step {
            Some(_) => ControlFlow::WaitUntil(self.next_update),
            None => ControlFlow::Wait,
        };
        event_loop.set_control_flow(control_flow);
    }
}

/// Advances `deadline` by whole steps until it is after `now`, dropping
/// steps that were missed while the loop was busy.
fn next_deadline(mut deadline: Instant, now: Instant, step: Duration) -> Instant {
    if step.is_zero() {
        return now;
    }
    while deadline <= now {
        deadline += step;
    }
    deadline
}
