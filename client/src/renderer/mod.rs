mod layout;
mod renderthing;

use std::{cell::RefCell, rc::Rc, thread, time::Instant};

use layout::{Button, Hit, Layout};
use liblife::{CellState, Position, Session, SessionState};
use rand::rngs::ThreadRng;
use renderthing::{
    frame::{Color, RenderFrame},
    window::RendererWindowConfig,
    Renderer,
};
use tracing::{debug, error};
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::cli::{self, Command};

pub use renderthing::window::Flow;

const CELL_SIZE: u32 = 16;
const HALF_CELL_MARGIN: u32 = 1;
const TARGET_FPS: u64 = 60;

const BACKGROUND_COLOR: Color = [10, 10, 10, 255];
const ALIVE_COLOR: Color = [255, 255, 255, 255];
const DEAD_COLOR: Color = [0, 0, 0, 255];
const START_COLOR: Color = [40, 170, 70, 255];
const STOP_COLOR: Color = [220, 160, 30, 255];
const RANDOMIZE_COLOR: Color = [50, 110, 210, 255];
const RESET_COLOR: Color = [200, 50, 50, 255];

pub fn run(session: Session) -> anyhow::Result<()> {
    let (width, height) = Layout::window_size_for(
        session.board().width(),
        session.board().height(),
        CELL_SIZE,
    );

    let renderer_state = RendererState {
        layout: Layout {
            frame_width: width,
            frame_height: height,
            board_width: session.board().width(),
            board_height: session.board().height(),
        },
        session,
        rng: rand::rng(),
        mouse_hit: None,
        mouse_pressed: false,
    };

    let renderer_state_rc = Rc::new(RefCell::new(renderer_state));
    let update_state_rc = renderer_state_rc.clone();
    let draw_state_rc = renderer_state_rc.clone();
    let event_state_rc = renderer_state_rc.clone();
    let wake_state_rc = renderer_state_rc.clone();
    let user_event_state_rc = renderer_state_rc;

    let renderer = Renderer::new(RendererWindowConfig {
        title: "life".to_owned(),
        width: width as usize,
        height: height as usize,
        target_fps: TARGET_FPS,
        update_callback: Box::new(move |now| {
            let mut state = update_state_rc.borrow_mut();
            update(&mut state, now)
        }),
        wake_callback: Box::new(move || wake_state_rc.borrow().session.next_deadline()),
        draw_callback: Box::new(move |frame| {
            let mut state = draw_state_rc.borrow_mut();
            draw(&mut state, frame);
        }),
        event_callback: Some(Box::new(move |event| {
            let mut state = event_state_rc.borrow_mut();
            on_event(&mut state, event)
        })),
        user_event_callback: Some(Box::new(move |command| {
            let mut state = user_event_state_rc.borrow_mut();
            on_console_command(&mut state, command)
        })),
    })?;

    let proxy = renderer.proxy();
    thread::spawn(move || cli::run_cli(proxy));

    renderer.run()
}

struct RendererState {
    session: Session,
    rng: ThreadRng,
    layout: Layout,
    mouse_hit: Option<Hit>,
    mouse_pressed: bool,
}

impl RendererState {
    fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        cli::execute(&mut self.session, &mut self.rng, command, Instant::now())
    }
}

/// Runs any tick that came due and returns the window title for this frame.
fn update(state: &mut RendererState, now: Instant) -> String {
    if let Some(outcome) = state.session.poll(now) {
        debug!(?outcome, "tick");
    }

    let session = &state.session;
    let status = match session.state() {
        SessionState::Running => "running",
        SessionState::Idle => "idle",
    };

    format!(
        "life - generation {} - population {} - {status}",
        session.generation(),
        session.board().population()
    )
}

fn draw(state: &mut RendererState, mut frame: RenderFrame) {
    state.layout.frame_width = frame.width;
    state.layout.frame_height = frame.height;
    let layout = state.layout;

    frame.fill(BACKGROUND_COLOR);

    for button in Button::ALL {
        let color = match button {
            Button::StartStop if state.session.is_running() => STOP_COLOR,
            Button::StartStop => START_COLOR,
            Button::Randomize => RANDOMIZE_COLOR,
            Button::Reset => RESET_COLOR,
        };

        let rect = layout.button_rect(button);
        frame.draw_rect(rect.x, rect.y, rect.width, rect.height, color);
    }

    let (cell_width, cell_height) = layout.cell_size();
    if cell_width <= HALF_CELL_MARGIN * 2 || cell_height <= HALF_CELL_MARGIN * 2 {
        return;
    }

    for (pos, cell) in state.session.board().enumerate_cells() {
        let color = match cell {
            CellState::Alive => ALIVE_COLOR,
            CellState::Dead => DEAD_COLOR,
        };

        let rect = layout.cell_rect(pos);
        frame.draw_rect(
            rect.x + HALF_CELL_MARGIN,
            rect.y + HALF_CELL_MARGIN,
            rect.width - HALF_CELL_MARGIN * 2,
            rect.height - HALF_CELL_MARGIN * 2,
            color,
        );
    }
}

fn on_event(state: &mut RendererState, event: &WindowEvent) -> Flow {
    match event {
        WindowEvent::MouseInput {
            state: mouse_state,
            button: MouseButton::Left,
            ..
        } => {
            state.mouse_pressed = mouse_state.is_pressed();
            if state.mouse_pressed {
                return on_press(state);
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let hit = (position.x >= 0.0 && position.y >= 0.0)
                .then(|| state.layout.hit(position.x as u32, position.y as u32))
                .flatten();

            let prev_hit = state.mouse_hit;
            state.mouse_hit = hit;

            // Dragging paints across every cell the cursor enters.
            if state.mouse_pressed && hit != prev_hit {
                if let Some(Hit::Cell(pos)) = hit {
                    toggle_cell(state, pos);
                }
            }
        }
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed && !event.repeat =>
        {
            let command = match event.logical_key.as_ref() {
                Key::Named(NamedKey::Space) => Command::StartStop,
                Key::Named(NamedKey::Escape) => Command::Exit,
                Key::Character("n") => Command::Step(1),
                Key::Character("r") => Command::Randomize,
                Key::Character("c") => Command::Reset,
                Key::Character("q") => Command::Exit,
                _ => return Flow::Continue,
            };

            return run_command(state, command);
        }
        _ => {}
    }

    Flow::Continue
}

fn on_press(state: &mut RendererState) -> Flow {
    match state.mouse_hit {
        Some(Hit::Cell(pos)) => {
            toggle_cell(state, pos);
            Flow::Continue
        }
        Some(Hit::Button(button)) => {
            let command = match button {
                Button::StartStop => Command::StartStop,
                Button::Randomize => Command::Randomize,
                Button::Reset => Command::Reset,
            };
            run_command(state, command)
        }
        None => Flow::Continue,
    }
}

fn toggle_cell(state: &mut RendererState, pos: Position) {
    if let Err(e) = state.session.toggle(pos) {
        error!("Click mapped to an invalid cell: {e}");
    }
}

fn run_command(state: &mut RendererState, command: Command) -> Flow {
    state.execute(command).unwrap_or_else(|e| {
        error!("{command:?} failed: {e:?}");
        Flow::Continue
    })
}

/// Console commands get an `OK` or `! error` reply, like a little REPL.
fn on_console_command(state: &mut RendererState, command: Command) -> Flow {
    match state.execute(command) {
        Ok(flow) => {
            println!("OK");
            flow
        }
        Err(e) => {
            eprintln!("! {e:?}");
            Flow::Continue
        }
    }
}
