use std::{io, time::Instant};

use anyhow::{bail, Context};
use liblife::{
    patterns::{self, Pattern},
    Position, Session,
};
use rand::Rng;
use tracing::{info, warn};
use winit::event_loop::EventLoopProxy;

use crate::renderer::Flow;

/// Steps run back to back on the event-loop thread, so one command can't ask for too many.
pub const MAX_STEPS: usize = 10_000;

/// Something the user asked the session to do, from the console, the keyboard or the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    StartStop,
    Step(usize),
    Randomize,
    Reset,
    Toggle(Position),
    Pattern {
        pattern: &'static Pattern,
        origin: Option<Position>,
    },
    Print,
    Exit,
}

/// Reads commands from stdin and forwards them to the event loop until stdin closes
/// or the event loop goes away.
pub fn run_cli(proxy: EventLoopProxy<Command>) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                warn!("Reading stdin: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(command) => {
                if proxy.send_event(command).is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("! {e:?}"),
        }
    }
}

pub fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut args = line.split_whitespace();

    let command = match args.next().context("No command")? {
        "start" => Command::Start,

        "stop" => Command::Stop,

        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;
            if times > MAX_STEPS {
                bail!("Can step at most {MAX_STEPS} generations at once");
            }
            Command::Step(times)
        }

        "random" | "randomize" => Command::Randomize,

        "clear" | "reset" => Command::Reset,

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;
            Command::Toggle(Position::new(row, col))
        }

        "pattern" => {
            let name = args.next().context("missing pattern name")?;
            let pattern = patterns::find(name)
                .with_context(|| format!("Unknown pattern {name:?}"))?;

            let origin = match args.next() {
                Some(row) => {
                    let row = row.parse::<usize>()?;
                    let col = args.next().context("missing col")?.parse::<usize>()?;
                    Some(Position::new(row, col))
                }
                None => None,
            };

            Command::Pattern { pattern, origin }
        }

        "print" => Command::Print,

        "exit" | "quit" => Command::Exit,

        _ => bail!("Unknown command"),
    };

    if args.next().is_some() {
        bail!("Too many arguments");
    }

    Ok(command)
}

/// Applies `command` to the session.
pub fn execute<R>(
    session: &mut Session,
    rng: &mut R,
    command: Command,
    now: Instant,
) -> anyhow::Result<Flow>
where
    R: Rng + ?Sized,
{
    match command {
        Command::Start => session.start(now),

        Command::Stop => session.stop(),

        Command::StartStop => {
            if session.is_running() {
                session.stop();
            } else {
                session.start(now);
            }
        }

        Command::Step(times) => {
            for _ in 0..times {
                session.step_once();
            }
        }

        Command::Randomize => session.randomize(rng)?,

        Command::Reset => session.reset(),

        Command::Toggle(pos) => {
            session.toggle(pos)?;
        }

        Command::Pattern { pattern, origin } => {
            let origin = origin.unwrap_or_else(|| centered_origin(session, pattern));
            session.load_pattern(pattern, origin)?;
        }

        Command::Print => {
            let board = session.board();
            print!("{board}");
            println!(
                "generation {}, population {}",
                session.generation(),
                board.population()
            );
        }

        Command::Exit => {
            info!("exit requested");
            return Ok(Flow::Exit);
        }
    }

    Ok(Flow::Continue)
}

fn centered_origin(session: &Session, pattern: &Pattern) -> Position {
    let (rows, cols) = pattern.extent();
    let board = session.board();

    Position::new(
        board.height().saturating_sub(rows) / 2,
        board.width().saturating_sub(cols) / 2,
    )
}
