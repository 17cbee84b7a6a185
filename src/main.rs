mod app;
mod command;
mod consts;
mod game;
mod render;
mod terminal;
use crate::app::App;
use crate::terminal::{Screen, TerminalError};
use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Diagnostics go to stderr so that they can be redirected away from the
    // board, e.g. `RUST_LOG=debug clisnake 2> snake.log`
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .init();
    let r = run();
    ratatui::restore();
    terminal_exit(r)
}

fn run() -> Result<(), TerminalError> {
    let screen = Screen::new(ratatui::init())?;
    App::new(screen, rand::rng()).run()
}

fn terminal_exit(r: Result<(), TerminalError>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Exiting due to terminal failure");
            eprintln!("{e}");
            let mut source = e.source();
            while let Some(src) = source {
                eprintln!("  caused by: {src}");
                source = src.source();
            }
            ExitCode::from(2)
        }
    }
}
