use crate::command::Command;
use crate::consts;
use crate::game::{Direction, Game, StepOutcome};
use crate::render::{Frame, GameOverScreen};
use crate::terminal::{Console, TerminalError};
use rand::Rng;
use std::thread::sleep;
use std::time::{Duration, Instant};

/// The game loop: waits for the player, runs games one after another, and
/// shows the result of each
#[derive(Debug)]
pub(crate) struct App<C, R = rand::rngs::ThreadRng> {
    console: C,
    game: Game<R>,
    state: AppState,
    /// The direction most recently asked for by the player.  The snake keeps
    /// being steered this way until another direction key is pressed.
    steering: Direction,
    /// How long the previous tick took, not counting its sleep
    lag: Duration,
}

impl<C: Console, R: Rng> App<C, R> {
    pub(crate) fn new(console: C, rng: R) -> App<C, R> {
        App {
            console,
            game: Game::new(rng),
            state: AppState::AwaitStart,
            steering: Direction::East,
            lag: Duration::ZERO,
        }
    }

    pub(crate) fn run(&mut self) -> Result<(), TerminalError> {
        while !self.quitting() {
            self.state = match self.state {
                AppState::AwaitStart => self.await_start()?,
                AppState::Playing => self.tick()?,
                AppState::GameOver { won } => self.game_over(won)?,
                AppState::Quit => AppState::Quit,
            };
        }
        Ok(())
    }

    fn await_start(&mut self) -> Result<AppState, TerminalError> {
        self.console.draw(&format!("{}\r\n", consts::START_PROMPT))?;
        if self.console.read_key()? == Some(Command::Quit) {
            return Ok(AppState::Quit);
        }
        self.new_game();
        Ok(AppState::Playing)
    }

    fn tick(&mut self) -> Result<AppState, TerminalError> {
        let start = Instant::now();
        if self.console.key_available()? {
            match self.console.read_key()? {
                Some(Command::Quit) => return Ok(AppState::Quit),
                Some(cmd) => self.steering = Direction::try_from(cmd).unwrap_or(self.steering),
                None => (),
            }
        }
        let outcome = self.game.step(self.steering);
        self.draw_frame()?;
        self.lag = start.elapsed();
        let next = match outcome {
            StepOutcome::Alive => AppState::Playing,
            StepOutcome::Dead(death) => {
                tracing::info!(
                    score = self.game.score(),
                    length = self.game.snake().len(),
                    "Snake {death}"
                );
                AppState::GameOver { won: false }
            }
            StepOutcome::BoardFull => {
                tracing::info!(score = self.game.score(), "Snake filled the board");
                AppState::GameOver { won: true }
            }
        };
        if self.lag > consts::TICK_PERIOD {
            tracing::debug!(lag = ?self.lag, "Tick overran its time budget");
        }
        sleep(idle_time(consts::TICK_PERIOD, self.lag));
        Ok(next)
    }

    fn game_over(&mut self, won: bool) -> Result<AppState, TerminalError> {
        let screen = GameOverScreen {
            won,
            score: self.game.score(),
            length: self.game.snake().len(),
        };
        self.console.draw(&screen.to_string())?;
        sleep(consts::SETTLE_PERIOD);
        self.console.discard_input()?;
        if self.console.read_key()? == Some(Command::Quit) {
            return Ok(AppState::Quit);
        }
        self.new_game();
        Ok(AppState::Playing)
    }

    fn draw_frame(&mut self) -> Result<(), TerminalError> {
        let frame = Frame {
            grid: self.game.grid(),
            score: self.game.score(),
            length: self.game.snake().len(),
            lag: self.lag,
        };
        self.console.draw(&frame.to_string())
    }

    fn new_game(&mut self) {
        self.game.reset();
        self.lag = Duration::ZERO;
        tracing::info!("Starting new game");
    }
}

impl<C, R> App<C, R> {
    fn quitting(&self) -> bool {
        matches!(self.state, AppState::Quit)
    }
}

/// How long to sleep after a tick that took `lag` so that ticks start
/// `budget` apart.  A tick that overran its budget is followed immediately by
/// the next one.
fn idle_time(budget: Duration, lag: Duration) -> Duration {
    budget.saturating_sub(lag)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    /// Waiting for a key press before the first game
    AwaitStart,
    Playing,
    /// Showing the result of a finished game.  `won` is true if the snake
    /// filled the whole board.
    GameOver { won: bool },
    Quit,
}
