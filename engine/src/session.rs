//! the outer game loop: splash, idle screen, countdown, rally, and back to idle.

use std::convert::Infallible;

use log::{debug, info, trace};

use crate::{
    board::Board,
    config::Config,
    game_state::{GameState, Side},
    input::sample_paddle_velocity,
    render::{
        finish_countdown, render_countdown_digit, render_field, render_frame, render_idle,
        render_splash,
    },
    rules::{tick, Frame, TickOutcome},
    ConfigError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// boot splash, shown once.
    Attract,
    /// idle screen until the start button is pressed.
    WaitForStart,
    Countdown,
    /// the rally, until one of the paddles misses.
    Active,
}

pub struct Session<B> {
    board: B,
    config: Config,
    phase: Phase,
    /// only exists between the start button press and the end of the rally.
    game: Option<GameState>,
    last_loser: Option<Side>,
}

impl<B: Board> Session<B> {
    pub fn new(board: B, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board,
            config,
            phase: Phase::Attract,
            game: None,
            last_loser: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// the side that lost the most recent rally.
    pub fn last_loser(&self) -> Option<Side> {
        self.last_loser
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    /// runs sessions back to back. only returns if the board fails.
    pub fn run(&mut self) -> Result<Infallible, B::Error> {
        loop {
            self.step()?;
        }
    }

    /// runs the current phase to completion and moves on to the next one.
    pub fn step(&mut self) -> Result<Phase, B::Error> {
        let next = match self.phase {
            Phase::Attract => self.attract()?,
            Phase::WaitForStart => self.wait_for_start()?,
            Phase::Countdown => self.countdown()?,
            Phase::Active => self.rally()?,
        };
        debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    fn attract(&mut self) -> Result<Phase, B::Error> {
        render_splash(&mut self.board)?;
        self.board.delay(self.config.timing.splash)?;
        Ok(Phase::WaitForStart)
    }

    fn wait_for_start(&mut self) -> Result<Phase, B::Error> {
        render_idle(&mut self.board)?;
        self.wait_for_button_press()?;
        let game = GameState::new();
        render_field(&mut self.board, &game)?;
        self.game = Some(game);
        Ok(Phase::Countdown)
    }

    /// blocks until the button goes from released to pressed. a button that is
    /// already held when the wait starts has to be let go first.
    fn wait_for_button_press(&mut self) -> Result<(), B::Error> {
        let controls = &self.config.controls;
        let mut released = false;
        loop {
            let level = self.board.read_digital(controls.button_pin)?;
            if !controls.is_pressed(level) {
                released = true;
            } else if released {
                return Ok(());
            }
            self.board.delay(self.config.timing.button_poll)?;
        }
    }

    fn countdown(&mut self) -> Result<Phase, B::Error> {
        for digit in (1..=self.config.timing.countdown_from).rev() {
            render_countdown_digit(&mut self.board, digit)?;
            self.board.delay(self.config.timing.countdown_digit)?;
        }
        finish_countdown(&mut self.board)?;
        Ok(Phase::Active)
    }

    fn rally(&mut self) -> Result<Phase, B::Error> {
        let mut game = self.game.take().unwrap_or_default();
        let mut ticks = 0u64;
        let loser = loop {
            ticks += 1;
            if let Some(loser) = self.rally_tick(&mut game)? {
                break loser;
            }
        };
        let paddle = game.paddle(loser);
        info!(
            "P{} game over after {ticks} ticks: ball x={} y={}, player {} x={} y={}",
            loser.player(),
            game.ball.x,
            game.ball.y,
            loser.player(),
            paddle.x,
            paddle.y,
        );
        self.last_loser = Some(loser);
        Ok(Phase::WaitForStart)
    }

    /// one rules-engine step: sample the stick of the paddle on turn, advance, redraw.
    fn rally_tick(&mut self, game: &mut GameState) -> Result<Option<Side>, B::Error> {
        let on_turn = game.on_turn();
        let channel = match on_turn {
            Side::Left => self.config.controls.left_axis,
            Side::Right => self.config.controls.right_axis,
        };
        let raw = self.board.read_analog(channel)?;
        let velocity = sample_paddle_velocity(raw, &self.config.joystick);
        let frame = match tick(game, velocity) {
            TickOutcome::GameOver { loser } => return Ok(Some(loser)),
            TickOutcome::Continue(frame) => frame,
        };
        if let Some(side) = frame.hit {
            log_hit(game, &frame, side);
        }
        trace!("ball {:?} -> {:?}, raw stick {raw}", frame.ball.from, frame.ball.to);
        render_frame(&mut self.board, &frame)?;
        if !self.config.timing.tick.is_zero() {
            self.board.delay(self.config.timing.tick)?;
        }
        Ok(None)
    }
}

/// logs the positions at the moment of the hit, before this tick's movement.
fn log_hit(game: &GameState, frame: &Frame, side: Side) {
    let paddle = game.paddle(side);
    let paddle_y = match frame.paddle {
        Some(moved) if moved.side == side => moved.from_y,
        _ => paddle.y,
    };
    let (ball_x, ball_y) = frame.ball.from;
    info!(
        "{}: ball x={ball_x} y={ball_y}, player {} x={} y={paddle_y}",
        match side {
            Side::Left => "ping",
            Side::Right => "pong",
        },
        side.player(),
        paddle.x,
    );
}
