use std::{
    fs::File,
    io::stdout,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use engine::{
    config::{Controls, Timing},
    input::Calibration,
    Config, Session,
};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use stick::SimulatedStick;
use terminal_board::{CrosstermEvents, TerminalBoard, TerminalError};

mod framebuffer;
mod stick;
mod terminal_board;

/// Two-player pong for a 128x64 OLED and a thumb stick, played in the terminal
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Pause between rally ticks, in milliseconds
    #[arg(long, default_value_t = millis(Timing::default().tick))]
    tick_ms: u64,
    /// How long the splash screen stays up, in milliseconds
    #[arg(long, default_value_t = millis(Timing::default().splash))]
    splash_ms: u64,
    /// How long each countdown digit is shown, in milliseconds
    #[arg(long, default_value_t = millis(Timing::default().countdown_digit))]
    countdown_ms: u64,
    /// First digit of the countdown
    #[arg(long, default_value_t = Timing::default().countdown_from)]
    countdown_from: u8,
    /// Interval between start button reads, in milliseconds
    #[arg(long, default_value_t = millis(Timing::default().button_poll))]
    poll_ms: u64,
    /// Stick reading at rest
    #[arg(long, default_value_t = Calibration::default().neutral)]
    neutral: i32,
    /// Band around the rest reading that does not move the paddle
    #[arg(long, default_value_t = Calibration::default().deadzone)]
    deadzone: i32,
    /// Deflection past which the paddle moves at the middle speed
    #[arg(long, default_value_t = Calibration::default().mid_threshold)]
    mid_threshold: i32,
    /// Deflection past which the paddle moves at full speed
    #[arg(long, default_value_t = Calibration::default().far_threshold)]
    far_threshold: i32,
    /// Analog channel of the left player's stick
    #[arg(long, default_value_t = Controls::default().left_axis)]
    left_axis: u8,
    /// Analog channel of the right player's stick. Same as the left one means a shared stick
    #[arg(long, default_value_t = Controls::default().right_axis)]
    right_axis: u8,
    /// Amplitude of the random jitter added to stick readings
    #[arg(long, default_value_t = 20)]
    noise: i32,
    /// Time without a key press after which a stick springs back to rest, in milliseconds
    #[arg(long, default_value_t = 600)]
    stick_hold_ms: u64,
    /// Seed for the stick jitter
    #[arg(long)]
    seed: Option<u64>,
    /// File the game log is written to
    #[arg(long, default_value = "pong.log")]
    log_file: PathBuf,
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            joystick: Calibration {
                neutral: self.neutral,
                deadzone: self.deadzone,
                mid_threshold: self.mid_threshold,
                far_threshold: self.far_threshold,
            },
            timing: Timing {
                splash: Duration::from_millis(self.splash_ms),
                countdown_digit: Duration::from_millis(self.countdown_ms),
                countdown_from: self.countdown_from,
                button_poll: Duration::from_millis(self.poll_ms),
                tick: Duration::from_millis(self.tick_ms),
            },
            controls: Controls {
                left_axis: self.left_axis,
                right_axis: self.right_axis,
                ..Controls::default()
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.config();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let hold = Duration::from_millis(cli.stick_hold_ms);
    let mut stick = || {
        SimulatedStick::new(
            config.joystick,
            hold,
            cli.noise,
            StdRng::seed_from_u64(rng.gen()),
        )
    };
    let (left_stick, right_stick) = (stick(), stick());
    let board = TerminalBoard::new(
        stdout(),
        CrosstermEvents,
        config.controls.clone(),
        left_stick,
        right_stick,
    );
    let mut session = Session::new(board, config).context("invalid configuration")?;

    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
        .context("failed to set up the terminal")?;
    info!("board ready");
    let result = session.run();
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)
        .context("failed to restore the terminal")?;

    match result {
        Ok(never) => match never {},
        Err(TerminalError::Quit) => {
            info!("quit");
            Ok(())
        }
        Err(err) => Err(err).context("game loop failed"),
    }
}

/// logs go to a file: the terminal is busy showing the display.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
