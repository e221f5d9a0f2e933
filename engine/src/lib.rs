use thiserror::Error;

pub mod board;
pub mod config;
pub mod game_state;
pub mod input;
pub mod render;
pub mod rules;
pub mod session;

#[cfg(test)]
mod testing;

pub use board::Board;
pub use config::Config;
pub use session::{Phase, Session};

/// a configuration the game refuses to start with.
#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub enum ConfigError {
    #[error("joystick deadzone must not be negative, got {0}")]
    NegativeDeadzone(i32),
    #[error("joystick deadzone ({deadzone}) must be smaller than the mid speed threshold ({mid_threshold})")]
    DeadzoneBeyondMidThreshold { deadzone: i32, mid_threshold: i32 },
    #[error("mid speed threshold ({mid_threshold}) must be smaller than the far speed threshold ({far_threshold})")]
    MidThresholdBeyondFarThreshold {
        mid_threshold: i32,
        far_threshold: i32,
    },
    #[error("countdown must start between 1 and 9, got {0}")]
    InvalidCountdown(u8),
    #[error("button poll interval must not be zero")]
    ZeroButtonPoll,
}
