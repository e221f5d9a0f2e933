use std::time::Duration;

use crate::{input::Calibration, ConfigError};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub joystick: Calibration,
    pub timing: Timing,
    pub controls: Controls,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    /// how long the splash screen stays up after boot.
    pub splash: Duration,
    /// how long each countdown digit is shown.
    pub countdown_digit: Duration,
    /// first digit of the countdown, which runs down to 1.
    pub countdown_from: u8,
    /// interval between start button reads.
    pub button_poll: Duration,
    /// pause at the end of every rally tick. zero runs as fast as the display allows.
    pub tick: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            splash: Duration::from_millis(5000),
            countdown_digit: Duration::from_millis(750),
            countdown_from: 3,
            button_poll: Duration::from_millis(100),
            tick: Duration::from_millis(20),
        }
    }
}

/// which inputs the players are wired to.
#[derive(Clone, Debug, PartialEq)]
pub struct Controls {
    /// analog channel of the left player's stick.
    pub left_axis: u8,
    /// analog channel of the right player's stick. may equal `left_axis` when
    /// both players share one stick, which works because only the paddle on turn moves.
    pub right_axis: u8,
    pub button_pin: u8,
    /// the button pulls the pin low when pressed.
    pub button_active_low: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left_axis: 3,
            right_axis: 3,
            button_pin: 14,
            button_active_low: true,
        }
    }
}

impl Controls {
    /// interprets a pin level read from `button_pin`.
    pub fn is_pressed(&self, level: bool) -> bool {
        level != self.button_active_low
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Calibration {
            deadzone,
            mid_threshold,
            far_threshold,
            ..
        } = self.joystick;
        if deadzone < 0 {
            return Err(ConfigError::NegativeDeadzone(deadzone));
        }
        if deadzone >= mid_threshold {
            return Err(ConfigError::DeadzoneBeyondMidThreshold {
                deadzone,
                mid_threshold,
            });
        }
        if mid_threshold >= far_threshold {
            return Err(ConfigError::MidThresholdBeyondFarThreshold {
                mid_threshold,
                far_threshold,
            });
        }
        if !(1..=9).contains(&self.timing.countdown_from) {
            return Err(ConfigError::InvalidCountdown(self.timing.countdown_from));
        }
        if self.timing.button_poll.is_zero() {
            return Err(ConfigError::ZeroButtonPoll);
        }
        Ok(())
    }
}
