use std::time::{Duration, Instant};

use engine::input::Calibration;
use rand::{rngs::StdRng, Rng};

/// full scale of the 12-bit converter the stick is wired to.
pub const ADC_MAX: i32 = 4095;

/// a thumb stick driven by key presses.
///
/// every press pushes the stick one speed tier further in its direction, a press the other
/// way snaps it back to rest, and it springs back on its own when no key arrives for `hold`.
pub struct SimulatedStick {
    calibration: Calibration,
    hold: Duration,
    noise: i32,
    rng: StdRng,
    /// -3 (fully up) to 3 (fully down).
    tier: i8,
    last_nudge: Option<Instant>,
}

impl SimulatedStick {
    pub fn new(calibration: Calibration, hold: Duration, noise: i32, rng: StdRng) -> Self {
        Self {
            calibration,
            hold,
            noise: noise.max(0),
            rng,
            tier: 0,
            last_nudge: None,
        }
    }

    pub fn nudge(&mut self, up: bool, now: Instant) {
        let step = if up { -1 } else { 1 };
        if self.tier != 0 && self.tier.signum() != step {
            self.tier = 0;
        } else {
            self.tier = (self.tier + step).clamp(-3, 3);
        }
        self.last_nudge = Some(now);
    }

    /// reading of a stick nobody touches, without jitter.
    pub fn resting(&self) -> i32 {
        self.calibration.neutral
    }

    /// samples the converter, including its jitter.
    pub fn read(&mut self, now: Instant) -> i32 {
        if let Some(at) = self.last_nudge {
            if now.saturating_duration_since(at) >= self.hold {
                self.tier = 0;
                self.last_nudge = None;
            }
        }
        let jitter = if self.noise > 0 {
            self.rng.gen_range(-self.noise..=self.noise)
        } else {
            0
        };
        (self.calibration.neutral + self.deflection() + jitter).clamp(0, ADC_MAX)
    }

    /// distance from neutral for the current tier, in the middle of the tier's band.
    fn deflection(&self) -> i32 {
        let Calibration {
            deadzone,
            mid_threshold,
            far_threshold,
            ..
        } = self.calibration;
        let distance = match self.tier.unsigned_abs() {
            0 => 0,
            1 => (deadzone + mid_threshold) / 2,
            2 => (mid_threshold + far_threshold) / 2,
            _ => far_threshold + (far_threshold - mid_threshold) / 2,
        };
        distance * i32::from(self.tier.signum())
    }
}
