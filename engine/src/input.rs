/// joystick calibration for one analog axis, in raw ADC counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    /// reading with the stick at rest.
    pub neutral: i32,
    /// band around `neutral` in which no movement is registered.
    pub deadzone: i32,
    /// deviation from `neutral` past which the paddle moves at the middle speed.
    pub mid_threshold: i32,
    /// deviation from `neutral` past which the paddle moves at full speed.
    pub far_threshold: i32,
}

impl Default for Calibration {
    /// values for a 12-bit ADC with 11dB attenuation reading a 2-axis thumb stick.
    fn default() -> Self {
        Self {
            neutral: 1790,
            deadzone: 100,
            mid_threshold: 850,
            far_threshold: 1400,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    None,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Velocity {
    pub direction: Direction,
    /// speed tier, 1 to 3. meaningless when `direction` is `None`.
    pub magnitude: u8,
}

impl Velocity {
    pub const STILL: Velocity = Velocity {
        direction: Direction::None,
        magnitude: 1,
    };

    /// signed vertical shift in pixels; screen rows grow downwards.
    pub fn offset(&self) -> i32 {
        match self.direction {
            Direction::None => 0,
            Direction::Up => -i32::from(self.magnitude),
            Direction::Down => i32::from(self.magnitude),
        }
    }
}

pub fn sample_paddle_velocity(raw_axis_value: i32, calibration: &Calibration) -> Velocity {
    let deviation = raw_axis_value - calibration.neutral;
    let direction = if deviation < -calibration.deadzone {
        Direction::Up
    } else if deviation > calibration.deadzone {
        Direction::Down
    } else {
        return Velocity::STILL;
    };
    let distance = deviation.abs();
    let magnitude = if distance > calibration.far_threshold {
        3
    } else if distance > calibration.mid_threshold {
        2
    } else {
        1
    };
    Velocity {
        direction,
        magnitude,
    }
}
