pub const FIELD_WIDTH: i32 = 128;
pub const FIELD_HEIGHT: i32 = 64;

pub const PADDLE_WIDTH: i32 = 8;
pub const PADDLE_HEIGHT: i32 = 20;
pub const BALL_SIZE: i32 = 8;

pub const LEFT_PADDLE_X: i32 = 5;
pub const RIGHT_PADDLE_X: i32 = 108;
pub const PADDLE_START_Y: i32 = 22;

pub const BALL_START_X: i32 = 64;
pub const BALL_START_Y: i32 = 32;

/// highest row a paddle's top edge can sit on.
pub const TOP_BORDER: i32 = 0;
/// lowest row a paddle's top edge can sit on, so the whole paddle stays on the field.
pub const BOTTOM_BORDER: i32 = FIELD_HEIGHT - PADDLE_HEIGHT;
/// lowest row the ball's top edge can reach before bouncing back up.
pub const BALL_BOTTOM_BORDER: i32 = FIELD_HEIGHT - BALL_SIZE;

const _CHECKS: () = {
    assert!(
        PADDLE_WIDTH % 8 == 0 && BALL_SIZE % 8 == 0,
        "sprites are blitted as whole bytes, so their widths must be multiples of 8"
    );
    assert!(
        LEFT_PADDLE_X + PADDLE_WIDTH < BALL_START_X
            && BALL_START_X + BALL_SIZE < RIGHT_PADDLE_X,
        "the ball must start between the paddles"
    );
    assert!(
        RIGHT_PADDLE_X + PADDLE_WIDTH <= FIELD_WIDTH,
        "the right paddle must fit on the field"
    );
    assert!(
        PADDLE_START_Y >= TOP_BORDER && PADDLE_START_Y <= BOTTOM_BORDER,
        "paddles must start inside their borders"
    );
    assert!(
        BALL_START_Y >= 0 && BALL_START_Y <= BALL_BOTTOM_BORDER,
        "the ball must start on the field"
    );
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// player number as printed in logs and on screen.
    pub fn player(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paddle {
    /// fixed for the whole session.
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub moving_right: bool,
    pub moving_down: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            left_paddle: Paddle {
                x: LEFT_PADDLE_X,
                y: PADDLE_START_Y,
            },
            right_paddle: Paddle {
                x: RIGHT_PADDLE_X,
                y: PADDLE_START_Y,
            },
            ball: Ball {
                x: BALL_START_X,
                y: BALL_START_Y,
                moving_right: true,
                moving_down: true,
            },
        }
    }

    /// the paddle responsible for intercepting the ball, derived from which way it travels.
    pub fn on_turn(&self) -> Side {
        if self.ball.moving_right {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// horizontal step per tick, always -1 or +1.
    pub fn dx(&self) -> i32 {
        if self.moving_right {
            1
        } else {
            -1
        }
    }

    /// vertical step per tick, always -1 or +1.
    pub fn dy(&self) -> i32 {
        if self.moving_down {
            1
        } else {
            -1
        }
    }
}
