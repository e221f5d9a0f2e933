use crate::{
    game_state::{
        Ball, GameState, Paddle, Side, BALL_BOTTOM_BORDER, BALL_SIZE, BOTTOM_BORDER,
        PADDLE_HEIGHT, PADDLE_WIDTH, TOP_BORDER,
    },
    input::Velocity,
};

/// result of one rules-engine step.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Continue(Frame),
    /// the paddle on turn missed the ball. the state is left as it was at the moment of the miss.
    GameOver { loser: Side },
}

/// everything that changed during a tick, in the order it has to be redrawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// paddle that returned the ball this tick.
    pub hit: Option<Side>,
    /// only present when the paddle's position actually changed.
    pub paddle: Option<PaddleMove>,
    pub ball: BallMove,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaddleMove {
    pub side: Side,
    pub x: i32,
    pub from_y: i32,
    pub to_y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallMove {
    pub from: (i32, i32),
    pub to: (i32, i32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collision {
    /// ball is mid-field, or travelling away from the paddle whose plane it is on.
    None,
    Hit(Side),
    Miss(Side),
}

/// advances the session by one tick. `velocity` is applied to the paddle on turn only.
pub fn tick(state: &mut GameState, velocity: Velocity) -> TickOutcome {
    let on_turn = state.on_turn();

    let hit = match check_ball_paddle_collision(state) {
        Collision::Miss(loser) => return TickOutcome::GameOver { loser },
        Collision::Hit(side) => Some(side),
        Collision::None => None,
    };

    check_ball_border_collision(&mut state.ball);

    let paddle = state.paddle_mut(on_turn);
    let from_y = paddle.y;
    let paddle = if move_paddle(paddle, velocity) {
        Some(PaddleMove {
            side: on_turn,
            x: paddle.x,
            from_y,
            to_y: paddle.y,
        })
    } else {
        None
    };

    let ball = move_ball(&mut state.ball);

    TickOutcome::Continue(Frame { hit, paddle, ball })
}

/// tests whether the ball has reached the plane of the paddle it is heading towards,
/// and if so whether that paddle is in the way. a hit reverses the ball's horizontal direction.
pub fn check_ball_paddle_collision(state: &mut GameState) -> Collision {
    let ball = &mut state.ball;
    let side = if !ball.moving_right && ball.x <= state.left_paddle.x + PADDLE_WIDTH {
        Side::Left
    } else if ball.moving_right && ball.x + BALL_SIZE >= state.right_paddle.x {
        Side::Right
    } else {
        return Collision::None;
    };
    let paddle = match side {
        Side::Left => &state.left_paddle,
        Side::Right => &state.right_paddle,
    };
    if overlaps(paddle, ball) {
        ball.moving_right = !ball.moving_right;
        Collision::Hit(side)
    } else {
        Collision::Miss(side)
    }
}

/// bounces the ball off the top and bottom of the field. the sides are guarded by the paddles.
pub fn check_ball_border_collision(ball: &mut Ball) {
    if ball.y <= 0 && !ball.moving_down {
        ball.moving_down = true;
    } else if ball.y >= BALL_BOTTOM_BORDER && ball.moving_down {
        ball.moving_down = false;
    }
}

/// shifts the paddle by `velocity`, clamped to the field. returns whether it moved.
pub fn move_paddle(paddle: &mut Paddle, velocity: Velocity) -> bool {
    let y = (paddle.y + velocity.offset()).clamp(TOP_BORDER, BOTTOM_BORDER);
    let moved = y != paddle.y;
    paddle.y = y;
    moved
}

pub fn move_ball(ball: &mut Ball) -> BallMove {
    let from = (ball.x, ball.y);
    ball.x += ball.dx();
    ball.y += ball.dy();
    BallMove {
        from,
        to: (ball.x, ball.y),
    }
}

// both edges inclusive: touching counts as a hit.
fn overlaps(paddle: &Paddle, ball: &Ball) -> bool {
    paddle.y <= ball.y + BALL_SIZE && paddle.y + PADDLE_HEIGHT >= ball.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game_state::{FIELD_HEIGHT, LEFT_PADDLE_X, PADDLE_START_Y, RIGHT_PADDLE_X},
        input::Direction,
    };

    fn velocity(direction: Direction, magnitude: u8) -> Velocity {
        Velocity {
            direction,
            magnitude,
        }
    }

    /// state with the ball sitting on the left paddle's plane, heading left.
    fn ball_at_left_paddle(paddle_y: i32, ball_y: i32) -> GameState {
        let mut state = GameState::new();
        state.left_paddle.y = paddle_y;
        state.ball = Ball {
            x: LEFT_PADDLE_X + PADDLE_WIDTH,
            y: ball_y,
            moving_right: false,
            moving_down: true,
        };
        state
    }

    fn expect_frame(outcome: TickOutcome) -> Frame {
        match outcome {
            TickOutcome::Continue(frame) => frame,
            TickOutcome::GameOver { loser } => panic!("unexpected game over, player {loser:?} lost"),
        }
    }

    #[test]
    fn left_paddle_returns_ball() {
        let mut state = ball_at_left_paddle(20, 25);
        let frame = expect_frame(tick(&mut state, Velocity::STILL));
        assert_eq!(frame.hit, Some(Side::Left));
        assert!(state.ball.moving_right);
        assert_eq!(state.ball.x, LEFT_PADDLE_X + PADDLE_WIDTH + 1);
    }

    #[test]
    fn left_paddle_misses_ball() {
        let mut state = ball_at_left_paddle(0, 40);
        let before = state.clone();
        assert_eq!(
            tick(&mut state, Velocity::STILL),
            TickOutcome::GameOver { loser: Side::Left }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn right_paddle_returns_and_misses() {
        let mut state = GameState::new();
        state.ball.x = RIGHT_PADDLE_X - BALL_SIZE;
        state.ball.y = PADDLE_START_Y + 5;
        let frame = expect_frame(tick(&mut state, Velocity::STILL));
        assert_eq!(frame.hit, Some(Side::Right));
        assert!(!state.ball.moving_right);

        let mut state = GameState::new();
        state.ball.x = RIGHT_PADDLE_X - BALL_SIZE;
        state.ball.y = 0;
        state.right_paddle.y = BOTTOM_BORDER;
        assert_eq!(
            tick(&mut state, Velocity::STILL),
            TickOutcome::GameOver { loser: Side::Right }
        );
    }

    #[test]
    fn overlap_edges_are_inclusive() {
        // ball's bottom edge touches the paddle's top edge.
        let mut state = ball_at_left_paddle(30, 30 - BALL_SIZE);
        assert_eq!(check_ball_paddle_collision(&mut state), Collision::Hit(Side::Left));
        // ball's top edge touches the paddle's bottom edge.
        let mut state = ball_at_left_paddle(10, 10 + PADDLE_HEIGHT);
        assert_eq!(check_ball_paddle_collision(&mut state), Collision::Hit(Side::Left));
        // one pixel further is a miss.
        let mut state = ball_at_left_paddle(10, 10 + PADDLE_HEIGHT + 1);
        assert_eq!(check_ball_paddle_collision(&mut state), Collision::Miss(Side::Left));
    }

    #[test]
    fn ball_leaving_a_paddle_is_not_tested() {
        // just bounced off the left paddle, now heading right.
        let mut state = ball_at_left_paddle(0, 50);
        state.ball.moving_right = true;
        assert_eq!(check_ball_paddle_collision(&mut state), Collision::None);
        // mid-field.
        let mut state = GameState::new();
        assert_eq!(check_ball_paddle_collision(&mut state), Collision::None);
    }

    #[test]
    fn border_bounces() {
        let mut state = GameState::new();
        state.ball.y = 0;
        state.ball.moving_down = false;
        expect_frame(tick(&mut state, Velocity::STILL));
        assert!(state.ball.moving_down);
        assert_eq!(state.ball.y, 1);

        state.ball.y = FIELD_HEIGHT - BALL_SIZE;
        state.ball.moving_down = true;
        expect_frame(tick(&mut state, Velocity::STILL));
        assert!(!state.ball.moving_down);
        assert_eq!(state.ball.y, FIELD_HEIGHT - BALL_SIZE - 1);
    }

    #[test]
    fn only_paddle_on_turn_moves() {
        let mut state = GameState::new();
        let frame = expect_frame(tick(&mut state, velocity(Direction::Down, 2)));
        assert_eq!(
            frame.paddle,
            Some(PaddleMove {
                side: Side::Right,
                x: RIGHT_PADDLE_X,
                from_y: PADDLE_START_Y,
                to_y: PADDLE_START_Y + 2,
            })
        );
        assert_eq!(state.left_paddle.y, PADDLE_START_Y);
        assert_eq!(state.right_paddle.y, PADDLE_START_Y + 2);
    }

    #[test]
    fn turn_is_taken_before_the_bounce() {
        // the left paddle returns the ball and still gets to move this tick.
        let mut state = ball_at_left_paddle(20, 25);
        let frame = expect_frame(tick(&mut state, velocity(Direction::Up, 1)));
        assert_eq!(frame.paddle.map(|paddle| paddle.side), Some(Side::Left));
        assert_eq!(state.left_paddle.y, 19);
        assert_eq!(state.on_turn(), Side::Right);
    }

    #[test]
    fn paddle_is_clamped_to_field() {
        let mut paddle = Paddle { x: 5, y: 1 };
        assert!(move_paddle(&mut paddle, velocity(Direction::Up, 3)));
        assert_eq!(paddle.y, TOP_BORDER);
        assert!(!move_paddle(&mut paddle, velocity(Direction::Up, 3)));
        assert_eq!(paddle.y, TOP_BORDER);

        let mut paddle = Paddle {
            x: 5,
            y: BOTTOM_BORDER - 1,
        };
        assert!(move_paddle(&mut paddle, velocity(Direction::Down, 3)));
        assert_eq!(paddle.y, BOTTOM_BORDER);
        assert!(!move_paddle(&mut paddle, velocity(Direction::Down, 1)));
    }

    #[test]
    fn still_paddle_emits_no_delta() {
        let mut state = GameState::new();
        let frame = expect_frame(tick(&mut state, Velocity::STILL));
        assert_eq!(frame.paddle, None);
        assert_eq!(
            frame.ball,
            BallMove {
                from: (64, 32),
                to: (65, 33),
            }
        );
    }

    #[test]
    fn invariants_hold_over_long_rally() {
        let mut state = GameState::new();
        // push the paddle on turn as hard as possible, alternating direction every 15 ticks.
        for i in 0..2000 {
            let direction = if (i / 15) % 2 == 0 {
                Direction::Down
            } else {
                Direction::Up
            };
            // keep the paddle on turn lined up with the ball so the rally goes on.
            let side = state.on_turn();
            state.paddle_mut(side).y = (state.ball.y - 4).clamp(TOP_BORDER, BOTTOM_BORDER);
            if let TickOutcome::GameOver { loser } = tick(&mut state, velocity(direction, 3)) {
                panic!("player {} lost at tick {i}", loser.player());
            }
            for paddle in [state.left_paddle, state.right_paddle] {
                assert!((TOP_BORDER..=BOTTOM_BORDER).contains(&paddle.y));
            }
            assert!(state.ball.dx().abs() == 1 && state.ball.dy().abs() == 1);
            assert!((0..=BALL_BOTTOM_BORDER).contains(&state.ball.y));
        }
    }
}
