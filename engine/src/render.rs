//! turns game state and per-tick deltas into draw calls on a [`Board`].
//!
//! the field is only redrawn in full when a session starts. during a rally every moved
//! sprite is erased at its old position before being drawn at the new one, then the field
//! markings the erase may have cut through are put back and the buffer is flushed once.

use crate::{
    board::{Bitmap, Board, Glyph},
    game_state::{GameState, BALL_SIZE, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH},
    rules::Frame,
};

const PADDLE_BYTES: usize = (PADDLE_WIDTH / 8 * PADDLE_HEIGHT) as usize;
const BALL_BYTES: usize = (BALL_SIZE / 8 * BALL_SIZE) as usize;

const PADDLE_DATA: [u8; PADDLE_BYTES] = [0xff; PADDLE_BYTES];
const EMPTY_PADDLE_DATA: [u8; PADDLE_BYTES] = [0x00; PADDLE_BYTES];
#[rustfmt::skip]
const BALL_DATA: [u8; BALL_BYTES] = [
    0b1111_1111,
    0b1001_1001,
    0b1010_0101,
    0b1101_1011,
    0b1101_1011,
    0b1010_0101,
    0b1001_1001,
    0b1111_1111,
];
const EMPTY_BALL_DATA: [u8; BALL_BYTES] = [0x00; BALL_BYTES];

pub const PADDLE_IMAGE: Bitmap<'static> =
    Bitmap::new(PADDLE_WIDTH as u32, PADDLE_HEIGHT as u32, &PADDLE_DATA);
pub const EMPTY_PADDLE_IMAGE: Bitmap<'static> =
    Bitmap::new(PADDLE_WIDTH as u32, PADDLE_HEIGHT as u32, &EMPTY_PADDLE_DATA);
pub const BALL_IMAGE: Bitmap<'static> =
    Bitmap::new(BALL_SIZE as u32, BALL_SIZE as u32, &BALL_DATA);
pub const EMPTY_BALL_IMAGE: Bitmap<'static> =
    Bitmap::new(BALL_SIZE as u32, BALL_SIZE as u32, &EMPTY_BALL_DATA);

/// page and column the countdown digit is drawn at, centred on the field.
pub const COUNTDOWN_PAGE: u8 = 3;
pub const COUNTDOWN_COLUMN: i32 = FIELD_WIDTH / 2 - 4;

/// rows of the centre line left out while the countdown digit is on screen.
const CENTRE_GAP_TOP: i32 = 14;
const CENTRE_GAP_BOTTOM: i32 = 42;

const CENTRE_LEFT_X: i32 = FIELD_WIDTH / 2 - 1;
const CENTRE_RIGHT_X: i32 = FIELD_WIDTH / 2;

const EMPTY_GLYPH: Glyph = [0; 8];

/// digits 0 to 9 in page layout, converted at compile time from row-major glyphs
/// whose bit 0 is the leftmost pixel.
#[rustfmt::skip]
pub const DIGITS: [Glyph; 10] = [
    to_page_layout([0x3e, 0x63, 0x73, 0x7b, 0x6f, 0x67, 0x3e, 0x00]),
    to_page_layout([0x0c, 0x0e, 0x0c, 0x0c, 0x0c, 0x0c, 0x3f, 0x00]),
    to_page_layout([0x1e, 0x33, 0x30, 0x1c, 0x06, 0x33, 0x3f, 0x00]),
    to_page_layout([0x1e, 0x33, 0x30, 0x1c, 0x30, 0x33, 0x1e, 0x00]),
    to_page_layout([0x38, 0x3c, 0x36, 0x33, 0x7f, 0x30, 0x78, 0x00]),
    to_page_layout([0x3f, 0x03, 0x1f, 0x30, 0x30, 0x33, 0x1e, 0x00]),
    to_page_layout([0x1c, 0x06, 0x03, 0x1f, 0x33, 0x33, 0x1e, 0x00]),
    to_page_layout([0x3f, 0x33, 0x30, 0x18, 0x0c, 0x0c, 0x0c, 0x00]),
    to_page_layout([0x1e, 0x33, 0x33, 0x1e, 0x33, 0x33, 0x1e, 0x00]),
    to_page_layout([0x1e, 0x33, 0x33, 0x3e, 0x30, 0x18, 0x0e, 0x00]),
];

const fn to_page_layout(rows: [u8; 8]) -> Glyph {
    let mut glyph = [0; 8];
    let mut column = 0;
    while column < 8 {
        let mut row = 0;
        while row < 8 {
            if rows[row] & (1 << column) != 0 {
                glyph[column] |= 1 << row;
            }
            row += 1;
        }
        column += 1;
    }
    glyph
}

pub fn render_splash<B: Board>(board: &mut B) -> Result<(), B::Error> {
    board.clear_screen()?;
    board.draw_text_large(0, "PONG")?;
    board.draw_text(3, "128x64 OLED")?;
    board.draw_text(6, concat!("v", env!("CARGO_PKG_VERSION")))?;
    board.show_buffer()
}

pub fn render_idle<B: Board>(board: &mut B) -> Result<(), B::Error> {
    board.clear_screen()?;
    board.contrast(u8::MAX)?;
    board.draw_text(2, "Press the button")?;
    board.draw_text(4, "to start game!")?;
    board.show_buffer()
}

/// full redraw at the start of a session. the centre line has a gap for the countdown.
pub fn render_field<B: Board>(board: &mut B, state: &GameState) -> Result<(), B::Error> {
    board.clear_screen()?;
    draw_borders(board)?;
    for x in [CENTRE_LEFT_X, CENTRE_RIGHT_X] {
        board.draw_line(x, 0, x, CENTRE_GAP_TOP - 1)?;
        board.draw_line(x, CENTRE_GAP_BOTTOM + 1, x, FIELD_HEIGHT - 1)?;
    }
    for paddle in [&state.left_paddle, &state.right_paddle] {
        board.draw_bitmap(paddle.x, paddle.y, &PADDLE_IMAGE)?;
    }
    board.show_buffer()
}

pub fn render_countdown_digit<B: Board>(board: &mut B, digit: u8) -> Result<(), B::Error> {
    let glyph = &DIGITS[usize::from(digit % 10)];
    board.draw_glyph_image(COUNTDOWN_PAGE, COUNTDOWN_COLUMN, glyph)?;
    board.show_buffer()
}

/// removes the countdown digit and closes the gap in the centre line.
pub fn finish_countdown<B: Board>(board: &mut B) -> Result<(), B::Error> {
    board.draw_glyph_image(COUNTDOWN_PAGE, COUNTDOWN_COLUMN, &EMPTY_GLYPH)?;
    draw_markings(board)?;
    board.show_buffer()
}

/// applies one tick's deltas: erase before draw for each moved sprite, then one flush.
pub fn render_frame<B: Board>(board: &mut B, frame: &Frame) -> Result<(), B::Error> {
    if let Some(paddle) = &frame.paddle {
        board.draw_bitmap(paddle.x, paddle.from_y, &EMPTY_PADDLE_IMAGE)?;
        board.draw_bitmap(paddle.x, paddle.to_y, &PADDLE_IMAGE)?;
    }
    let (x, y) = frame.ball.from;
    board.draw_bitmap(x, y, &EMPTY_BALL_IMAGE)?;
    let (x, y) = frame.ball.to;
    board.draw_bitmap(x, y, &BALL_IMAGE)?;
    draw_markings(board)?;
    board.show_buffer()
}

fn draw_markings<B: Board>(board: &mut B) -> Result<(), B::Error> {
    draw_borders(board)?;
    for x in [CENTRE_LEFT_X, CENTRE_RIGHT_X] {
        board.draw_line(x, 0, x, FIELD_HEIGHT - 1)?;
    }
    Ok(())
}

fn draw_borders<B: Board>(board: &mut B) -> Result<(), B::Error> {
    board.draw_line(0, 0, FIELD_WIDTH - 1, 0)?;
    board.draw_line(0, FIELD_HEIGHT - 1, FIELD_WIDTH - 1, FIELD_HEIGHT - 1)
}
