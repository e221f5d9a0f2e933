use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoFont, MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};
use engine::{
    board::{Bitmap, Board, Glyph},
    config::Controls,
    game_state::Side,
};
use thiserror::Error;

use crate::{
    framebuffer::{infallible, FrameBuffer, HEIGHT, WIDTH},
    stick::SimulatedStick,
};

/// two pixel rows share one terminal row.
const TERMINAL_ROWS: usize = HEIGHT / 2;
/// dimmest grey used for lit pixels, so a zero contrast stays visible.
const MIN_GREY: u8 = 64;
const HELP: &str = "space: button  w/s: left stick  up/down: right stick  q: quit";

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("quit requested")]
    Quit,
}

/// where key presses come from.
pub trait EventSource {
    /// waits up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// a 128x64 panel drawn with half block characters, with the keyboard standing in for
/// the joystick and its button.
pub struct TerminalBoard<W, E> {
    out: W,
    events: E,
    frame: FrameBuffer,
    /// what the terminal currently shows. `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    contrast: u8,
    controls: Controls,
    left_stick: SimulatedStick,
    right_stick: SimulatedStick,
    button_latched: bool,
}

impl<W: Write, E: EventSource> TerminalBoard<W, E> {
    pub fn new(
        out: W,
        events: E,
        controls: Controls,
        left_stick: SimulatedStick,
        right_stick: SimulatedStick,
    ) -> Self {
        Self {
            out,
            events,
            frame: FrameBuffer::new(),
            shown: None,
            contrast: u8::MAX,
            controls,
            left_stick,
            right_stick,
            button_latched: false,
        }
    }

    fn shares_stick(&self) -> bool {
        self.controls.left_axis == self.controls.right_axis
    }

    fn stick_mut(&mut self, side: Side) -> &mut SimulatedStick {
        if side == Side::Left || self.shares_stick() {
            &mut self.left_stick
        } else {
            &mut self.right_stick
        }
    }

    /// handles everything that has already arrived without waiting.
    fn pump_events(&mut self) -> Result<(), TerminalError> {
        while let Some(event) = self.events.next_event(Duration::ZERO)? {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<(), TerminalError> {
        let key = match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => key,
            Event::Resize(..) => {
                self.shown = None;
                return Ok(());
            }
            _ => return Ok(()),
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Err(TerminalError::Quit);
        }
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Err(TerminalError::Quit),
            KeyCode::Char(' ') | KeyCode::Enter => self.button_latched = true,
            KeyCode::Char('w' | 'W') => self.stick_mut(Side::Left).nudge(true, now),
            KeyCode::Char('s' | 'S') => self.stick_mut(Side::Left).nudge(false, now),
            KeyCode::Up => self.stick_mut(Side::Right).nudge(true, now),
            KeyCode::Down => self.stick_mut(Side::Right).nudge(false, now),
            _ => {}
        }
        Ok(())
    }

    fn draw_string(&mut self, page: u8, text: &str, font: &MonoFont) {
        let top = i32::from(page) * 8;
        let style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();
        infallible(
            Text::with_baseline(text, Point::new(0, top), style, Baseline::Top)
                .draw(&mut self.frame),
        );
    }

    fn grey(&self) -> Color {
        let level = self.contrast.max(MIN_GREY);
        Color::Rgb {
            r: level,
            g: level,
            b: level,
        }
    }
}

impl<W: Write, E: EventSource> Board for TerminalBoard<W, E> {
    type Error = TerminalError;

    fn clear_screen(&mut self) -> Result<(), Self::Error> {
        self.frame.blank();
        Ok(())
    }

    fn show_buffer(&mut self) -> Result<(), Self::Error> {
        let full = self.shown.is_none();
        if full {
            queue!(
                self.out,
                Clear(ClearType::All),
                MoveTo(0, TERMINAL_ROWS as u16 + 1),
                Print(HELP)
            )?;
        }
        let grey = self.grey();
        queue!(self.out, SetForegroundColor(grey))?;
        for row in 0..TERMINAL_ROWS {
            let (top, bottom) = (row * 2, row * 2 + 1);
            let changed = match &self.shown {
                None => true,
                Some(shown) => {
                    shown.row_differs(&self.frame, top) || shown.row_differs(&self.frame, bottom)
                }
            };
            if !changed {
                continue;
            }
            let line = (0..WIDTH)
                .map(
                    |x| match (self.frame.pixel(x, top), self.frame.pixel(x, bottom)) {
                        (true, true) => '\u{2588}',  // █
                        (true, false) => '\u{2580}', // ▀
                        (false, true) => '\u{2584}', // ▄
                        (false, false) => ' ',
                    },
                )
                .collect::<String>();
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        self.shown = Some(self.frame.clone());
        Ok(())
    }

    fn contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        if level != self.contrast {
            self.contrast = level;
            self.shown = None;
        }
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Self::Error> {
        infallible(
            Line::new(Point::new(x0, y0), Point::new(x1, y1))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(&mut self.frame),
        );
        Ok(())
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap) -> Result<(), Self::Error> {
        self.frame.blit_bitmap(x, y, bitmap);
        Ok(())
    }

    fn draw_glyph_image(
        &mut self,
        page: u8,
        column: i32,
        glyph: &Glyph,
    ) -> Result<(), Self::Error> {
        self.frame.blit_glyph(page, column, glyph);
        Ok(())
    }

    fn draw_text(&mut self, page: u8, text: &str) -> Result<(), Self::Error> {
        self.draw_string(page, text, &FONT_6X10);
        Ok(())
    }

    fn draw_text_large(&mut self, page: u8, text: &str) -> Result<(), Self::Error> {
        self.draw_string(page, text, &FONT_10X20);
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> Result<i32, Self::Error> {
        self.pump_events()?;
        let now = Instant::now();
        let stick = if channel == self.controls.left_axis {
            &mut self.left_stick
        } else if channel == self.controls.right_axis {
            &mut self.right_stick
        } else {
            // nothing wired up: pretend an untouched stick.
            return Ok(self.left_stick.resting());
        };
        Ok(stick.read(now))
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, Self::Error> {
        self.pump_events()?;
        let pressed = pin == self.controls.button_pin && self.button_latched;
        if pressed {
            self.button_latched = false;
        }
        Ok(pressed != self.controls.button_active_low)
    }

    /// sleeps while still reacting to key presses.
    fn delay(&mut self, duration: Duration) -> Result<(), Self::Error> {
        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.events.next_event(remaining)? {
                Some(event) => self.handle_event(event)?,
                None => return Ok(()),
            }
            if remaining.is_zero() {
                return Ok(());
            }
        }
    }
}
