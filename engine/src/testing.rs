use std::{collections::VecDeque, time::Duration};

use crate::{
    board::{Bitmap, Board, Glyph},
    input::Calibration,
};

/// a board that records every call and replays scripted input readings.
#[derive(Default)]
pub(crate) struct ScriptedBoard {
    pub calls: Vec<Call>,
    /// readings returned by `read_analog`, in order. the stick rests at neutral once drained.
    pub analog: VecDeque<i32>,
    /// levels returned by `read_digital`, in order. reading past the end fails with [`ScriptEnded`].
    pub digital: VecDeque<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    ClearScreen,
    ShowBuffer,
    Contrast(u8),
    Line { x0: i32, y0: i32, x1: i32, y1: i32 },
    /// `lit` is false for blank (erasing) bitmaps.
    Bitmap { x: i32, y: i32, lit: bool },
    Glyph { page: u8, column: i32, glyph: Glyph },
    Text { page: u8, text: String },
    LargeText { page: u8, text: String },
    Analog(u8),
    Digital(u8),
    Delay(Duration),
}

#[derive(Debug, PartialEq)]
pub(crate) struct ScriptEnded;

impl ScriptedBoard {
    pub fn with_digital(levels: &[bool]) -> Self {
        Self {
            digital: levels.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn flushes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == Call::ShowBuffer)
            .count()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Delay(duration) => Some(*duration),
                _ => None,
            })
            .collect()
    }
}

impl Board for ScriptedBoard {
    type Error = ScriptEnded;

    fn clear_screen(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::ClearScreen);
        Ok(())
    }

    fn show_buffer(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::ShowBuffer);
        Ok(())
    }

    fn contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        self.calls.push(Call::Contrast(level));
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Self::Error> {
        self.calls.push(Call::Line { x0, y0, x1, y1 });
        Ok(())
    }

    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap) -> Result<(), Self::Error> {
        let lit = bitmap.data.iter().any(|byte| *byte != 0);
        self.calls.push(Call::Bitmap { x, y, lit });
        Ok(())
    }

    fn draw_glyph_image(
        &mut self,
        page: u8,
        column: i32,
        glyph: &Glyph,
    ) -> Result<(), Self::Error> {
        self.calls.push(Call::Glyph {
            page,
            column,
            glyph: *glyph,
        });
        Ok(())
    }

    fn draw_text(&mut self, page: u8, text: &str) -> Result<(), Self::Error> {
        self.calls.push(Call::Text {
            page,
            text: text.to_owned(),
        });
        Ok(())
    }

    fn draw_text_large(&mut self, page: u8, text: &str) -> Result<(), Self::Error> {
        self.calls.push(Call::LargeText {
            page,
            text: text.to_owned(),
        });
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> Result<i32, Self::Error> {
        self.calls.push(Call::Analog(channel));
        Ok(self
            .analog
            .pop_front()
            .unwrap_or(Calibration::default().neutral))
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, Self::Error> {
        self.calls.push(Call::Digital(pin));
        self.digital.pop_front().ok_or(ScriptEnded)
    }

    fn delay(&mut self, duration: Duration) -> Result<(), Self::Error> {
        self.calls.push(Call::Delay(duration));
        Ok(())
    }
}
