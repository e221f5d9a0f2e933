use std::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use engine::board::{Bitmap, Glyph};

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// off-screen copy of the panel's memory: 8 pages of 128 column bytes, bit 0 at the top.
#[derive(Clone, PartialEq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    pub fn blank(&mut self) {
        self.pages = [[0; WIDTH]; PAGES];
    }

    /// pixels outside the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1 << (y % 8);
        if on {
            self.pages[y / 8][x] |= mask;
        } else {
            self.pages[y / 8][x] &= !mask;
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    pub fn blit_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap) {
        for row in 0..bitmap.height {
            for column in 0..bitmap.width {
                self.set_pixel(
                    x + column as i32,
                    y + row as i32,
                    bitmap.pixel(column, row),
                );
            }
        }
    }

    pub fn blit_glyph(&mut self, page: u8, column: i32, glyph: &Glyph) {
        let page = usize::from(page);
        if page >= PAGES {
            return;
        }
        for (offset, bits) in glyph.iter().enumerate() {
            let x = column + offset as i32;
            if (0..WIDTH as i32).contains(&x) {
                self.pages[page][x as usize] = *bits;
            }
        }
    }

    /// true when pixel row `y` differs between the two buffers.
    pub fn row_differs(&self, other: &FrameBuffer, y: usize) -> bool {
        (0..WIDTH).any(|x| self.pixel(x, y) != other.pixel(x, y))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

/// unwraps the result of drawing onto a [`FrameBuffer`], which cannot fail.
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
