use std::time::Duration;

/// a 1-bit image stored row by row, most significant bit leftmost.
/// `width` must be a multiple of 8, each row taking `width / 8` bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bitmap<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub const fn new(width: u32, height: u32, data: &'a [u8]) -> Self {
        assert!(width % 8 == 0, "bitmap width must be a multiple of 8");
        assert!(
            data.len() == (width / 8 * height) as usize,
            "bitmap data does not match its dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    pub fn bytes_per_row(&self) -> usize {
        (self.width / 8) as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        let byte = self.data[y as usize * self.bytes_per_row() + (x / 8) as usize];
        byte & (0x80 >> (x % 8)) != 0
    }
}

/// an 8x8 glyph in display page layout: one byte per column, bit 0 at the top.
pub type Glyph = [u8; 8];

/// the display, joystick, button and clock the game runs on.
///
/// drawing calls only touch the display's off-screen buffer; nothing is visible until
/// [`Board::show_buffer`]. pages are 8 pixel rows tall, so page `n` starts at row `8 * n`.
pub trait Board {
    type Error;

    fn clear_screen(&mut self) -> Result<(), Self::Error>;

    /// pushes the off-screen buffer to the panel.
    fn show_buffer(&mut self) -> Result<(), Self::Error>;

    fn contrast(&mut self, level: u8) -> Result<(), Self::Error>;

    /// lit 1 pixel wide line, both end points included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), Self::Error>;

    /// copies the bitmap's bits over the area at `(x, y)`; unset bits clear pixels.
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &Bitmap) -> Result<(), Self::Error>;

    fn draw_glyph_image(&mut self, page: u8, column: i32, glyph: &Glyph)
        -> Result<(), Self::Error>;

    /// left aligned text on a single page.
    fn draw_text(&mut self, page: u8, text: &str) -> Result<(), Self::Error>;

    /// triple-height text starting at `page`.
    fn draw_text_large(&mut self, page: u8, text: &str) -> Result<(), Self::Error>;

    fn read_analog(&mut self, channel: u8) -> Result<i32, Self::Error>;

    /// electrical level of the pin: `true` is high.
    fn read_digital(&mut self, pin: u8) -> Result<bool, Self::Error>;

    fn delay(&mut self, duration: Duration) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::Bitmap;

    #[test]
    fn bitmap_pixels_are_msb_first() {
        const DATA: [u8; 4] = [0b1000_0001, 0b0000_0000, 0b0100_0000, 0b0000_0010];
        let bitmap = Bitmap::new(16, 2, &DATA);
        assert_eq!(bitmap.bytes_per_row(), 2);
        assert!(bitmap.pixel(0, 0));
        assert!(bitmap.pixel(7, 0));
        assert!(!bitmap.pixel(8, 0));
        assert!(bitmap.pixel(1, 1));
        assert!(bitmap.pixel(14, 1));
        assert!(!bitmap.pixel(15, 1));
    }

    #[test]
    #[should_panic]
    fn bitmap_rejects_short_data() {
        let _ = Bitmap::new(8, 2, &[0xff]);
    }
}
