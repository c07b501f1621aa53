//! OLED Display Driver
//!
//! Two-line text display for the tuner: banner on top, frequency below.
//! Uses the SSD1306 controller with I2C interface.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use crate::hal::i2c::I2cAddress;
use crate::ui::DisplaySink;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// SSD1306 commands
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up command sequence for a 128x64 panel
pub const INIT_SEQUENCE: [u8; 25] = [
    cmd::DISPLAY_OFF,
    cmd::SET_DISPLAY_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MULTIPLEX,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::MEMORY_MODE,
    0x00, // Horizontal addressing
    cmd::SEG_REMAP | 0x01,
    cmd::COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_ALL_ON_RESUME,
    cmd::NORMAL_DISPLAY,
    cmd::DISPLAY_ON,
];

/// Window-setting commands sent before every flush
pub const FLUSH_PREAMBLE: [u8; 6] = [cmd::COLUMN_ADDR, 0, 127, cmd::PAGE_ADDR, 0, 7];

/// Data bytes per I2C transfer when flushing
pub const FLUSH_CHUNK: usize = 32;

/// Frame buffer (1 bit per pixel, SSD1306 page layout)
pub struct FrameBuffer {
    /// Pixel data (128x64 / 8 = 1024 bytes)
    buffer: [u8; 1024],
}

impl FrameBuffer {
    /// Create a new empty frame buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: [0; 1024] }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set a pixel
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return;
        }

        let byte_idx = (y / 8 * DISPLAY_WIDTH + x) as usize;
        let bit = 1 << (y % 8);

        if on {
            self.buffer[byte_idx] |= bit;
        } else {
            self.buffer[byte_idx] &= !bit;
        }
    }

    /// Read a pixel (off outside the panel)
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        let byte_idx = (y / 8 * DISPLAY_WIDTH + x) as usize;
        self.buffer[byte_idx] & (1 << (y % 8)) != 0
    }

    /// Get the raw buffer
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 {
                self.set_pixel(coord.x as u32, coord.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

/// Text line on the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Small banner line at the top
    Banner,
    /// Large frequency line below it
    Frequency,
}

impl Line {
    const fn font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Banner => &FONT_6X10,
            Self::Frequency => &FONT_10X20,
        }
    }

    /// Area the line occupies
    #[must_use]
    pub const fn area(self) -> Rectangle {
        match self {
            Self::Banner => Rectangle::new(Point::new(0, 0), Size::new(DISPLAY_WIDTH, 12)),
            Self::Frequency => Rectangle::new(Point::new(0, 24), Size::new(DISPLAY_WIDTH, 22)),
        }
    }
}

/// Replace the contents of one line with `text`
pub fn render_line(buffer: &mut FrameBuffer, line: Line, text: &str) {
    let area = line.area();
    let _ = area
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(buffer);

    let style = MonoTextStyle::new(line.font(), BinaryColor::On);
    let origin = area.top_left + Point::new(1, 1);
    let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(buffer);
}

/// OLED display driver
pub struct Oled<I> {
    i2c: I,
    buffer: FrameBuffer,
}

impl<I: I2c> Oled<I> {
    /// Create a new display driver
    #[must_use]
    pub const fn new(i2c: I) -> Self {
        Self {
            i2c,
            buffer: FrameBuffer::new(),
        }
    }

    /// Initialize the display and blank it
    pub fn init(&mut self) -> Result<(), I::Error> {
        for &c in &INIT_SEQUENCE {
            self.send_command(c)?;
        }

        self.buffer.clear();
        self.flush()
    }

    /// Send a command to the display
    fn send_command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.i2c.write(I2cAddress::SSD1306.addr(), &[0x00, cmd])
    }

    /// Flush the buffer to the display
    pub fn flush(&mut self) -> Result<(), I::Error> {
        for &c in &FLUSH_PREAMBLE {
            self.send_command(c)?;
        }

        // Send data in chunks (I2C buffer limit)
        for chunk in self.buffer.buffer.chunks(FLUSH_CHUNK) {
            let mut buf = [0u8; FLUSH_CHUNK + 1];
            buf[0] = 0x40; // Data mode
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(I2cAddress::SSD1306.addr(), &buf[..=chunk.len()])?;
        }

        Ok(())
    }

    /// Frame buffer contents
    #[must_use]
    pub const fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.i2c
    }

    fn show(&mut self, line: Line, text: &str) {
        render_line(&mut self.buffer, line, text);
        if self.flush().is_err() {
            warn!("display flush failed ({})", line);
        }
    }
}

impl<I: I2c> DisplaySink for Oled<I> {
    fn show_banner(&mut self, text: &str) {
        self.show(Line::Banner, text);
    }

    fn show_frequency(&mut self, text: &str) {
        self.show(Line::Frequency, text);
    }
}
