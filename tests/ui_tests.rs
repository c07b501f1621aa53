//! User Interface Tests
//!
//! Tests for frequency formatting, the OLED frame buffer and I2C flush, and
//! the matrix keypad scanner.
//! Run with: cargo test --test ui_tests

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use fm_tuner::config::BANNER;
use fm_tuner::drivers::display::{
    render_line, FrameBuffer, Line, Oled, FLUSH_CHUNK, FLUSH_PREAMBLE, INIT_SEQUENCE,
};
use fm_tuner::drivers::keypad::MatrixKeypad;
use fm_tuner::types::{Digit, Key, PresetSlot};
use fm_tuner::ui::{format_frequency, DisplaySink, KeySource};

// =============================================================================
// Formatter Tests
// =============================================================================

#[test]
fn format_truncates_hundredths() {
    assert_eq!(format_frequency(103.249).as_str(), "103.24 MHz");
}

#[test]
fn format_tuned_100_mhz() {
    assert_eq!(format_frequency(99.995_928).as_str(), "99.99 MHz");
}

#[test]
fn format_pads_single_digit_hundredths() {
    assert_eq!(format_frequency(88.05).as_str(), "88.05 MHz");
    assert_eq!(format_frequency(97.0).as_str(), "97.00 MHz");
}

#[test]
fn format_negative() {
    assert_eq!(format_frequency(-0.225).as_str(), "-0.22 MHz");
}

// =============================================================================
// Frame Buffer Tests
// =============================================================================

fn lit_in(buffer: &FrameBuffer, line: Line) -> usize {
    let area = line.area();
    let mut count = 0;
    for y in area.top_left.y..area.top_left.y + area.size.height as i32 {
        for x in area.top_left.x..area.top_left.x + area.size.width as i32 {
            if buffer.pixel(x as u32, y as u32) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn frame_buffer_pixel_layout() {
    let mut buffer = FrameBuffer::new();
    buffer.set_pixel(3, 9, true);
    // Page 1, column 3, bit 1
    assert_eq!(buffer.as_bytes()[128 + 3], 0x02);
    assert!(buffer.pixel(3, 9));

    buffer.set_pixel(3, 9, false);
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn frame_buffer_ignores_out_of_bounds() {
    let mut buffer = FrameBuffer::new();
    buffer.set_pixel(128, 0, true);
    buffer.set_pixel(0, 64, true);
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn lines_render_independently() {
    let mut buffer = FrameBuffer::new();
    render_line(&mut buffer, Line::Banner, BANNER);
    assert!(lit_in(&buffer, Line::Banner) > 0);
    assert_eq!(lit_in(&buffer, Line::Frequency), 0);

    render_line(&mut buffer, Line::Frequency, "103.24 MHz");
    let banner = lit_in(&buffer, Line::Banner);
    assert!(lit_in(&buffer, Line::Frequency) > 0);

    // Rewriting the frequency leaves the banner alone
    render_line(&mut buffer, Line::Frequency, "88.59 MHz");
    assert_eq!(lit_in(&buffer, Line::Banner), banner);
}

#[test]
fn rendering_empty_text_clears_line() {
    let mut buffer = FrameBuffer::new();
    render_line(&mut buffer, Line::Frequency, "99.99 MHz");
    render_line(&mut buffer, Line::Frequency, "");
    assert_eq!(lit_in(&buffer, Line::Frequency), 0);
}

// =============================================================================
// OLED Bus Tests
// =============================================================================

fn command(cmd: u8) -> I2cTransaction {
    I2cTransaction::write(0x3C, vec![0x00, cmd])
}

fn flush_transactions(buffer: &FrameBuffer) -> Vec<I2cTransaction> {
    let mut t: Vec<_> = FLUSH_PREAMBLE.iter().map(|&c| command(c)).collect();
    for chunk in buffer.as_bytes().chunks(FLUSH_CHUNK) {
        let mut data = vec![0x40];
        data.extend_from_slice(chunk);
        t.push(I2cTransaction::write(0x3C, data));
    }
    t
}

#[test]
fn oled_init_sends_sequence_then_blank_frame() {
    let mut expectations: Vec<_> = INIT_SEQUENCE.iter().map(|&c| command(c)).collect();
    expectations.extend(flush_transactions(&FrameBuffer::new()));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = Oled::new(i2c.clone());
    oled.init().unwrap();

    i2c.done();
}

#[test]
fn oled_show_frequency_flushes_rendered_frame() {
    let mut expected = FrameBuffer::new();
    render_line(&mut expected, Line::Frequency, "103.24 MHz");

    let mut i2c = I2cMock::new(&flush_transactions(&expected));
    let mut oled = Oled::new(i2c.clone());
    oled.show_frequency("103.24 MHz");
    assert_eq!(oled.buffer().as_bytes(), expected.as_bytes());

    i2c.done();
}

// =============================================================================
// Keypad Tests
// =============================================================================

/// Row that marks itself active while driven low
struct FakeRow {
    index: usize,
    active: Rc<Cell<Option<usize>>>,
}

impl ErrorType for FakeRow {
    type Error = Infallible;
}

impl OutputPin for FakeRow {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.active.set(Some(self.index));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if self.active.get() == Some(self.index) {
            self.active.set(None);
        }
        Ok(())
    }
}

/// Column that reads low when its key in the active row is held
struct FakeCol {
    index: usize,
    active: Rc<Cell<Option<usize>>>,
    held: Rc<Cell<Option<(usize, usize)>>>,
}

impl ErrorType for FakeCol {
    type Error = Infallible;
}

impl InputPin for FakeCol {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(match (self.active.get(), self.held.get()) {
            (Some(row), Some((r, c))) => row == r && c == self.index,
            _ => false,
        })
    }
}

fn keypad() -> (MatrixKeypad<FakeRow, FakeCol>, Rc<Cell<Option<(usize, usize)>>>) {
    let active = Rc::new(Cell::new(None));
    let held = Rc::new(Cell::new(None));
    let rows = core::array::from_fn(|index| FakeRow {
        index,
        active: active.clone(),
    });
    let cols = core::array::from_fn(|index| FakeCol {
        index,
        active: active.clone(),
        held: held.clone(),
    });
    (MatrixKeypad::new(rows, cols), held)
}

#[test]
fn keypad_reports_nothing_when_idle() {
    let (mut keypad, _held) = keypad();
    assert_eq!(keypad.poll_key(), None);
}

#[test]
fn keypad_maps_layout() {
    let (mut keypad, held) = keypad();

    held.set(Some((1, 3)));
    assert_eq!(keypad.scan(), Some(Key::Preset(PresetSlot::B)));

    held.set(Some((3, 0)));
    assert_eq!(keypad.scan(), Some(Key::Seek));

    held.set(Some((3, 2)));
    assert_eq!(keypad.scan(), Some(Key::Enter));

    held.set(Some((3, 1)));
    assert_eq!(keypad.scan(), Some(Key::Digit(Digit::new(0).unwrap())));

    held.set(Some((2, 2)));
    assert_eq!(keypad.scan(), Some(Key::Digit(Digit::new(9).unwrap())));
}

#[test]
fn keypad_reports_each_press_once() {
    let (mut keypad, held) = keypad();

    held.set(Some((0, 0)));
    assert_eq!(keypad.poll_key(), Some(Key::Digit(Digit::new(1).unwrap())));
    assert_eq!(keypad.poll_key(), None);

    held.set(None);
    assert_eq!(keypad.poll_key(), None);

    held.set(Some((0, 0)));
    assert_eq!(keypad.poll_key(), Some(Key::Digit(Digit::new(1).unwrap())));
}

#[test]
fn keypad_leaves_rows_idle_after_scan() {
    let active = Rc::new(Cell::new(None));
    let held = Rc::new(Cell::new(Some((2, 1))));
    let rows = core::array::from_fn(|index| FakeRow {
        index,
        active: active.clone(),
    });
    let cols = core::array::from_fn(|index| FakeCol {
        index,
        active: active.clone(),
        held: held.clone(),
    });
    let mut keypad = MatrixKeypad::new(rows, cols);

    assert_eq!(keypad.scan(), Some(Key::Digit(Digit::new(8).unwrap())));
    assert_eq!(active.get(), None);
}
