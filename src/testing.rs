//! Test doubles shared by the unit tests.

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Point, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};

use crate::canvas::{Canvas, Ink};
use crate::channel::Channel;
use crate::error::IoError;
use crate::sensors::SensorBank;
use crate::storage::{EEPROM_ADDRESS, MemoryStorage, Storage};

// =============================================================================
// Canvas
// =============================================================================

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Clear,
    Line(Point, Point),
    Point(Point),
    Fill(Point, Point, Ink),
    Text(Point, String, Ink),
}

/// Canvas that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingCanvas {
    ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new() -> Self { Self::default() }

    pub fn ops(&self) -> &[Op] { &self.ops }

    pub fn reset(&mut self) { self.ops.clear(); }

    pub fn clears(&self) -> usize { self.ops.iter().filter(|op| **op == Op::Clear).count() }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Line(from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn points(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Point(at) => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(_, text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) { self.ops.push(Op::Clear); }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
    ) {
        self.ops.push(Op::Line(from, to));
    }

    fn draw_point(
        &mut self,
        at: Point,
    ) {
        self.ops.push(Op::Point(at));
    }

    fn fill_rect(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        ink: Ink,
    ) {
        self.ops.push(Op::Fill(top_left, bottom_right, ink));
    }

    fn draw_text(
        &mut self,
        at: Point,
        text: &str,
        ink: Ink,
    ) {
        self.ops.push(Op::Text(at, text.into(), ink));
    }
}

/// In-memory Rgb565 draw target.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
        }
    }

    pub fn pixels(&self) -> &[Rgb565] { &self.pixels }

    pub fn pixel(
        &self,
        x: u32,
        y: u32,
    ) -> Rgb565 {
        self.pixels[(y * self.width + x) as usize]
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && (point.x as u32) < self.width && (point.y as u32) < self.height {
                let index = (point.y as u32 * self.width + point.x as u32) as usize;
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Sensors
// =============================================================================

/// Sensor bank returning a settable value per channel.
#[derive(Default)]
pub struct ScriptedSensors {
    values: [u16; Channel::COUNT],
    reads: Vec<Channel>,
}

impl ScriptedSensors {
    pub fn new() -> Self { Self::default() }

    pub fn set(
        &mut self,
        channel: Channel,
        value: u16,
    ) {
        self.values[channel.index()] = value;
    }

    pub fn reads(&self) -> &[Channel] { &self.reads }
}

impl SensorBank for ScriptedSensors {
    fn read_channel(
        &mut self,
        channel: Channel,
    ) -> u16 {
        self.reads.push(channel);
        self.values[channel.index()]
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Memory store that logs every write transaction.
#[derive(Default)]
pub struct LoggingStorage<const N: usize> {
    inner: MemoryStorage<N>,
    writes: Vec<(u16, Vec<u8>)>,
    reads: usize,
}

impl<const N: usize> LoggingStorage<N> {
    pub fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            writes: Vec::new(),
            reads: 0,
        }
    }

    pub fn writes(&self) -> &[(u16, Vec<u8>)] { &self.writes }

    pub fn reads(&self) -> usize { self.reads }
}

impl<const N: usize> Storage for LoggingStorage<N> {
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError> {
        self.writes.push((offset, bytes.to_vec()));
        self.inner.write(offset, bytes)
    }

    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError> {
        self.reads += 1;
        self.inner.read(offset, buf)
    }
}

/// Memory store with injectable faults at specific offsets.
#[derive(Default)]
pub struct FaultyStorage<const N: usize> {
    inner: MemoryStorage<N>,
    short_write: Option<(u16, usize)>,
    write_faults: Vec<(u16, usize)>,
    read_faults: Vec<(u16, usize)>,
    write_attempts: usize,
}

impl<const N: usize> FaultyStorage<N> {
    pub fn new() -> Self {
        Self {
            inner: MemoryStorage::new(),
            short_write: None,
            write_faults: Vec::new(),
            read_faults: Vec::new(),
            write_attempts: 0,
        }
    }

    /// Every write at `offset` reports `reported` bytes and stores nothing.
    pub fn short_write_at(
        &mut self,
        offset: u16,
        reported: usize,
    ) {
        self.short_write = Some((offset, reported));
    }

    /// The next `times` writes at `offset` fail with a bus error.
    pub fn bus_error_at(
        &mut self,
        offset: u16,
        times: usize,
    ) {
        self.write_faults.push((offset, times));
    }

    /// The next `times` reads at `offset` fail with a bus error.
    pub fn read_error_at(
        &mut self,
        offset: u16,
        times: usize,
    ) {
        self.read_faults.push((offset, times));
    }

    /// Every write call so far, including failed ones.
    pub fn write_attempts(&self) -> usize { self.write_attempts }

    pub fn inner(&self) -> &MemoryStorage<N> { &self.inner }

    pub fn inner_mut(&mut self) -> &mut MemoryStorage<N> { &mut self.inner }

    fn take_fault(
        faults: &mut [(u16, usize)],
        offset: u16,
    ) -> bool {
        for (at, remaining) in faults.iter_mut() {
            if *at == offset && *remaining > 0 {
                *remaining -= 1;
                return true;
            }
        }
        false
    }
}

impl<const N: usize> Storage for FaultyStorage<N> {
    fn write(
        &mut self,
        offset: u16,
        bytes: &[u8],
    ) -> Result<usize, IoError> {
        self.write_attempts += 1;
        if let Some((at, reported)) = self.short_write
            && at == offset
        {
            return Ok(reported);
        }
        if Self::take_fault(&mut self.write_faults, offset) {
            return Err(IoError::Bus { offset });
        }
        self.inner.write(offset, bytes)
    }

    fn read(
        &mut self,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, IoError> {
        if Self::take_fault(&mut self.read_faults, offset) {
            return Err(IoError::Bus { offset });
        }
        self.inner.read(offset, buf)
    }
}

// =============================================================================
// I2C EEPROM Model
// =============================================================================

/// Bytes of memory the fake EEPROM models.
const FAKE_EEPROM_SIZE: usize = 1024;

/// Behavioral model of a 24xx EEPROM on an I2C bus.
///
/// Answers only at [`EEPROM_ADDRESS`]. Writes wrap within their page like the
/// real part; reads stream sequentially.
pub struct FakeEepromBus {
    memory: Vec<u8>,
    page_size: usize,
    pointer: usize,
    page_writes: usize,
    fail_next: usize,
}

impl FakeEepromBus {
    pub fn new(page_size: usize) -> Self {
        Self {
            memory: vec![0xFF; FAKE_EEPROM_SIZE],
            page_size,
            pointer: 0,
            page_writes: 0,
            fail_next: 0,
        }
    }

    pub fn memory(&self) -> &[u8] { &self.memory }

    pub fn page_writes(&self) -> usize { self.page_writes }

    /// Fail the next `n` transactions with a bus error.
    pub fn fail_next(
        &mut self,
        n: usize,
    ) {
        self.fail_next = n;
    }
}

impl ErrorType for FakeEepromBus {
    type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for FakeEepromBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != EEPROM_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(ErrorKind::Other);
        }

        let mut addressed = false;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let data = if addressed {
                        &bytes[..]
                    } else {
                        if bytes.len() < 2 {
                            return Err(ErrorKind::Other);
                        }
                        self.pointer = usize::from(u16::from_be_bytes([bytes[0], bytes[1]])) % FAKE_EEPROM_SIZE;
                        addressed = true;
                        &bytes[2..]
                    };
                    if data.is_empty() {
                        continue;
                    }
                    let page_base = self.pointer - self.pointer % self.page_size;
                    let start = self.pointer % self.page_size;
                    for (k, byte) in data.iter().enumerate() {
                        self.memory[page_base + (start + k) % self.page_size] = *byte;
                    }
                    self.pointer = page_base + (start + data.len()) % self.page_size;
                    self.page_writes += 1;
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.memory[self.pointer];
                        self.pointer = (self.pointer + 1) % FAKE_EEPROM_SIZE;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and adds up the requested time.
#[derive(Default)]
pub struct NoDelay {
    total_ns: u64,
}

impl NoDelay {
    pub fn total_ms(&self) -> u32 { (self.total_ns / 1_000_000) as u32 }
}

impl DelayNs for NoDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}
