//! Recording / playback state machine.
//!
//! [`RecordingController::step`] is called once per control-loop tick with the
//! input gathered during that tick and the current time. It owns the three
//! channel buffers, the playback buffer, the codec and the renderer; the
//! [`Session`] is owned by the caller and passed in by `&mut`.
//!
//! # Step Order
//!
//! 1. Apply input events (channel-select, interval-adjust, mode-advance)
//! 2. Repaint the full frame if the session asks for it
//! 3. Do the current mode's work (live sample, countdown, record)
//! 4. Repaint again if that work fell back to Live
//!
//! # Storage I/O
//!
//! Storage is touched only on a due record (encode) and on entering Playback
//! (decode). Any failure that survives the codec's retries sends the logger
//! back to Live with the `I/O ERR` indicator showing.

use core::fmt::{self, Write};

use heapless::String;

use crate::buffer::SampleBuffer;
use crate::canvas::Canvas;
use crate::channel::Channel;
use crate::codec::PersistenceCodec;
use crate::config::ControllerConfig;
use crate::error::IoError;
use crate::graph::{GraphRenderer, READOUT_CAPACITY};
use crate::input::InputEvents;
use crate::session::{Mode, Session};
use crate::sensors::SensorBank;
use crate::storage::Storage;

/// What a controller step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Nothing beyond input handling and readout updates.
    Idle,
    /// A live sample was taken.
    Sampled(u16),
    /// A sample was taken and the buffer persisted.
    Recorded(u16),
    /// The stored buffer was read back for playback.
    PlaybackLoaded,
    /// Storage failed; the session fell back to Live.
    Fault(IoError),
}

/// Header text for the current mode.
type Readout = String<READOUT_CAPACITY>;

/// State machine tying sampling, recording and playback together.
pub struct RecordingController {
    buffers: [SampleBuffer; Channel::COUNT],
    playback: SampleBuffer,
    codec: PersistenceCodec,
    renderer: GraphRenderer,
    config: ControllerConfig,
    last_live_sample_ms: Option<u64>,
}

impl RecordingController {
    /// Create a controller with zero-filled buffers.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            buffers: core::array::from_fn(|_| SampleBuffer::new()),
            playback: SampleBuffer::new(),
            codec: PersistenceCodec::new(config.storage_attempts),
            renderer: GraphRenderer::new(config.plot),
            config,
            last_live_sample_ms: None,
        }
    }

    /// Live/record buffer of `channel`.
    #[inline]
    pub fn buffer(
        &self,
        channel: Channel,
    ) -> &SampleBuffer {
        &self.buffers[channel.index()]
    }

    /// Buffer most recently read back for playback.
    #[inline]
    pub const fn playback(&self) -> &SampleBuffer { &self.playback }

    /// Timing and geometry this controller was built with.
    #[inline]
    pub const fn config(&self) -> &ControllerConfig { &self.config }

    /// Run one tick.
    pub fn step<B, S, C>(
        &mut self,
        session: &mut Session,
        events: InputEvents,
        now_ms: u64,
        sensors: &mut B,
        storage: &mut S,
        canvas: &mut C,
    ) -> Tick
    where
        B: SensorBank,
        S: Storage,
        C: Canvas,
    {
        let mut tick = self.handle_events(session, events, now_ms, storage);
        self.repaint_if_pending(session, canvas);

        if tick == Tick::Idle {
            tick = match session.mode() {
                Mode::Live => self.live_tick(session, now_ms, sensors, canvas),
                Mode::ConfigureInterval => {
                    self.renderer.draw_readout(canvas, &readout(session, 0));
                    Tick::Idle
                }
                Mode::Recording => self.recording_tick(session, now_ms, sensors, storage, canvas),
                Mode::Playback => Tick::Idle,
            };
        }

        self.repaint_if_pending(session, canvas);
        tick
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn handle_events<S: Storage>(
        &mut self,
        session: &mut Session,
        events: InputEvents,
        now_ms: u64,
        storage: &mut S,
    ) -> Tick {
        if events.is_empty() {
            return Tick::Idle;
        }

        if let Some(channel) = events.channel_select {
            if !session.mode().allows_channel_select() {
                log_debug!("Channel select ignored in {}", session.mode());
            } else if session.select_channel(channel) {
                self.renderer.invalidate();
                log_info!("Channel: {}", channel);
            }
        }

        if events.interval_delta != 0 && session.mode() == Mode::ConfigureInterval {
            let seconds = session.adjust_interval(events.interval_delta);
            log_info!("Record interval: {} s", seconds);
        }

        if !events.mode_advance {
            return Tick::Idle;
        }

        let mode = session.advance_mode();
        self.renderer.invalidate();
        log_info!("Mode: {}", mode);

        match mode {
            Mode::Live => {
                self.last_live_sample_ms = None;
                Tick::Idle
            }
            Mode::ConfigureInterval => Tick::Idle,
            Mode::Recording => {
                session.restart_record_clock(now_ms);
                Tick::Idle
            }
            Mode::Playback => self.load_playback(session, storage),
        }
    }

    fn load_playback<S: Storage>(
        &mut self,
        session: &mut Session,
        storage: &mut S,
    ) -> Tick {
        let channel = session.active_channel();
        match self.codec.decode(storage, channel.base_offset()) {
            Ok(buffer) => {
                self.playback = buffer;
                log_info!("Loaded {} samples of {}", self.playback.len(), channel);
                Tick::PlaybackLoaded
            }
            Err(e) => self.fail(session, e),
        }
    }

    fn fail(
        &mut self,
        session: &mut Session,
        error: IoError,
    ) -> Tick {
        log_error!("Storage failure: {}", error);
        session.fall_back_to_live(error);
        self.last_live_sample_ms = None;
        Tick::Fault(error)
    }

    // =========================================================================
    // Mode Work
    // =========================================================================

    fn live_tick<B, C>(
        &mut self,
        session: &Session,
        now_ms: u64,
        sensors: &mut B,
        canvas: &mut C,
    ) -> Tick
    where
        B: SensorBank,
        C: Canvas,
    {
        if let Some(last) = self.last_live_sample_ms
            && now_ms.saturating_sub(last) < self.config.live_sample_period_ms
        {
            return Tick::Idle;
        }
        self.last_live_sample_ms = Some(now_ms);

        let channel = session.active_channel();
        let value = sensors.read_channel(channel);
        let buffer = &mut self.buffers[channel.index()];
        buffer.push(value);

        self.renderer.render(canvas, buffer, channel.display_range());
        self.renderer.draw_readout(canvas, &readout(session, value));
        Tick::Sampled(value)
    }

    fn recording_tick<B, S, C>(
        &mut self,
        session: &mut Session,
        now_ms: u64,
        sensors: &mut B,
        storage: &mut S,
        canvas: &mut C,
    ) -> Tick
    where
        B: SensorBank,
        S: Storage,
        C: Canvas,
    {
        session.update_elapsed(now_ms);
        if !session.record_due() {
            self.renderer.draw_readout(canvas, &readout(session, 0));
            return Tick::Idle;
        }

        let channel = session.active_channel();
        let value = sensors.read_channel(channel);
        self.buffers[channel.index()].push(value);

        if let Err(e) = self.codec.encode(storage, &self.buffers[channel.index()], channel.base_offset()) {
            return self.fail(session, e);
        }
        session.restart_record_clock(now_ms);
        log_info!("Recorded {} = {}", channel, value);

        self.renderer.render(canvas, &self.buffers[channel.index()], channel.display_range());
        self.renderer.draw_readout(canvas, &readout(session, value));
        Tick::Recorded(value)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    fn repaint_if_pending<C: Canvas>(
        &mut self,
        session: &mut Session,
        canvas: &mut C,
    ) {
        if !session.take_redraw() {
            return;
        }

        let channel = session.active_channel();
        let shown = match session.mode() {
            Mode::Playback => &self.playback,
            _ => &self.buffers[channel.index()],
        };

        self.renderer.draw_outline(canvas, channel.outline_delimiters());
        self.renderer.render(canvas, shown, channel.display_range());
        self.renderer.draw_readout(canvas, &readout(session, shown.newest()));
        if session.storage_fault().is_some() {
            self.renderer.draw_fault_indicator(canvas);
        }
    }
}

impl Default for RecordingController {
    fn default() -> Self { Self::new(ControllerConfig::default()) }
}

// =============================================================================
// Readout Text
// =============================================================================

/// Header text for the session's mode. `newest` is the sample shown in Live
/// and Playback.
fn readout(
    session: &Session,
    newest: u16,
) -> Readout {
    let channel = session.active_channel();
    let mut text = Readout::new();
    let written = match session.mode() {
        Mode::Live => write!(text, "{}: ", channel.label()).and_then(|()| write_reading(&mut text, channel, newest)),
        Mode::ConfigureInterval => write!(text, "Interval: {} s", session.record_interval_seconds()),
        Mode::Recording => write!(text, "Rec {}: {} s", channel.short_label(), session.seconds_until_record()),
        Mode::Playback => {
            write!(text, "Play {}: ", channel.short_label()).and_then(|()| write_reading(&mut text, channel, newest))
        }
    };
    debug_assert!(written.is_ok(), "readout overflows {} bytes", READOUT_CAPACITY);
    text
}

/// Sample in its display unit (temperature is stored in tenths of a degree).
fn write_reading<W: Write>(
    out: &mut W,
    channel: Channel,
    value: u16,
) -> fmt::Result {
    match channel {
        Channel::Temperature => write!(out, "{}.{}C", value / 10, value % 10),
        Channel::Light | Channel::Potentiometer => write!(out, "{value}"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
