//! TEA5767 Tuner Driver
//!
//! Owns the register image, the tuner state, the seek controller and the
//! keypad entry, and runs every command to completion over a [`ChipLink`].
//! The write image and the tuner state are only updated after the bus
//! exchange succeeded, so a failed command leaves everything as it was.

use core::fmt;

use embedded_hal::delay::DelayNs;

use super::codec::{frequency_to_pll, pll_to_frequency};
use super::entry::{EntryAction, FrequencyEntry};
use super::registers::{ReadRegisters, RegisterImage, WriteRegisters};
use super::seek::{SeekController, SeekReport, SeekState};
use super::status::TunerStatus;
use crate::config::{ChannelPresets, ReadPolicy, TunerConfig, BANNER};
use crate::hal::link::{ChipLink, TransportError};
use crate::types::{Key, Pll, SeekDirection, SettleWait};
use crate::ui::{format_frequency, DisplaySink, FrequencyText, KeySource};

/// Tuner operation result
pub type TunerResult<T> = Result<T, TunerError>;

/// Tuner command failure
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TunerError {
    /// Register exchange with the chip failed
    Transport(TransportError),
    /// Frequency rejected by [`RangePolicy::Strict`](crate::config::RangePolicy::Strict), in MHz
    OutOfRange(f32),
    /// `complete_seek` without a preceding `start_seek`
    NoSeekInProgress,
}

impl From<TransportError> for TunerError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl fmt::Display for TunerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::OutOfRange(mhz) => write!(f, "{mhz} MHz is outside the FM band"),
            Self::NoSeekInProgress => f.write_str("no seek in progress"),
        }
    }
}

/// What the driver last knew about the chip
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TunerState {
    /// Tuned frequency in MHz
    pub frequency: f32,
    /// Last PLL written or read
    pub pll: Pll,
    /// Ready flag from the last status read
    pub ready: bool,
    /// Band limit flag from the last status read
    pub band_limit: bool,
}

/// Result of one key press
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyResponse {
    /// Digit accepted into the pending entry
    Pending {
        /// Cursor after the digit
        cursor: u8,
        /// Accumulated value in MHz
        value: f32,
    },
    /// Digit past the hundredths position was dropped
    DigitIgnored,
    /// Tuned (preset or committed entry) to this quantized frequency
    Tuned(f32),
    /// Seek written; call [`Tuner::complete_seek`] after the wait
    SeekStarted(SettleWait),
    /// Seek run to completion
    SeekCompleted(SeekReport),
}

/// TEA5767 driver
pub struct Tuner<L, D> {
    link: L,
    display: D,
    config: TunerConfig,
    image: RegisterImage,
    state: TunerState,
    seek: SeekController,
    entry: FrequencyEntry,
}

impl<L: ChipLink, D: DisplaySink> Tuner<L, D> {
    /// Create a driver without touching the hardware
    #[must_use]
    pub fn new(link: L, display: D, config: TunerConfig) -> Self {
        Self {
            link,
            display,
            config,
            image: RegisterImage::new(),
            state: TunerState::default(),
            seek: SeekController::new(config.seek_settle_ms),
            entry: FrequencyEntry::new(config.digit_overflow),
        }
    }

    /// Give the collaborators back
    pub fn release(self) -> (L, D) {
        (self.link, self.display)
    }

    /// Power-on sequence: banner, default registers, initial frequency
    ///
    /// The returned wait must elapse before the first status read.
    pub fn init(&mut self, mhz: f32) -> TunerResult<SettleWait> {
        info!("tuner init at {} MHz", mhz);
        self.display.show_banner(BANNER);

        let pll = frequency_to_pll(mhz);
        self.push(WriteRegisters::power_on().with_pll(pll))?;
        self.seek.reset();
        self.state.pll = pll;
        self.state.frequency = pll_to_frequency(pll);
        self.refresh_display();

        Ok(SettleWait::from_millis(self.config.init_settle_ms))
    }

    /// Tune to `mhz` and return the frequency actually tuned
    ///
    /// No range check happens here; see [`handle_key`](Self::handle_key).
    pub fn set_frequency(&mut self, mhz: f32) -> TunerResult<f32> {
        let pll = frequency_to_pll(mhz);
        let image = self.image.write().with_search_mode(false).with_pll(pll);
        self.push(image)?;
        self.seek.reset();

        let frequency = pll_to_frequency(pll);
        self.state.pll = pll;
        self.state.frequency = frequency;
        debug!("tuned {} MHz ({})", frequency, pll);
        self.refresh_display();
        Ok(frequency)
    }

    /// Read and decode the chip status
    ///
    /// The tuner state follows the readback, frequency included.
    pub fn read_status(&mut self) -> TunerResult<TunerStatus> {
        let status = TunerStatus::decode(&self.fetch()?);
        self.state.ready = status.ready;
        self.state.band_limit = status.band_limit;
        self.state.pll = status.pll;
        self.state.frequency = status.frequency();
        Ok(status)
    }

    /// Read the ready flag
    pub fn ready_flag(&mut self) -> TunerResult<bool> {
        Ok(self.read_status()?.ready)
    }

    /// Read the band limit flag
    pub fn band_limit_flag(&mut self) -> TunerResult<bool> {
        Ok(self.read_status()?.band_limit)
    }

    /// Read the PLL word the chip is tuned to
    pub fn read_pll(&mut self) -> TunerResult<Pll> {
        Ok(self.read_status()?.pll)
    }

    /// Read the tuned frequency back from the chip and show it
    pub fn read_frequency(&mut self) -> TunerResult<f32> {
        self.read_status()?;
        self.refresh_display();
        Ok(self.state.frequency)
    }

    /// Start a seek; the returned wait must elapse before
    /// [`complete_seek`](Self::complete_seek)
    ///
    /// The chip is read back right after the search image went out. A failed
    /// readback keeps the cached frequency and the seek stays `Searching`.
    pub fn start_seek(&mut self, direction: SeekDirection) -> TunerResult<SettleWait> {
        let (image, wait) = self.seek.begin(self.image.write(), direction);
        self.push(image)?;
        self.seek.mark_searching(direction);
        debug!("seek {} started", direction);

        if let Err(e) = self.read_status() {
            warn!("seek start readback failed: {}", e);
        }
        self.refresh_display();
        Ok(wait)
    }

    /// Read back where the seek stopped
    ///
    /// Always lands in `SettledOrLimited`; the flags are reported as read.
    pub fn complete_seek(&mut self) -> TunerResult<SeekReport> {
        if self.seek.searching().is_none() {
            return Err(TunerError::NoSeekInProgress);
        }

        let status = self.read_status()?;
        let report = self
            .seek
            .settle(status)
            .ok_or(TunerError::NoSeekInProgress)?;
        info!(
            "seek stopped at {} MHz (rf={} blf={})",
            report.frequency, report.ready, report.band_limit
        );
        self.refresh_display();
        Ok(report)
    }

    /// Run a whole seek, blocking on `delay` for the settle wait
    pub fn seek<T: DelayNs>(
        &mut self,
        direction: SeekDirection,
        delay: &mut T,
    ) -> TunerResult<SeekReport> {
        let wait = self.start_seek(direction)?;
        delay.delay_ms(wait.as_millis());
        self.complete_seek()
    }

    /// Apply one key press
    ///
    /// Presets and committed entries go through the configured
    /// [`RangePolicy`](crate::config::RangePolicy). `*` only starts the seek.
    pub fn handle_key(&mut self, key: Key) -> TunerResult<KeyResponse> {
        trace!("key {}", key);
        match self.entry.press(key) {
            EntryAction::Digit { cursor, pending } => Ok(KeyResponse::Pending {
                cursor,
                value: pending,
            }),
            EntryAction::DigitIgnored => Ok(KeyResponse::DigitIgnored),
            EntryAction::Preset(slot) => self
                .tune_checked(self.config.presets.get(slot))
                .map(KeyResponse::Tuned),
            EntryAction::Seek => self
                .start_seek(self.config.seek_direction)
                .map(KeyResponse::SeekStarted),
            EntryAction::Commit(mhz) => self.tune_checked(mhz).map(KeyResponse::Tuned),
        }
    }

    /// Poll the keypad once and apply the key, finishing seeks on `delay`
    ///
    /// Returns `Ok(None)` when no key was pressed.
    pub fn poll_keypad<K: KeySource, T: DelayNs>(
        &mut self,
        keys: &mut K,
        delay: &mut T,
    ) -> TunerResult<Option<KeyResponse>> {
        let Some(key) = keys.poll_key() else {
            return Ok(None);
        };

        match self.handle_key(key)? {
            KeyResponse::SeekStarted(wait) => {
                delay.delay_ms(wait.as_millis());
                self.complete_seek()
                    .map(|report| Some(KeyResponse::SeekCompleted(report)))
            }
            response => Ok(Some(response)),
        }
    }

    /// Last known tuned frequency in MHz
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.state.frequency
    }

    /// Last known tuner state
    #[must_use]
    pub const fn state(&self) -> TunerState {
        self.state
    }

    /// Seek state
    #[must_use]
    pub const fn seek_state(&self) -> SeekState {
        self.seek.state()
    }

    /// Pending keypad entry
    #[must_use]
    pub const fn entry(&self) -> &FrequencyEntry {
        &self.entry
    }

    /// Channel presets
    #[must_use]
    pub const fn presets(&self) -> ChannelPresets {
        self.config.presets
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Both register images
    #[must_use]
    pub const fn registers(&self) -> RegisterImage {
        self.image
    }

    /// Text currently shown for the tuned frequency
    #[must_use]
    pub fn display_text(&self) -> FrequencyText {
        format_frequency(self.state.frequency)
    }

    fn tune_checked(&mut self, mhz: f32) -> TunerResult<f32> {
        if !self.config.range_policy.permits(mhz) {
            warn!("{} MHz rejected by range policy", mhz);
            return Err(TunerError::OutOfRange(mhz));
        }
        self.set_frequency(mhz)
    }

    fn push(&mut self, image: WriteRegisters) -> TunerResult<()> {
        if let Err(e) = self.link.write_image(&image.as_bytes()) {
            error!("register write failed: {}", e);
            return Err(e.into());
        }
        self.image.commit_write(image);
        Ok(())
    }

    fn fetch(&mut self) -> TunerResult<ReadRegisters> {
        let read = match self.link.read_image() {
            Ok(bytes) => ReadRegisters::from_bytes(bytes),
            Err(TransportError::ShortRead(partial))
                if self.config.read_policy == ReadPolicy::MergeStale && !partial.is_empty() =>
            {
                warn!("short read ({} bytes), keeping stale bytes", partial.len());
                self.image.read_snapshot().merge_partial(partial.received())
            }
            Err(e) => {
                error!("register read failed: {}", e);
                return Err(e.into());
            }
        };
        self.image.commit_read(read);
        Ok(read)
    }

    fn refresh_display(&mut self) {
        let text = format_frequency(self.state.frequency);
        self.display.show_frequency(&text);
    }
}
