use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use super::state::{Advance, GeneratorState};
use crate::{
    GeneratorConfig, GeneratorSettings, Poll, Result, SnowflakeId, SystemClock, TimeSource,
};

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// The last issued timestamp and sequence live behind a single
/// [`parking_lot::Mutex`]. Every call holds that lock for its entire duration,
/// including any wait for the clock, so IDs from one generator are strictly
/// increasing in the order callers acquire the lock.
///
/// Share it by reference or wrap it in an [`Arc`](std::sync::Arc); it is
/// never cloned, so there is exactly one state per generator. Several
/// generators with different machine IDs can live in the same process.
///
/// ## Waiting
///
/// [`Self::next_id`] blocks when
/// - the 4096 sequence values of the current millisecond are used up, until
///   the clock moves to the next millisecond, or
/// - the wall clock moved backwards, until it catches up with the last
///   issued timestamp.
///
/// Waits go through [`TimeSource::pause`] instead of spinning. Use
/// [`Self::poll_id`] to handle backoff yourself.
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    state: Mutex<GeneratorState>,
    settings: GeneratorSettings,
    clock: T,
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Validates `config` against the current time of `clock` and creates a
    /// generator that has not issued any IDs yet.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMachineId`] if the machine ID is outside `0..=1023`
    /// - [`Error::InvalidStartTime`] if the start time is not `YYYY-MM-DD`
    /// - [`Error::StartTimeInFuture`] if the epoch is later than now
    ///
    /// # Example
    ///
    /// ```
    /// use flakegen::{Error, GeneratorConfig, SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(&GeneratorConfig::new(512), SystemClock)?;
    /// assert_eq!(generator.next_id().machine_id(), 512);
    ///
    /// let err = SnowflakeGenerator::new(&GeneratorConfig::new(1024), SystemClock).err();
    /// assert_eq!(err, Some(Error::InvalidMachineId { machine_id: 1024 }));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// [`Error::InvalidMachineId`]: crate::Error::InvalidMachineId
    /// [`Error::InvalidStartTime`]: crate::Error::InvalidStartTime
    /// [`Error::StartTimeInFuture`]: crate::Error::StartTimeInFuture
    pub fn new(config: &GeneratorConfig, clock: T) -> Result<Self> {
        let settings = config.resolve(clock.current_millis())?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            machine_id = settings.machine_id(),
            epoch_millis = settings.epoch_millis(),
            "snowflake generator initialized"
        );

        Ok(Self::from_settings(settings, clock))
    }

    /// Creates a generator from already validated settings.
    pub fn from_settings(settings: GeneratorSettings, clock: T) -> Self {
        Self::from_components(settings, GeneratorState::UNSET, 0, clock)
    }

    /// Creates a generator whose last issued ID was at `last_timestamp` (ms
    /// since the Unix epoch) with `sequence`.
    ///
    /// This is primarily useful for resuming after a restart without reusing
    /// already issued IDs. In typical use cases, prefer [`Self::new`].
    pub fn from_components(
        settings: GeneratorSettings,
        last_timestamp: i64,
        sequence: i64,
        clock: T,
    ) -> Self {
        debug_assert!(
            (0..=SnowflakeId::MAX_SEQUENCE).contains(&sequence),
            "sequence overflow"
        );
        Self {
            state: Mutex::new(GeneratorState::from_components(last_timestamp, sequence)),
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> GeneratorSettings {
        self.settings
    }

    pub fn machine_id(&self) -> i64 {
        self.settings.machine_id()
    }

    /// The custom epoch, in milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.settings.epoch_millis()
    }

    /// Returns the next ID, waiting out sequence exhaustion and clock
    /// rollback.
    ///
    /// The lock is held across the waits: while one caller waits, every other
    /// caller of this generator waits behind it. There is no timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use flakegen::{GeneratorConfig, SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(&GeneratorConfig::new(1), SystemClock)?;
    /// let ids: Vec<_> = (0..10_000).map(|_| generator.next_id()).collect();
    /// assert!(ids.windows(2).all(|w| w[0] < w[1]));
    /// # Ok::<(), flakegen::Error>(())
    /// ```
    pub fn next_id(&self) -> SnowflakeId {
        let mut state = self.state.lock();
        loop {
            match self.poll_locked(&mut state) {
                Poll::Ready { id } => break id,
                Poll::Pending { yield_for } => self.clock.pause(yield_for),
            }
        }
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// Returns [`Poll::Pending`] with the number of milliseconds to back off
    /// if the current millisecond is exhausted or the clock is behind the
    /// last issued timestamp. A pending attempt does not change the state.
    ///
    /// # Example
    ///
    /// ```
    /// use flakegen::{GeneratorConfig, Poll, SnowflakeGenerator, SystemClock};
    ///
    /// let generator = SnowflakeGenerator::new(&GeneratorConfig::new(0), SystemClock)?;
    /// let id = loop {
    ///     match generator.poll_id() {
    ///         Poll::Ready { id } => break id,
    ///         Poll::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert_eq!(id.machine_id(), 0);
    /// # Ok::<(), flakegen::Error>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_id(&self) -> Poll {
        let mut state = self.state.lock();
        self.poll_locked(&mut state)
    }

    fn poll_locked(&self, state: &mut GeneratorState) -> Poll {
        let now = self.clock.current_millis();
        let epoch = self.settings.epoch_millis();
        if now < epoch {
            return Self::cold_before_epoch(now, epoch);
        }

        match state.advance(now) {
            Advance::Issued => Poll::Ready {
                id: SnowflakeId::from_components(
                    state.last_timestamp - epoch,
                    self.settings.machine_id(),
                    state.sequence,
                ),
            },
            Advance::Exhausted => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    timestamp = now,
                    "sequence exhausted, waiting for next millisecond"
                );
                Poll::Pending { yield_for: 1 }
            }
            Advance::Behind(yield_for) => Self::cold_clock_behind(now, yield_for),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(_now: i64, yield_for: i64) -> Poll {
        debug_assert!(yield_for > 0);
        #[cfg(feature = "tracing")]
        tracing::warn!(now = _now, behind_ms = yield_for, "clock moved backwards");
        Poll::Pending { yield_for }
    }

    #[cold]
    #[inline(never)]
    fn cold_before_epoch(now: i64, epoch: i64) -> Poll {
        #[cfg(feature = "tracing")]
        tracing::warn!(now, epoch, "clock is behind the configured epoch");
        Poll::Pending {
            yield_for: epoch - now,
        }
    }
}
