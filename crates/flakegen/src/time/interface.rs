use core::time::Duration;

use chrono::Utc;

/// A trait for wall-clock time sources.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **milliseconds since the Unix epoch**;
/// the generator applies its own custom epoch on top.
///
/// # Example
///
/// ```
/// use flakegen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;

    /// Blocks the calling thread while the generator waits for the clock to
    /// advance by about `yield_for` milliseconds.
    ///
    /// The generator re-reads [`Self::current_millis`] after every pause, so
    /// returning early is always safe. The default yields for short waits and
    /// sleeps for longer ones (e.g. a clock stepped back by NTP), never
    /// sleeping past the target.
    fn pause(&self, yield_for: i64) {
        if yield_for > 1 {
            std::thread::sleep(Duration::from_millis((yield_for - 1).unsigned_abs()));
        } else {
            std::thread::yield_now();
        }
    }
}

/// The host's wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }

    fn pause(&self, yield_for: i64) {
        (**self).pause(yield_for);
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }

    fn pause(&self, yield_for: i64) {
        (**self).pause(yield_for);
    }
}
