use crate::SnowflakeId;

/// Represents the result of a single, non-blocking generation attempt.
///
/// This type models the outcome of [`SnowflakeGenerator::poll_id`]:
///
/// - [`Poll::Ready`] indicates a new ID was successfully generated.
/// - [`Poll::Pending`] means no ID can be issued until the clock advances by
///   `yield_for` milliseconds, either because the sequence for the current
///   millisecond is exhausted or because the clock moved backwards.
///
/// A `Pending` attempt leaves the generator's state untouched.
///
/// [`SnowflakeGenerator::poll_id`]: crate::SnowflakeGenerator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// No ID could be generated yet.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: i64,
    },
}
