/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `flakegen` can produce.
///
/// Configuration variants are only returned while building a generator, so a
/// half-valid generator is never handed out. Clock rollback and sequence
/// exhaustion are not errors: the generator waits them out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configured machine ID does not fit the 10-bit machine field.
    #[error("machine id {machine_id} is out of range (expected 0..=1023)")]
    InvalidMachineId { machine_id: i64 },

    /// The start time could not be parsed as a `YYYY-MM-DD` date.
    #[error("start time {input:?} is not a valid YYYY-MM-DD date: {source}")]
    InvalidStartTime {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The start time parsed, but midnight of that date does not exist in
    /// Asia/Shanghai.
    #[error("start time {input:?} has no midnight in Asia/Shanghai")]
    NonexistentStartTime { input: String },

    /// The resolved epoch lies after the current wall-clock time.
    #[error("start time ({epoch_millis} ms) is later than the current time ({now_millis} ms)")]
    StartTimeInFuture { epoch_millis: i64, now_millis: i64 },

    /// An ID was requested from an [`IdIssuer`] that has no generator yet.
    ///
    /// [`IdIssuer`]: crate::IdIssuer
    #[error("id generator has not been initialized")]
    NotInitialized,

    /// [`IdIssuer::initialize`] was called on an already initialized issuer.
    ///
    /// [`IdIssuer::initialize`]: crate::IdIssuer::initialize
    #[error("id generator is already initialized")]
    AlreadyInitialized,
}
