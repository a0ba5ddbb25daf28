use std::sync::OnceLock;

use crate::{
    Error, GeneratorConfig, Result, SnowflakeGenerator, SnowflakeId, SystemClock, TimeSource,
};

/// A late-initialized handle to a [`SnowflakeGenerator`].
///
/// Components that need IDs can hold an `IdIssuer` (usually behind an
/// [`Arc`](std::sync::Arc)) before the generator's configuration is known.
/// [`Self::next_id`] fails with [`Error::NotInitialized`] until
/// [`Self::initialize`] succeeds.
///
/// Initialization happens at most once. Validation runs before anything is
/// published, so a failed `initialize` leaves the issuer empty and can be
/// retried. Once a generator is published, further calls are refused with
/// [`Error::AlreadyInitialized`] and the running generator keeps its state.
///
/// # Example
///
/// ```
/// use flakegen::{Error, GeneratorConfig, IdIssuer};
///
/// let issuer = IdIssuer::new();
/// assert_eq!(issuer.next_id(), Err(Error::NotInitialized));
///
/// issuer.initialize(&GeneratorConfig::new(42))?;
/// assert_eq!(issuer.next_id()?.machine_id(), 42);
/// # Ok::<(), Error>(())
/// ```
pub struct IdIssuer<T = SystemClock>
where
    T: TimeSource,
{
    clock: T,
    generator: OnceLock<SnowflakeGenerator<T>>,
}

impl IdIssuer<SystemClock> {
    /// Creates an empty issuer backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IdIssuer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IdIssuer<T>
where
    T: TimeSource + Clone,
{
    /// Creates an empty issuer whose generator will read time from `clock`.
    pub fn with_clock(clock: T) -> Self {
        Self {
            clock,
            generator: OnceLock::new(),
        }
    }

    /// Validates `config` and publishes a fresh generator.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyInitialized`] if a generator was published before
    /// - any configuration error from [`SnowflakeGenerator::new`]
    pub fn initialize(&self, config: &GeneratorConfig) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }

        let generator = SnowflakeGenerator::new(config, self.clock.clone())?;
        self.generator
            .set(generator)
            .map_err(|_| Error::AlreadyInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.generator.get().is_some()
    }

    /// The published generator, if any.
    pub fn generator(&self) -> Option<&SnowflakeGenerator<T>> {
        self.generator.get()
    }

    /// Returns the next ID from the published generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if [`Self::initialize`] has not
    /// succeeded yet. The call has no other effect and can be retried.
    pub fn next_id(&self) -> Result<SnowflakeId> {
        self.generator
            .get()
            .map(SnowflakeGenerator::next_id)
            .ok_or(Error::NotInitialized)
    }
}
