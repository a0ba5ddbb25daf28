use crate::{Error, Result, SnowflakeId, resolve_epoch};

/// User-facing configuration for a [`SnowflakeGenerator`].
///
/// `machine_id` must be unique among all concurrently running generators;
/// this crate has no way to check that and relies on external agreement.
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Machine ID encoded into every ID, in `0..=1023`.
    pub machine_id: i64,
    /// Custom epoch as a `YYYY-MM-DD` date in Asia/Shanghai time. Defaults to
    /// [`DEFAULT_EPOCH_MILLIS`] when absent.
    ///
    /// [`DEFAULT_EPOCH_MILLIS`]: crate::DEFAULT_EPOCH_MILLIS
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_time: Option<String>,
}

impl GeneratorConfig {
    pub fn new(machine_id: i64) -> Self {
        Self {
            machine_id,
            start_time: None,
        }
    }

    #[must_use]
    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Validates the configuration against the wall-clock time `now_millis`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMachineId`] if the machine ID is outside `0..=1023`
    /// - [`Error::InvalidStartTime`] if the start time does not parse
    /// - [`Error::StartTimeInFuture`] if the epoch is later than `now_millis`
    pub fn resolve(&self, now_millis: i64) -> Result<GeneratorSettings> {
        if !(0..=SnowflakeId::MAX_MACHINE_ID).contains(&self.machine_id) {
            return Err(Error::InvalidMachineId {
                machine_id: self.machine_id,
            });
        }

        let epoch_millis = resolve_epoch(self.start_time.as_deref())?;
        if epoch_millis > now_millis {
            return Err(Error::StartTimeInFuture {
                epoch_millis,
                now_millis,
            });
        }

        Ok(GeneratorSettings {
            machine_id: self.machine_id,
            epoch_millis,
        })
    }
}

/// A validated configuration. Only [`GeneratorConfig::resolve`] produces
/// one, so its fields are always in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    machine_id: i64,
    epoch_millis: i64,
}

impl GeneratorSettings {
    pub const fn machine_id(&self) -> i64 {
        self.machine_id
    }

    /// The custom epoch, in milliseconds since the Unix epoch.
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }
}
