use core::fmt;

use chrono::{DateTime, Utc};

/// A 64-bit Snowflake ID.
///
/// - 1 bit reserved (always zero, keeps the value non-negative)
/// - 41 bits timestamp (ms since the generator's epoch)
/// - 10 bits machine ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21             12 11             0
///              +--------------+----------------+-----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | machine ID (10) | sequence (12) |
///              +--------------+----------------+-----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------------>|
/// ```
///
/// IDs compare by their raw value, so later IDs from one generator always
/// sort after earlier ones.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << 41) - 1;

    /// Bitmask for extracting the 10-bit machine ID field. Occupies bits 12
    /// through 21.
    pub const MACHINE_ID_MASK: i64 = (1 << 10) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: i64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = 22;

    /// Number of bits to shift the machine ID to its correct position (bit 12).
    pub const MACHINE_ID_SHIFT: u32 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Largest machine ID a generator accepts.
    pub const MAX_MACHINE_ID: i64 = Self::MACHINE_ID_MASK;

    /// Largest sequence value within a single millisecond.
    pub const MAX_SEQUENCE: i64 = Self::SEQUENCE_MASK;

    /// Packs the three fields into an ID.
    ///
    /// Each field is masked to its width, so a timestamp past the 41-bit
    /// lifetime wraps instead of touching the sign bit.
    pub const fn from_components(timestamp: i64, machine_id: i64, sequence: i64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | machine_id | sequence,
        }
    }

    /// Wraps a raw value, e.g. one read back from storage.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the packed value.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Extracts the timestamp (ms since the epoch) from the packed ID.
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the machine ID from the packed ID.
    pub const fn machine_id(&self) -> i64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns `true` if the reserved sign bit is clear.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Milliseconds since the Unix epoch at which this ID was minted, given
    /// the epoch its generator was configured with.
    pub const fn unix_millis(&self, epoch_millis: i64) -> i64 {
        epoch_millis + self.timestamp()
    }

    /// Creation time of this ID as a UTC timestamp.
    ///
    /// Returns `None` if the result is outside chrono's representable range.
    pub fn created_at(&self, epoch_millis: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.unix_millis(epoch_millis))
    }

    /// Returns the ID as a zero-padded 19-digit string, which sorts
    /// lexicographically in the same order as the IDs themselves.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_fields_at_documented_offsets() {
        let epoch = 1_672_502_400_000;
        let now = 1_700_000_000_123;
        let id = SnowflakeId::from_components(now - epoch, 512, 77);

        assert_eq!(id.to_raw(), ((now - epoch) << 22) | (512 << 12) | 77);
        assert_eq!(id.timestamp(), now - epoch);
        assert_eq!(id.machine_id(), 512);
        assert_eq!(id.sequence(), 77);
        assert_eq!(id.unix_millis(epoch), now);
        assert!(id.is_valid());
    }

    #[test]
    fn extremes_stay_non_negative() {
        let id = SnowflakeId::from_components(
            SnowflakeId::TIMESTAMP_MASK,
            SnowflakeId::MAX_MACHINE_ID,
            SnowflakeId::MAX_SEQUENCE,
        );
        assert_eq!(id.to_raw(), i64::MAX);
        assert_eq!(id.timestamp(), SnowflakeId::TIMESTAMP_MASK);
        assert_eq!(id.machine_id(), 1023);
        assert_eq!(id.sequence(), 4095);
    }

    #[test]
    fn timestamp_wraps_after_41_bits() {
        let id = SnowflakeId::from_components(SnowflakeId::TIMESTAMP_MASK + 5, 1, 2);
        assert_eq!(id.timestamp(), 4);
        assert!(id.is_valid());
    }

    #[test]
    fn orders_by_timestamp_then_sequence() {
        let a = SnowflakeId::from_components(10, 3, 4095);
        let b = SnowflakeId::from_components(11, 3, 0);
        let c = SnowflakeId::from_components(11, 3, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn created_at_resolves_against_epoch() {
        let epoch = 1_672_502_400_000;
        let id = SnowflakeId::from_components(1_000, 0, 0);
        let at = id.created_at(epoch).unwrap();
        assert_eq!(at.timestamp_millis(), epoch + 1_000);
        assert_eq!(at.to_rfc3339(), "2022-12-31T16:00:01+00:00");
    }

    #[test]
    fn padded_string_has_fixed_width() {
        let id = SnowflakeId::from_raw(42);
        assert_eq!(id.to_padded_string(), "0000000000000000042");
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
    }
}
