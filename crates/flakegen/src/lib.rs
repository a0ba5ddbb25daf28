//! Snowflake-style 64-bit ID generation.
//!
//! Every ID packs, from most to least significant bit: one unused sign bit,
//! 41 bits of milliseconds since a configurable epoch, a 10-bit machine ID and
//! a 12-bit per-millisecond sequence. A single [`SnowflakeGenerator`] issues
//! strictly increasing IDs; distinct machine IDs keep independent processes
//! from colliding without any coordination.
//!
//! ```
//! use flakegen::{GeneratorConfig, SnowflakeGenerator, SystemClock};
//!
//! let config = GeneratorConfig::new(7).with_start_time("2024-01-01");
//! let generator = SnowflakeGenerator::new(&config, SystemClock)?;
//!
//! let a = generator.next_id();
//! let b = generator.next_id();
//! assert!(a < b);
//! assert_eq!(a.machine_id(), 7);
//! # Ok::<(), flakegen::Error>(())
//! ```
mod config;
mod error;
mod generator;
mod id;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
