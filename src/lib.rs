//! Monotonic UUID version 7 generator
//!
//! ```rust
//! use uuid7mono::uuid7;
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! println!("{}", uuid.as_u128()); // as 128-bit unsigned integer
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        counter                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 42-bit `counter` field spans the 12-bit `rand_a` field and the top 30
//!   bits of the `rand_b` field. It is incremented by one for each new ID
//!   generated within the same timestamp and is reinitialized to a random number
//!   with the most significant bit cleared whenever the `unix_ts_ms` changes.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 32 `rand` bits are filled with a fresh random number for
//!   every ID.
//!
//! In the very rare circumstances where the 42-bit `counter` field reaches the
//! maximum value and can no more be incremented within the same timestamp, the
//! generator increments the `unix_ts_ms`; therefore, the `unix_ts_ms` may have a
//! larger value than that of the real-time clock. The generator also keeps its
//! latest `unix_ts_ms` when the system clock moves back, however far, so the
//! identifiers from one generator never go out of order.
//!
//! # Generators
//!
//! [`uuid7()`] draws from a process-wide [`SharedGenerator`] seeded from the
//! operating system. Code that needs its own sequence, a custom random number
//! generator, or a simulated clock creates a [`V7Generator`] directly:
//!
//! ```rust
//! use uuid7mono::{TimeSource, V7Generator};
//!
//! struct FixedClock(u64);
//!
//! impl TimeSource for FixedClock {
//!     fn unix_ts_ms(&mut self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! let rng = uuid7mono::generator::with_rand08::Adapter(rand::thread_rng());
//! let mut g = V7Generator::with_rand_and_time_sources(rng, FixedClock(1_700_000_000_000));
//! let x = g.generate();
//! assert!(x.to_string().starts_with("018bcfe5-6800-7"));
//! assert!(x < g.generate());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::FormatError;

pub mod layout;

mod uuid;
pub use uuid::{Uuid, Variant};

pub mod time;
pub use time::{StdSystemTime, TimeSource};

pub mod generator;
pub use generator::{RandSource, V7Generator};

mod shared;
pub use shared::SharedGenerator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::uuid7;
