//! UUIDv7 generator and related types.

use crate::time::{StdSystemTime, TimeSource};
use crate::Uuid;

pub mod with_rand08;


/// A trait that defines the minimum random number generator interface for [`V7Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

const MAX_TIMESTAMP: u64 = (1 << 48) - 1;
const MAX_COUNTER: u64 = (1 << 42) - 1;

/// Represents a UUIDv7 generator that encapsulates a counter and guarantees the monotonic order of
/// UUIDs generated within the same millisecond.
///
/// This type provides the interface to customize the random number generator and system clock of
/// a UUIDv7 generator. A generator instance only guarantees the order of UUIDs it produces itself;
/// wrap it in a [`SharedGenerator`](crate::SharedGenerator) to share one sequence across threads.
///
/// # Examples
///
/// ```rust
/// use uuid7mono::V7Generator;
///
/// let mut g = V7Generator::with_rand08(rand::rngs::OsRng);
/// let x = g.generate();
/// let y = g.generate();
/// assert!(x < y);
/// ```
///
/// # Timestamp and counter
///
/// Every UUID carries the generator's 48-bit timestamp and 42-bit counter followed by 32 random
/// bits drawn afresh for each call:
///
/// - When the clock has advanced past the previous timestamp, the generator adopts the new
///   timestamp and reseeds the counter with a random 42-bit number whose most significant bit is
///   cleared, which leaves room for at least 2^41 increments.
/// - When the clock reports the same or an earlier timestamp, the generator keeps the previous
///   timestamp and increments the counter. A rolled-back clock is never reflected in the output.
/// - When the counter cannot be incremented any more, the generator increments the timestamp
///   itself and reseeds the counter. The embedded timestamp may therefore run ahead of the real
///   clock until the clock catches up.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    timestamp: u64,
    counter: u64,

    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R, T> V7Generator<R, T> {
    /// Creates a generator instance with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self {
            timestamp: 0,
            counter: 0,
            rng,
            time_source,
        }
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    pub fn generate(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }
}

impl<R: RandSource, T> V7Generator<R, T> {
    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// Bits above the lowest 48 of `unix_ts_ms` are ignored. The returned UUID is always greater
    /// than the one returned by the immediately preceding call.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Uuid {
        let unix_ts_ms = unix_ts_ms & MAX_TIMESTAMP;

        if unix_ts_ms > self.timestamp {
            self.timestamp = unix_ts_ms;
            self.counter = self.next_counter();
        } else {
            if unix_ts_ms < self.timestamp {
                log::trace!(
                    "clock rollback absorbed: {} ms behind last timestamp",
                    self.timestamp - unix_ts_ms
                );
            }

            self.counter += 1;
            if self.counter > MAX_COUNTER {
                // increment timestamp at counter overflow
                self.timestamp += 1;
                self.counter = self.next_counter();
                log::trace!("counter overflow: timestamp advanced to {}", self.timestamp);
            }
        }

        Uuid::from_fields_v7(
            self.timestamp,
            (self.counter >> 30) as u16,
            ((self.counter & 0x3fff_ffff) << 32) | self.rng.next_u32() as u64,
        )
    }

    /// Returns a random counter value with the most significant bit cleared.
    fn next_counter(&mut self) -> u64 {
        self.rng.next_u64() & (MAX_COUNTER >> 1)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7mono::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}
