//! Thread-safe wrapper around [`V7Generator`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::time::{StdSystemTime, TimeSource};
use crate::{generator::RandSource, Uuid, V7Generator};

/// A [`V7Generator`] that can be shared across threads.
///
/// Every call to [`generate`](SharedGenerator::generate) reads and updates the generator state in a
/// single critical section, so the UUIDs returned by one instance are strictly increasing in the
/// order the calls acquire the lock, regardless of which thread makes them. Separate instances keep
/// separate sequences.
///
/// # Examples
///
/// ```rust
/// use std::{sync::Arc, thread};
/// use uuid7mono::{SharedGenerator, V7Generator};
///
/// let g = Arc::new(SharedGenerator::new(V7Generator::with_rand08(rand::rngs::OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug, Default)]
pub struct SharedGenerator<R, T = StdSystemTime> {
    inner: Mutex<V7Generator<R, T>>,
}

impl<R, T> SharedGenerator<R, T> {
    /// Wraps a generator instance.
    pub const fn new(generator: V7Generator<R, T>) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    /// Unwraps the inner generator instance.
    pub fn into_inner(self) -> V7Generator<R, T> {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the lock handle of the inner generator.
    ///
    /// The generator never leaves its state half-updated, so a lock poisoned by a panicking
    /// thread is taken over as is.
    pub fn lock(&self) -> MutexGuard<'_, V7Generator<R, T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RandSource, T: TimeSource> SharedGenerator<R, T> {
    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&self) -> Uuid {
        self.lock().generate()
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// See [`V7Generator::generate_core`] for the description.
    pub fn generate_core(&self, unix_ts_ms: u64) -> Uuid {
        self.lock().generate_core(unix_ts_ms)
    }
}

impl<R, T> From<V7Generator<R, T>> for SharedGenerator<R, T> {
    fn from(src: V7Generator<R, T>) -> Self {
        Self::new(src)
    }
}
