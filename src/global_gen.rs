//! Default generator and entry point function.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::{MutexGuard, OnceLock};

use crate::{SharedGenerator, Uuid, V7Generator};
use inner::GlobalGenRng;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> MutexGuard<'static, V7Generator<GlobalGenRng>> {
    static G: OnceLock<SharedGenerator<GlobalGenRng>> = OnceLock::new();
    let mut g = G
        .get_or_init(|| {
            fork_safety::record_pid();
            SharedGenerator::new(inner::new_generator())
        })
        .lock();
    if fork_safety::pid_changed() {
        log::debug!("process ID changed; resetting global generator");
        *g = inner::new_generator();
    }
    g
}

/// Generates a UUIDv7 object.
///
/// This function employs a global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond. On Unix, this function resets the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Panics
///
/// Panics if the operating system cannot provide the entropy needed to seed the generator.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7mono::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid7mono::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen().generate()
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::generator::RandSource;
    use crate::V7Generator;

    /// The random number generator of the global generator.
    ///
    /// The global generator employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to emulate the
    /// strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        /// Seeds a new instance from the operating system.
        fn from_os() -> Result<Self, rand::Error> {
            let core = ChaCha12Core::from_rng(OsRng)?;
            Ok(Self(ReseedingRng::new(core, 1024 * 64, OsRng)))
        }
    }

    impl RandSource for GlobalGenRng {
        fn next_u32(&mut self) -> u32 {
            rand::RngCore::next_u32(&mut self.0)
        }

        fn next_u64(&mut self) -> u64 {
            rand::RngCore::next_u64(&mut self.0)
        }
    }

    /// Creates a generator seeded from the operating system.
    ///
    /// No weaker source stands in when the operating system fails to provide entropy.
    pub fn new_generator() -> V7Generator<GlobalGenRng> {
        match GlobalGenRng::from_os() {
            Ok(rng) => V7Generator::new(rng),
            Err(err) => panic!("uuid7mono: could not initialize global generator: {err}"),
        }
    }
}

#[cfg(unix)]
mod fork_safety {
    use std::process;
    use std::sync::atomic::{AtomicU32, Ordering};

    static PID: AtomicU32 = AtomicU32::new(0);

    /// Remembers the current process ID.
    pub fn record_pid() {
        PID.store(process::id(), Ordering::Relaxed);
    }

    /// Returns true if the process ID has changed since the last call or [`record_pid`].
    ///
    /// Callers hold the global generator lock, which orders the accesses.
    pub fn pid_changed() -> bool {
        let pid = process::id();
        PID.swap(pid, Ordering::Relaxed) != pid
    }
}

#[cfg(not(unix))]
mod fork_safety {
    pub fn record_pid() {}

    pub const fn pid_changed() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::uuid7;
    use crate::{time::TimeSource, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid7().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-7[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates sortable string representation by creation time
    #[test]
    fn generates_sortable_string_representation_by_creation_time() {
        SAMPLES.with(|samples| {
            for i in 1..N_SAMPLES {
                assert!(samples[i - 1] < samples[i]);
            }
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use crate::time::StdSystemTime;
        for _ in 0..10_000 {
            let ts_now = StdSystemTime.unix_ts_ms() as i64;
            let timestamp = uuid7().unix_ts_ms() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Encodes unique sortable pair of timestamp and counter
    #[test]
    fn encodes_unique_sortable_pair_of_timestamp_and_counter() {
        SAMPLES.with(|samples| {
            let mut prev_timestamp = &samples[0][0..13];
            let mut prev_counter = &samples[0][15..28];
            for e in &samples[1..] {
                let curr_timestamp = &e[0..13];
                let curr_counter = &e[15..28];
                assert!(
                    prev_timestamp < curr_timestamp
                        || (prev_timestamp == curr_timestamp && prev_counter < curr_counter)
                );
                prev_timestamp = curr_timestamp;
                prev_counter = curr_counter;
            }
        });
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid7();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(7));
        }
    }

    /// Generates no IDs sharing same timestamp and counters under multithreading
    #[test]
    fn generates_no_ids_sharing_same_timestamp_and_counters_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(uuid7()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(<[u8; 12]>::try_from(&e.as_bytes()[..12]).unwrap());
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
