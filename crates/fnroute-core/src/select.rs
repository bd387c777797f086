use std::sync::Mutex;

use fnroute_model::ReadySet;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Picks one candidate out of a ready set.
///
/// Returns an index into `set`, or `None` when nothing can be selected.
pub trait Selector: Send + Sync + 'static {
    fn select(&self, set: &ReadySet) -> Option<usize>;
}

/// Uniform random choice using the calling thread's generator.
///
/// Each thread draws from its own independently seeded stream, so concurrent
/// resolutions neither contend on a lock nor share a sequence.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformSelector;

impl Selector for UniformSelector {
    fn select(&self, set: &ReadySet) -> Option<usize> {
        if set.is_empty() {
            return None;
        }
        Some(rand::rng().random_range(0..set.len()))
    }
}

/// Uniform random choice from an explicitly seeded generator owned by the selector.
pub struct SeededSelector {
    rng: Mutex<StdRng>,
}

impl SeededSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Selector for SeededSelector {
    fn select(&self, set: &ReadySet) -> Option<usize> {
        if set.is_empty() {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(rng.random_range(0..set.len()))
    }
}
