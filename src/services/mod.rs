use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

pub mod catalog;
pub mod classifier;
pub mod recommendations;
pub mod selector;
pub mod swap;
pub mod vectorizer;

/// Random source shared by all handlers for meal, swap and tip picks
///
/// Seeded from configuration for reproducible runs, from OS entropy otherwise.
/// Selections are short and synchronous, so a plain mutex is enough.
#[derive(Clone)]
pub struct SharedRng(Arc<Mutex<StdRng>>);

impl SharedRng {
    pub fn seeded(seed: u64) -> Self {
        Self(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    pub fn from_entropy() -> Self {
        Self(Arc::new(Mutex::new(StdRng::from_entropy())))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Runs `f` with exclusive access to the generator
    ///
    /// Never hold the generator across an `.await`.
    pub fn with<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *rng)
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.0.try_lock().is_err()
    }
}
