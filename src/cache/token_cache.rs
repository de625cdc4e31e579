use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::token::Token;
use crate::error::AuthError;

type Outcome = Result<Token, AuthError>;

/// Token holder: one generation at a time, each generation resolved at most once.
///
/// All callers of one generation share the same outcome, success or failure.
/// Resetting swaps in a fresh, empty generation; callers already holding the
/// previous one keep observing its outcome.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Generation>,
}

#[derive(Debug, Default)]
struct Generation {
    id: u64,
    cell: Arc<OnceCell<Outcome>>,
}

/// A token together with the generation it was issued in.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub generation: u64,
    pub token: Token,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> (u64, Arc<OnceCell<Outcome>>) {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        (slot.id, slot.cell.clone())
    }

    /// Current token, running `fetch` only if this generation has no outcome yet.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<IssuedToken, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        let (generation, cell) = self.current();
        let outcome = cell
            .get_or_init(|| async move {
                debug!(generation, "token generation empty, fetching");
                fetch().await
            })
            .await
            .clone();

        outcome.map(|token| IssuedToken { generation, token })
    }

    /// Discard the current generation unconditionally. Returns the new generation id.
    pub fn reset(&self) -> u64 {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.id += 1;
        slot.cell = Arc::new(OnceCell::new());
        info!(generation = slot.id, "token cache reset");
        slot.id
    }

    /// Discard `generation` if it is still current.
    ///
    /// Several requests rejected with the same token collapse into one reset.
    pub fn invalidate(&self, generation: u64) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.id != generation {
            debug!(generation, current = slot.id, "token generation already replaced");
            return false;
        }
        slot.id += 1;
        slot.cell = Arc::new(OnceCell::new());
        info!(generation = slot.id, "token generation invalidated");
        true
    }

    pub fn generation(&self) -> u64 {
        self.current().0
    }

    /// Resolved outcome of the current generation, without fetching.
    pub fn peek(&self) -> Option<Outcome> {
        self.current().1.get().cloned()
    }
}
