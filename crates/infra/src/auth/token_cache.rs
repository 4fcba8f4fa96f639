//! Per-scope access token cache
//!
//! Each scope moves through `absent → fetching → cached → (expired) → absent`.
//! Expiry is an explicit instant checked on every access against an
//! injectable [`Clock`]; nothing refreshes tokens in the background.
//!
//! # Concurrency
//!
//! Every scope owns an async slot. The first caller for a scope holds the
//! slot across the fetch, so concurrent callers for the same scope wait and
//! then reuse its token instead of issuing their own request. Different
//! scopes never block each other beyond the short map lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use fuusor_common::{Clock, SystemClock};
use fuusor_domain::Result;
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use super::password_grant::TokenFetcher;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

type Slot = Arc<AsyncMutex<Option<CachedToken>>>;

/// Longest lifetime honoured for a fetched token, whatever the server reports.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Expiry instant for a token issued at `now` with `expires_in` seconds.
fn expiry_after(now: Instant, expires_in: u64) -> Instant {
    let lifetime = Duration::from_secs(expires_in).min(MAX_TOKEN_LIFETIME);
    // An unrepresentable instant leaves the token expired on arrival.
    now.checked_add(lifetime).unwrap_or(now)
}

/// Scope-keyed token cache with single-flight fetching.
pub struct TokenCache {
    fetcher: Arc<dyn TokenFetcher>,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl TokenCache {
    /// Cache backed by the system clock.
    pub fn new(fetcher: Arc<dyn TokenFetcher>) -> Self {
        Self::with_clock(fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(fetcher: Arc<dyn TokenFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self { fetcher, clock, slots: Mutex::new(HashMap::new()) }
    }

    fn slot(&self, scope: &str) -> Slot {
        let mut slots = self.slots.lock();
        slots.entry(scope.to_string()).or_default().clone()
    }

    /// Make sure a live token exists for `scope`, fetching one if needed.
    ///
    /// # Errors
    /// Whatever the fetcher returns; the slot stays empty on failure.
    pub async fn refresh_access_token(&self, scope: &str) -> Result<()> {
        self.access_token(scope).await.map(|_| ())
    }

    /// Live token for `scope`, fetching a new one when absent or expired.
    ///
    /// # Errors
    /// Whatever the fetcher returns; the slot stays empty on failure.
    pub async fn access_token(&self, scope: &str) -> Result<String> {
        let slot = self.slot(scope);
        let mut cached = slot.lock().await;

        let now = self.clock.now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_live(now)) {
            debug!(scope, "reusing cached access token");
            return Ok(token.token.clone());
        }

        // Drop the stale token first so a failed fetch leaves the slot absent.
        *cached = None;

        let response = self.fetcher.fetch_token(scope).await?;
        let expires_at = expiry_after(self.clock.now(), response.expires_in);
        info!(scope, expires_in = response.expires_in, "access token fetched");

        *cached = Some(CachedToken { token: response.access_token.clone(), expires_at });
        Ok(response.access_token)
    }

    /// Whether a live token is currently cached for `scope`.
    pub fn has_live_token(&self, scope: &str) -> bool {
        let slot = self.slot(scope);
        let now = self.clock.now();
        // A slot locked by an in-flight fetch has nothing usable yet.
        let live = match slot.try_lock() {
            Ok(cached) => cached.as_ref().is_some_and(|token| token.is_live(now)),
            Err(_) => false,
        };
        live
    }
}
