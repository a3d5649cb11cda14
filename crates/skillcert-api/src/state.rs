//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! The whole registry sits behind one `parking_lot::RwLock`. Mutating
//! handlers take the write lock for the full operation, which gives every
//! call the single-writer, apply-or-abort discipline the registry is
//! specified against: the registry validates before its first write, so a
//! returned error means nothing changed, and no reader ever observes a
//! half-applied mint. Read handlers take the read lock.
//!
//! The lock is `parking_lot`, not `tokio::sync`, because no handler holds
//! it across an `.await` point — every registry call is synchronous.
//!
//! ## Ledger time
//!
//! [`LedgerClock`] stands in for the host ledger's block height. Each
//! mutating call executes at a fresh tick (one tick per call, the way the
//! original host mined one transaction per block), and the admin clock
//! endpoint advances it in bulk to drive credentials over their expiry.
//! The registry itself never reads the clock; handlers pass the tick in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use skillcert_core::{AccountId, Tick};
use skillcert_registry::CertificationRegistry;

use crate::auth::SecretToken;

/// Application configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the server binds to.
    pub port: u16,
    /// The registry administrator account.
    pub admin_account: AccountId,
    /// Bearer token protecting the API. `None` disables auth (development
    /// and test mode).
    pub auth_token: Option<SecretToken>,
}

impl AppConfig {
    /// Configuration with auth disabled, for tests and local development.
    pub fn insecure(admin_account: AccountId) -> Self {
        AppConfig {
            port: 8080,
            admin_account,
            auth_token: None,
        }
    }
}

/// The ledger clock: a monotonically increasing tick counter.
///
/// Cloning shares the underlying counter.
#[derive(Debug, Clone)]
pub struct LedgerClock {
    current: Arc<AtomicU64>,
}

impl LedgerClock {
    /// A clock at the genesis tick.
    pub fn new() -> Self {
        LedgerClock {
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The current tick.
    pub fn now(&self) -> Tick {
        Tick(self.current.load(Ordering::SeqCst))
    }

    /// Advance by one tick and return the new value. Every mutating call
    /// runs at the tick this returns.
    pub fn next_block(&self) -> Tick {
        Tick(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Advance by `ticks` and return the new value. Saturates at
    /// `u64::MAX` so a hostile advance cannot wrap the clock backwards.
    pub fn advance(&self, ticks: u64) -> Tick {
        let mut current = self.current.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(ticks);
            match self.current.compare_exchange(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Tick(next),
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for LedgerClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state. Cheap to clone; all fields are handles.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<RwLock<CertificationRegistry>>,
    pub clock: LedgerClock,
}

impl AppState {
    /// Fresh state with auth disabled and the given administrator.
    pub fn new(admin_account: AccountId) -> Self {
        Self::with_config(AppConfig::insecure(admin_account))
    }

    /// Fresh state from explicit configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let registry = CertificationRegistry::new(config.admin_account.clone());
        AppState {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(registry)),
            clock: LedgerClock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_genesis() {
        let clock = LedgerClock::new();
        assert_eq!(clock.now(), Tick::ZERO);
    }

    #[test]
    fn next_block_advances_one_tick() {
        let clock = LedgerClock::new();
        assert_eq!(clock.next_block(), Tick(1));
        assert_eq!(clock.next_block(), Tick(2));
        assert_eq!(clock.now(), Tick(2));
    }

    #[test]
    fn advance_moves_in_bulk() {
        let clock = LedgerClock::new();
        clock.next_block();
        assert_eq!(clock.advance(8640), Tick(8641));
        assert_eq!(clock.now(), Tick(8641));
    }

    #[test]
    fn advance_saturates() {
        let clock = LedgerClock::new();
        clock.advance(u64::MAX);
        assert_eq!(clock.advance(10), Tick(u64::MAX));
    }

    #[test]
    fn clones_share_the_counter() {
        let clock = LedgerClock::new();
        let other = clock.clone();
        clock.next_block();
        assert_eq!(other.now(), Tick(1));
    }

    #[test]
    fn state_registry_carries_the_configured_admin() {
        let admin = AccountId::new("admin").unwrap();
        let state = AppState::new(admin.clone());
        assert!(state.registry.read().is_admin(&admin));
        assert!(state.config.auth_token.is_none());
    }
}
