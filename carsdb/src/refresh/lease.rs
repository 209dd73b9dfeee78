//! The time bounded exclusive right to refresh the raw dataset.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::CarsDbResult;

/// A time bounded exclusive lease electing a single dataset refresher.
///
/// Implementations are backed by an external coordination service in
/// multi-process deployments. Failing to acquire the lease is a normal branch
/// of the refresh cycle, not an error; the `Err` case is reserved for the
/// lease backend itself failing. Holders are not required to renew, a new
/// leader may win the next cycle after the lease expires.
pub trait RefreshLease {
    /// Attempts to acquire the lease for the given time-to-live.
    ///
    /// Returns `Ok(false)` when another holder currently owns the lease.
    fn try_acquire(&self, ttl: Duration) -> impl Future<Output = CarsDbResult<bool>> + Send;
}

/// In-process lease for single host deployments and tests.
///
/// Grants the lease to the first caller and to any caller arriving after the
/// previous grant expired. Clones share the same lease state.
#[derive(Debug, Clone, Default)]
pub struct ProcessLease {
    expires_at: Arc<Mutex<Option<Instant>>>,
}

impl ProcessLease {
    /// Creates a lease that nobody holds yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RefreshLease for ProcessLease {
    async fn try_acquire(&self, ttl: Duration) -> CarsDbResult<bool> {
        let mut expires_at = self.expires_at.lock().await;
        let now = Instant::now();

        match *expires_at {
            Some(expiry) if expiry > now => Ok(false),
            _ => {
                *expires_at = Some(now + ttl);

                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_one_of_two_racers_acquires_the_lease() {
        let lease = ProcessLease::new();
        let ttl = Duration::from_secs(30);

        assert!(lease.try_acquire(ttl).await.unwrap());
        assert!(!lease.clone().try_acquire(ttl).await.unwrap());
    }

    #[tokio::test]
    async fn expired_leases_can_be_reacquired() {
        let lease = ProcessLease::new();

        assert!(lease.try_acquire(Duration::ZERO).await.unwrap());
        assert!(lease.try_acquire(Duration::from_secs(30)).await.unwrap());
    }
}
