//! The lock around the UI runtime.

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    mutex::{
        Mutex,
        MutexGuard,
    },
};
use embassy_time::{
    Duration,
    with_timeout,
};

use crate::error::Error;

/// A UI runtime that several tasks take turns on.
///
/// The runtime itself is not re-entrant, so every access goes through
/// [`lock`](Self::lock), which hands out a scoped guard. Construct one per
/// screen and pass it by reference to the render scheduler and to whatever
/// produces UI state.
pub struct SharedUi<M: RawMutex, U> {
    inner: Mutex<M, U>,
    lock_timeout: Duration,
}

impl<M: RawMutex, U> SharedUi<M, U> {
    pub const fn new(ui: U, lock_timeout: Duration) -> Self {
        Self {
            inner: Mutex::new(ui),
            lock_timeout,
        }
    }

    /// Wait for exclusive access.
    ///
    /// Fails with [`Error::LockAcquisition`] if the lock is not free within
    /// the timeout.
    pub async fn lock(&self) -> Result<MutexGuard<'_, M, U>, Error> {
        with_timeout(self.lock_timeout, self.inner.lock())
            .await
            .map_err(|_| {
                error!("UI lock not acquired within {}ms", self.lock_timeout.as_millis());
                Error::LockAcquisition
            })
    }

    /// Run `f` with exclusive access. The lock is released when `f` returns,
    /// whether it succeeded or not.
    pub async fn with<R>(&self, f: impl FnOnce(&mut U) -> Result<R, Error>) -> Result<R, Error> {
        let mut ui = self.lock().await?;
        f(&mut *ui)
    }

    /// Take the lock without waiting, for callers that cannot suspend.
    pub fn try_lock(&self) -> Result<MutexGuard<'_, M, U>, Error> {
        self.inner.try_lock().map_err(|_| Error::LockAcquisition)
    }
}
