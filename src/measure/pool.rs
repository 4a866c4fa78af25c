//! Surface pool for reusing measurement surfaces across fit-content passes.
//!
//! Idle surfaces are kept per host in a bounded cache. The host may reclaim
//! them at any time (memory pressure, host teardown); `acquire` then simply
//! creates a fresh surface. A surface is never shared: it leaves the cache on
//! `acquire` and comes back through its [`PooledSurface`] guard, which
//! releases on drop so every exit path (early return, `?`, panic) returns it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use super::surface::{HostKey, MeasureSurface, SurfaceHost};

/// Counters for pool traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub acquired: usize,
    pub released: usize,
    pub created: usize,
    /// Released surfaces dropped because the host's cache was full.
    pub discarded: usize,
}

impl PoolStats {
    /// Surfaces currently held by callers.
    pub fn outstanding(&self) -> usize {
        self.acquired.saturating_sub(self.released)
    }
}

/// Pool of measurement surfaces keyed by host.
///
/// Single-threaded by construction (`RefCell`), matching the render thread
/// that drives layout.
pub struct SurfacePool<S> {
    capacity: usize,
    idle: RefCell<HashMap<HostKey, Vec<S>>>,
    stats: Cell<PoolStats>,
}

impl<S: MeasureSurface> SurfacePool<S> {
    /// Create a pool retaining at most `capacity` idle surfaces per host.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            idle: RefCell::new(HashMap::new()),
            stats: Cell::new(PoolStats::default()),
        }
    }

    /// Take an idle surface for `host`, or create one.
    pub fn acquire<H>(&self, host: &H) -> PooledSurface<'_, S>
    where
        H: SurfaceHost<Surface = S>,
    {
        let key = host.key();
        let reused = self
            .idle
            .borrow_mut()
            .get_mut(&key)
            .and_then(Vec::pop);

        let surface = match reused {
            Some(mut surface) => {
                surface.reset();
                tracing::trace!(host = key.0, "reusing pooled surface");
                surface
            }
            None => {
                self.bump(|stats| stats.created += 1);
                tracing::trace!(host = key.0, "creating measurement surface");
                host.create_surface()
            }
        };

        self.bump(|stats| stats.acquired += 1);
        PooledSurface {
            pool: self,
            key,
            surface: Some(surface),
        }
    }

    /// Return a surface to `key`'s cache. Only reached through a
    /// [`PooledSurface`] guard, so every release matches an acquire.
    ///
    /// `None` stands for a surface the host already reclaimed and is a no-op.
    pub(crate) fn release(&self, key: HostKey, surface: Option<S>) {
        let Some(surface) = surface else {
            tracing::trace!(host = key.0, "release of reclaimed surface ignored");
            return;
        };

        self.bump(|stats| stats.released += 1);

        let mut idle = self.idle.borrow_mut();
        let cache = idle.entry(key).or_default();
        if cache.len() < self.capacity {
            cache.push(surface);
        } else {
            drop(surface);
            self.bump(|stats| stats.discarded += 1);
        }
    }

    /// Drop every idle surface.
    pub fn reclaim(&self) -> usize {
        let mut idle = self.idle.borrow_mut();
        let count = idle.values().map(Vec::len).sum();
        idle.clear();
        tracing::debug!(count, "reclaimed idle surfaces");
        count
    }

    /// Drop idle surfaces belonging to one host.
    pub fn reclaim_host(&self, key: HostKey) -> usize {
        let count = self
            .idle
            .borrow_mut()
            .remove(&key)
            .map(|cache| cache.len())
            .unwrap_or(0);
        tracing::debug!(host = key.0, count, "reclaimed host surfaces");
        count
    }

    pub fn idle_count(&self, key: HostKey) -> usize {
        self.idle.borrow().get(&key).map(Vec::len).unwrap_or(0)
    }

    pub fn stats(&self) -> PoolStats {
        self.stats.get()
    }

    fn bump(&self, update: impl FnOnce(&mut PoolStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

impl<S: MeasureSurface> Default for SurfacePool<S> {
    fn default() -> Self {
        Self::new(4)
    }
}

/// A surface checked out of a [`SurfacePool`]; released when dropped.
pub struct PooledSurface<'p, S: MeasureSurface> {
    pool: &'p SurfacePool<S>,
    key: HostKey,
    surface: Option<S>,
}

impl<S: MeasureSurface> Deref for PooledSurface<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        match &self.surface {
            Some(surface) => surface,
            None => unreachable!("pooled surface used after release"),
        }
    }
}

impl<S: MeasureSurface> DerefMut for PooledSurface<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        match &mut self.surface {
            Some(surface) => surface,
            None => unreachable!("pooled surface used after release"),
        }
    }
}

impl<S: MeasureSurface> Drop for PooledSurface<'_, S> {
    fn drop(&mut self) {
        self.pool.release(self.key, self.surface.take());
    }
}
