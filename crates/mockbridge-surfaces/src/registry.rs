//! Registration storage shared by the in-memory surfaces.

use mockbridge_core::{HttpMethod, MatchOrder, RegistrationId};
use regex::Regex;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Entry<C> {
    id: RegistrationId,
    method: HttpMethod,
    pattern: Regex,
    callback: C,
    calls: usize,
}

struct Inner<C> {
    next: u64,
    entries: Vec<Entry<C>>,
}

/// Ordered `(method, regex, callback)` registrations with call counters.
pub(crate) struct Registry<C> {
    inner: Mutex<Inner<C>>,
}

impl<C: Clone> Registry<C> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next: 0,
                entries: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn insert(&self, method: HttpMethod, pattern: Regex, callback: C) -> RegistrationId {
        let mut inner = self.lock();
        inner.next += 1;
        let id = RegistrationId(inner.next);
        inner.entries.push(Entry {
            id,
            method,
            pattern,
            callback,
            calls: 0,
        });
        id
    }

    pub(crate) fn remove(&self, id: RegistrationId) -> bool {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.id != id);
        let removed = inner.entries.len() != before;
        if !removed {
            tracing::trace!(%id, "registration already gone");
        }
        removed
    }

    pub(crate) fn clear(&self) {
        let mut inner = self.lock();
        tracing::debug!(dropped = inner.entries.len(), "clearing registrations");
        inner.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Pick the callback answering `method url` and count the call.
    ///
    /// The callback is cloned out so it runs without the lock held.
    pub(crate) fn lookup(&self, method: HttpMethod, url: &str, order: MatchOrder) -> Option<C> {
        let mut inner = self.lock();
        let matches = |entry: &&mut Entry<C>| entry.method == method && entry.pattern.is_match(url);
        let found = match order {
            MatchOrder::FirstRegistered => inner.entries.iter_mut().find(matches),
            MatchOrder::LastRegistered => inner.entries.iter_mut().rev().find(matches),
        };
        let Some(entry) = found else {
            tracing::debug!(%method, url, "no registration matches call");
            return None;
        };
        entry.calls += 1;
        tracing::trace!(id = %entry.id, %method, url, calls = entry.calls, "registration matched");
        Some(entry.callback.clone())
    }

    pub(crate) fn call_count(&self, id: RegistrationId) -> usize {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map_or(0, |entry| entry.calls)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.lock().entries.iter().map(|entry| entry.calls).sum()
    }
}
