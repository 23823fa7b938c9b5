//! Capped, time-expiring toast queue.
//!
//! One [`ToastStore`] is created at application start and handed by
//! reference to whoever emits or renders notifications. Time is injected
//! through [`ToastStore::advance_to`], so expiry is deterministic under test
//! and driven by a browser interval in the web crate.

use crate::constants::{TOAST_DEFAULT_DURATION_MS, TOAST_LIMIT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToastId(String);

impl ToastId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments to [`ToastStore::emit`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// Milliseconds before auto-dismiss. `None` uses the default;
    /// non-positive or non-finite values never expire.
    pub duration_ms: Option<f64>,
    pub id: Option<ToastId>,
}

impl ToastRequest {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub const fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(ToastId::new(id));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

/// Handle returned from [`ToastStore::emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "keep the ticket to dismiss the toast early"]
pub struct ToastTicket {
    pub id: ToastId,
}

impl ToastTicket {
    pub fn dismiss(&self, store: &mut ToastStore) {
        store.dismiss(&self.id);
    }
}

#[derive(Debug)]
pub struct ToastStore {
    /// Newest first.
    toasts: Vec<Toast>,
    /// Pending auto-dismiss deadlines, absolute milliseconds.
    deadlines: BTreeMap<ToastId, f64>,
    now_ms: f64,
    next_id: u64,
    limit: usize,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(TOAST_LIMIT)
    }

    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            toasts: Vec::new(),
            deadlines: BTreeMap::new(),
            now_ms: 0.0,
            next_id: 0,
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.deadlines.len()
    }

    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Show a toast, evicting the oldest beyond the cap.
    pub fn emit(&mut self, request: ToastRequest) -> ToastTicket {
        let id = request.id.unwrap_or_else(|| {
            self.next_id += 1;
            ToastId(format!("toast-{}", self.next_id))
        });
        self.toasts.retain(|toast| toast.id != id);
        self.deadlines.remove(&id);

        self.toasts.insert(
            0,
            Toast {
                id: id.clone(),
                title: request.title,
                description: request.description,
                variant: request.variant,
            },
        );
        let duration = request.duration_ms.unwrap_or(TOAST_DEFAULT_DURATION_MS);
        if duration.is_finite() && duration > 0.0 {
            self.deadlines.insert(id.clone(), self.now_ms + duration);
        }

        for evicted in self.toasts.split_off(self.limit.min(self.toasts.len())) {
            self.deadlines.remove(&evicted.id);
        }
        ToastTicket { id }
    }

    pub fn dismiss(&mut self, id: &ToastId) {
        self.toasts.retain(|toast| &toast.id != id);
        self.deadlines.remove(id);
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
        self.deadlines.clear();
    }

    /// Move the clock forward and drop every toast whose deadline has passed.
    ///
    /// Returns the ids removed, oldest deadline first. The clock never moves
    /// backwards.
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<ToastId> {
        if now_ms.is_finite() && now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
        let mut due: Vec<(ToastId, f64)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now_ms)
            .map(|(id, deadline)| (id.clone(), *deadline))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        let expired: Vec<ToastId> = due.into_iter().map(|(id, _)| id).collect();
        for id in &expired {
            self.dismiss(id);
        }
        expired
    }

    /// Drop all toasts and pending timers; called when the host tears down.
    pub fn shutdown(&mut self) {
        self.dismiss_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_capped() {
        let mut store = ToastStore::new();
        for title in ["one", "two", "three", "four"] {
            let _ = store.emit(ToastRequest::new(title));
        }
        let titles: Vec<_> = store
            .toasts()
            .iter()
            .map(|t| t.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, ["four", "three", "two"]);
        assert_eq!(store.pending_timers(), 3);
    }

    #[test]
    fn expires_after_default_duration() {
        let mut store = ToastStore::new();
        let ticket = store.emit(ToastRequest::new("hot"));
        assert!(store.advance_to(3_999.0).is_empty());
        assert_eq!(store.advance_to(4_000.0), vec![ticket.id]);
        assert!(store.is_empty());
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn sticky_when_duration_is_not_positive_or_finite() {
        let mut store = ToastStore::new();
        let _ = store.emit(ToastRequest::new("zero").duration_ms(0.0));
        let _ = store.emit(ToastRequest::new("negative").duration_ms(-5.0));
        let _ = store.emit(ToastRequest::new("inf").duration_ms(f64::INFINITY));
        assert_eq!(store.pending_timers(), 0);
        assert!(store.advance_to(1.0e9).is_empty());
        assert_eq!(store.toasts().len(), 3);
    }

    #[test]
    fn dismiss_cancels_pending_removal() {
        let mut store = ToastStore::new();
        let ticket = store.emit(ToastRequest::new("bye").variant(ToastVariant::Destructive));
        ticket.dismiss(&mut store);
        assert!(store.is_empty());
        assert_eq!(store.pending_timers(), 0);

        let _ = store.emit(ToastRequest::new("a"));
        let _ = store.emit(ToastRequest::new("b").duration_ms(f64::NAN));
        store.dismiss_all();
        assert!(store.is_empty());
        assert_eq!(store.pending_timers(), 0);
    }

    #[test]
    fn explicit_id_replaces_and_restarts_timer() {
        let mut store = ToastStore::new();
        let _ = store.emit(ToastRequest::new("saving").id("save"));
        store.advance_to(3_000.0);
        let _ = store.emit(ToastRequest::new("saved").id("save"));
        assert_eq!(store.toasts().len(), 1);
        assert!(store.advance_to(5_000.0).is_empty());
        assert_eq!(store.advance_to(7_000.0), vec![ToastId::new("save")]);
    }

    #[test]
    fn eviction_cancels_the_evicted_timer() {
        let mut store = ToastStore::with_limit(1);
        let first = store.emit(ToastRequest::new("first").duration_ms(10.0));
        let _ = store.emit(ToastRequest::new("second").duration_ms(0.0));
        assert_eq!(store.pending_timers(), 0);
        assert!(store.advance_to(50.0).is_empty());
        assert!(store.toasts().iter().all(|t| t.id != first.id));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut store = ToastStore::new();
        store.advance_to(1_000.0);
        store.advance_to(10.0);
        assert!((store.now_ms() - 1_000.0).abs() < f64::EPSILON);
        let _ = store.emit(ToastRequest::new("late"));
        assert!(store.advance_to(4_999.0).is_empty());
        assert_eq!(store.advance_to(5_000.0).len(), 1);
    }
}
