// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecordingSink`] implements
//! [`DiagnosticsSink`](orogen_core::trace::DiagnosticsSink) and appends every
//! event, stamped with a clock reading, to a shared vector. The sink is
//! cheaply clonable; keep a clone when handing one to
//! [`Tracer::new`](orogen_core::trace::Tracer::new) and read the records
//! back through it.

use core::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use orogen_core::time::{MonotonicClock, SystemClock, TimePoint};
use orogen_core::trace::{
    BindingInstalledEvent, DiagnosticsSink, FpsEvent, RegistryStatusEvent, SurfaceChangedEvent,
    SurfaceCreatedEvent,
};

/// One recorded lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopRecord {
    /// A rendering-API binding was constructed.
    BindingInstalled(BindingInstalledEvent),
    /// A surface became available.
    SurfaceCreated(SurfaceCreatedEvent),
    /// The surface was resized.
    SurfaceChanged(SurfaceChangedEvent),
    /// The loop observed a resume request.
    Resumed,
    /// The loop observed a pause request.
    Paused,
    /// The loop completed the destroy transition.
    Destroyed,
    /// A registry reported its state during the destroy transition.
    RegistryStatus(RegistryStatusEvent),
    /// A one-second FPS bucket closed.
    Fps(FpsEvent),
}

impl LoopRecord {
    /// Returns the record's short name, as used by the exporters.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BindingInstalled(_) => "BindingInstalled",
            Self::SurfaceCreated(_) => "SurfaceCreated",
            Self::SurfaceChanged(_) => "SurfaceChanged",
            Self::Resumed => "Resumed",
            Self::Paused => "Paused",
            Self::Destroyed => "Destroyed",
            Self::RegistryStatus(_) => "RegistryStatus",
            Self::Fps(_) => "Fps",
        }
    }
}

/// A [`LoopRecord`] with the clock reading at which it was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stamped {
    /// When the event was recorded.
    pub at: TimePoint,
    /// The recorded event.
    pub record: LoopRecord,
}

/// A [`DiagnosticsSink`] that appends stamped events to a shared vector.
#[derive(Clone)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<Stamped>>>,
    clock: Arc<dyn MonotonicClock + Send + Sync>,
}

impl RecordingSink {
    /// Creates a recorder stamped by a fresh [`SystemClock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Creates a recorder stamped by the given clock. Pass the loop's own
    /// clock so record stamps share its epoch.
    #[must_use]
    pub fn with_clock(clock: impl MonotonicClock + Send + Sync + 'static) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            clock: Arc::new(clock),
        }
    }

    /// Returns a copy of everything recorded so far.
    #[must_use]
    pub fn records(&self) -> Vec<Stamped> {
        self.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<Stamped> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, record: LoopRecord) {
        let at = self.clock.now();
        self.lock().push(Stamped { at, record });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Stamped>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSink")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn on_binding_installed(&mut self, event: &BindingInstalledEvent) {
        self.push(LoopRecord::BindingInstalled(event.clone()));
    }

    fn on_surface_created(&mut self, event: &SurfaceCreatedEvent) {
        self.push(LoopRecord::SurfaceCreated(*event));
    }

    fn on_surface_changed(&mut self, event: &SurfaceChangedEvent) {
        self.push(LoopRecord::SurfaceChanged(*event));
    }

    fn on_resumed(&mut self) {
        self.push(LoopRecord::Resumed);
    }

    fn on_paused(&mut self) {
        self.push(LoopRecord::Paused);
    }

    fn on_destroyed(&mut self) {
        self.push(LoopRecord::Destroyed);
    }

    fn on_registry_status(&mut self, event: &RegistryStatusEvent) {
        self.push(LoopRecord::RegistryStatus(event.clone()));
    }

    fn on_fps(&mut self, event: &FpsEvent) {
        self.push(LoopRecord::Fps(*event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_record_store() {
        let sink = RecordingSink::new();
        let mut writer = sink.clone();

        writer.on_paused();
        writer.on_fps(&FpsEvent { fps: 60 });

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record, LoopRecord::Paused);
        assert_eq!(records[1].record, LoopRecord::Fps(FpsEvent { fps: 60 }));
    }

    #[test]
    fn take_drains_the_store() {
        let mut sink = RecordingSink::new();
        sink.on_resumed();

        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }
}
