// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics events emitted by the lifecycle loop.
//!
//! The loop reports noteworthy transitions through a [`DiagnosticsSink`].
//! Every sink method has a no-op default, so implementations subscribe only
//! to the events they care about. [`Tracer`] is the loop's internal wrapper;
//! when built [`disabled`](Tracer::disabled) every emission is a branch on a
//! `None` and no event structs are inspected.
//!
//! Sinks run synchronously on the rendering thread, inside the lifecycle
//! transition they describe; they should hand data off rather than block.

use core::fmt;

use crate::context::GlApi;
use crate::registry::RegistryKind;

/// A rendering-API binding was constructed for a new context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingInstalledEvent {
    /// Which API variant the factory chose.
    pub api: GlApi,
    /// The context's `GL_RENDERER` string.
    pub renderer: String,
    /// The context's `GL_VENDOR` string.
    pub vendor: String,
    /// The context's `GL_VERSION` string.
    pub version: String,
    /// The context's `GL_EXTENSIONS` string.
    pub extensions: String,
}

/// A surface became available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceCreatedEvent {
    /// `true` only for the very first surface of the process.
    pub first: bool,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

/// The surface was resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceChangedEvent {
    /// New surface width in pixels.
    pub width: u32,
    /// New surface height in pixels.
    pub height: u32,
}

/// A managed-resource registry reported its state during the destroy
/// transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryStatusEvent {
    /// Which registry reported.
    pub kind: RegistryKind,
    /// The registry's one-line status description.
    pub status: String,
}

/// A one-second FPS bucket closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FpsEvent {
    /// Frames counted in the closed bucket.
    pub fps: u32,
}

/// Receiver for lifecycle diagnostics events.
///
/// All methods default to doing nothing.
pub trait DiagnosticsSink {
    /// A binding was constructed for a new context.
    fn on_binding_installed(&mut self, event: &BindingInstalledEvent) {
        let _ = event;
    }

    /// A surface became available.
    fn on_surface_created(&mut self, event: &SurfaceCreatedEvent) {
        let _ = event;
    }

    /// The surface was resized.
    fn on_surface_changed(&mut self, event: &SurfaceChangedEvent) {
        let _ = event;
    }

    /// The loop observed a resume request.
    fn on_resumed(&mut self) {}

    /// The loop observed a pause request.
    fn on_paused(&mut self) {}

    /// The loop observed a destroy request and shut the context down.
    fn on_destroyed(&mut self) {}

    /// A registry reported its state during the destroy transition.
    fn on_registry_status(&mut self, event: &RegistryStatusEvent) {
        let _ = event;
    }

    /// A one-second FPS bucket closed.
    fn on_fps(&mut self, event: &FpsEvent) {
        let _ = event;
    }
}

/// The lifecycle loop's handle on an optional [`DiagnosticsSink`].
#[derive(Default)]
pub struct Tracer {
    sink: Option<Box<dyn DiagnosticsSink + Send>>,
}

impl Tracer {
    /// Creates a tracer forwarding to `sink`.
    #[must_use]
    pub fn new(sink: Box<dyn DiagnosticsSink + Send>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub(crate) fn binding_installed(&mut self, event: &BindingInstalledEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_binding_installed(event);
        }
    }

    pub(crate) fn surface_created(&mut self, event: &SurfaceCreatedEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_surface_created(event);
        }
    }

    pub(crate) fn surface_changed(&mut self, event: &SurfaceChangedEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_surface_changed(event);
        }
    }

    pub(crate) fn resumed(&mut self) {
        if let Some(sink) = &mut self.sink {
            sink.on_resumed();
        }
    }

    pub(crate) fn paused(&mut self) {
        if let Some(sink) = &mut self.sink {
            sink.on_paused();
        }
    }

    pub(crate) fn destroyed(&mut self) {
        if let Some(sink) = &mut self.sink {
            sink.on_destroyed();
        }
    }

    pub(crate) fn registry_status(&mut self, event: &RegistryStatusEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_registry_status(event);
        }
    }

    pub(crate) fn fps(&mut self, event: &FpsEvent) {
        if let Some(sink) = &mut self.sink {
            sink.on_fps(event);
        }
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("enabled", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        events: Arc<AtomicUsize>,
    }

    impl DiagnosticsSink for CountingSink {
        fn on_fps(&mut self, _event: &FpsEvent) {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn disabled_tracer_drops_events() {
        let mut tracer = Tracer::disabled();
        tracer.fps(&FpsEvent { fps: 60 });
        tracer.resumed();
    }

    #[test]
    fn enabled_tracer_forwards_to_the_sink() {
        let events = Arc::new(AtomicUsize::new(0));
        let mut tracer = Tracer::new(Box::new(CountingSink {
            events: Arc::clone(&events),
        }));

        tracer.fps(&FpsEvent { fps: 60 });
        tracer.fps(&FpsEvent { fps: 59 });
        // Default no-op methods still dispatch without effect.
        tracer.paused();

        assert_eq!(events.load(Ordering::SeqCst), 2);
    }
}
